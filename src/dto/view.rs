//! Read-only snapshots handed to presentation layers.

use std::fmt;

use uuid::Uuid;

use crate::{
    dao::models::BestRecord,
    dto::start::Difficulty,
    state::{RoundPhase, RoundState},
};

/// Placeholder shown in the review for a question that never got an answer.
pub const NOT_ANSWERED: &str = "(not answered)";

/// Question as shown to the player, without the answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    /// Decoded question text.
    pub prompt: String,
    /// Choices in display order.
    pub choices: Vec<String>,
}

/// One line of the end-of-round answer review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntry {
    /// One-based question number.
    pub number: usize,
    /// Question text.
    pub prompt: String,
    /// Choice the player submitted, if any.
    pub your_answer: Option<String>,
    /// Expected answer.
    pub correct_answer: String,
    /// Whether the submitted choice matched.
    pub correct: bool,
}

impl fmt::Display for ReviewEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.correct { "✓" } else { "✗" };
        writeln!(f, "{}) {}", self.number, self.prompt)?;
        write!(
            f,
            "   Your answer: {}   Correct: {}   {}",
            self.your_answer.as_deref().unwrap_or(NOT_ANSWERED),
            self.correct_answer,
            mark
        )
    }
}

/// Result of a finished round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    /// Name of the player who finished the round.
    pub player_name: String,
    /// Correct answers.
    pub score: u32,
    /// Questions in the round.
    pub total: usize,
    /// Per-question review, in question order.
    pub review: Vec<ReviewEntry>,
}

impl fmt::Display for RoundSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, your score is {}/{}.",
            self.player_name, self.score, self.total
        )
    }
}

/// Everything a presentation layer needs to draw the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundView {
    /// Current controller phase.
    pub phase: RoundPhase,
    /// Round being loaded, answered or summarized.
    pub round_id: Option<Uuid>,
    /// Difficulty of that round.
    pub difficulty: Option<Difficulty>,
    /// One-based number of the question on screen; 0 before answering starts.
    pub question_number: usize,
    /// Round length.
    pub total: usize,
    /// Correct answers so far.
    pub score: u32,
    /// Question awaiting an answer while answering.
    pub current_question: Option<QuestionView>,
    /// Stored best record.
    pub best: BestRecord,
    /// Present once the round is finished.
    pub summary: Option<RoundSummary>,
}

impl RoundView {
    /// Project the controller state into a view.
    pub fn build(phase: &RoundPhase, round: Option<&RoundState>, best: BestRecord) -> Self {
        let answering = matches!(phase, RoundPhase::Answering);
        let finished = matches!(phase, RoundPhase::Finished);

        let question_number = match round {
            Some(round) if answering => round.current_index() + 1,
            Some(round) if finished => round.total(),
            _ => 0,
        };

        let current_question = round
            .filter(|_| answering)
            .and_then(RoundState::current_question)
            .map(|question| QuestionView {
                prompt: question.prompt.clone(),
                choices: question.choices.clone(),
            });

        let summary = round.filter(|_| finished).map(summarize);

        Self {
            phase: phase.clone(),
            round_id: round.map(|round| round.id),
            difficulty: round.map(|round| round.player.mode),
            question_number,
            total: round.map(RoundState::total).unwrap_or_default(),
            score: round.map(RoundState::score).unwrap_or_default(),
            current_question,
            best,
            summary,
        }
    }

    /// Failure reason while the round is stopped on an error.
    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            RoundPhase::ErrorStopped { message } => Some(message),
            _ => None,
        }
    }
}

fn summarize(round: &RoundState) -> RoundSummary {
    let review = round
        .questions()
        .iter()
        .enumerate()
        .map(|(idx, question)| ReviewEntry {
            number: idx + 1,
            prompt: question.prompt.clone(),
            your_answer: question.user_choice.clone(),
            correct_answer: question.correct_answer.clone(),
            correct: question.answered_correctly(),
        })
        .collect();

    RoundSummary {
        player_name: round.player.name.clone(),
        score: round.score(),
        total: round.total(),
        review,
    }
}
