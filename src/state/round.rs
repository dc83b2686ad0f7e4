use rand::Rng;
use uuid::Uuid;

use crate::{
    client::RawQuestion,
    dto::start::Player,
    utils::{entities::decode_entities, shuffle::shuffled_with},
};

/// Multiple-choice question ready to be shown, with decoded text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Decoded prompt.
    pub prompt: String,
    /// Decoded correct answer; always one of `choices`.
    pub correct_answer: String,
    /// Correct answer and distractors in display order.
    pub choices: Vec<String>,
    /// Choice submitted by the player, once answered.
    pub user_choice: Option<String>,
}

impl Question {
    /// Decode a raw service question and shuffle its choices with `rng`.
    pub fn from_raw_with<R: Rng + ?Sized>(raw: RawQuestion, rng: &mut R) -> Self {
        let correct_answer = decode_entities(&raw.correct_answer);
        let mut choices = Vec::with_capacity(raw.incorrect_answers.len() + 1);
        choices.push(correct_answer.clone());
        choices.extend(raw.incorrect_answers.iter().map(|answer| decode_entities(answer)));

        Self {
            prompt: decode_entities(&raw.question),
            correct_answer,
            choices: shuffled_with(&choices, rng),
            user_choice: None,
        }
    }

    /// Whether the recorded choice matches the correct answer.
    pub fn answered_correctly(&self) -> bool {
        self.user_choice.as_deref() == Some(self.correct_answer.as_str())
    }
}

impl From<RawQuestion> for Question {
    fn from(raw: RawQuestion) -> Self {
        Self::from_raw_with(raw, &mut rand::rng())
    }
}

/// Data of the round currently loading, being answered, or just finished.
#[derive(Debug, Clone)]
pub struct RoundState {
    /// Identifier minted when the round entered loading.
    pub id: Uuid,
    /// Player who started the round.
    pub player: Player,
    questions: Vec<Question>,
    current_index: usize,
    score: u32,
}

impl RoundState {
    /// Start an empty round for `player`.
    pub fn new(player: Player) -> Self {
        Self {
            id: Uuid::new_v4(),
            player,
            questions: Vec::new(),
            current_index: 0,
            score: 0,
        }
    }

    /// Install the normalized question list, resetting progress.
    pub fn load_questions(&mut self, questions: Vec<Question>) {
        self.questions = questions;
        self.current_index = 0;
        self.score = 0;
    }

    /// All questions of the round.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Zero-based index of the question awaiting an answer.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Number of correct answers so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Round length.
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Question awaiting an answer, if any remain.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    /// Whether every question has been answered.
    pub fn is_complete(&self) -> bool {
        !self.questions.is_empty() && self.current_index >= self.questions.len()
    }

    /// Record `choice` for the current question, score it and advance.
    ///
    /// Returns whether the choice was correct, or `None` when no question is pending.
    pub fn record_answer(&mut self, choice: String) -> Option<bool> {
        let question = self.questions.get_mut(self.current_index)?;
        question.user_choice = Some(choice);
        let correct = question.answered_correctly();
        if correct {
            self.score += 1;
        }
        self.current_index += 1;
        Some(correct)
    }
}
