//! Plain-text rendering of round views.

use std::fmt::Write;

use validator::ValidationErrors;

use crate::dto::{
    validation::field_message,
    view::{RoundSummary, RoundView},
};

/// Heading, progress line, prompt and numbered choices of the question on screen.
pub fn render_question(view: &RoundView) -> Option<String> {
    let question = view.current_question.as_ref()?;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Trivia Round ({})",
        view.difficulty.map(|mode| mode.as_str()).unwrap_or("any")
    );
    let _ = writeln!(
        out,
        "Question {}/{}   Score: {}",
        view.question_number, view.total, view.score
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", question.prompt);
    for (idx, choice) in question.choices.iter().enumerate() {
        let _ = writeln!(out, "  {}) {}", idx + 1, choice);
    }
    Some(out)
}

/// Result line followed by the answer review.
pub fn render_summary(summary: &RoundSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Result");
    let _ = writeln!(out, "{summary}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Answer Review (Your answer vs Correct answer):");
    let _ = writeln!(out);
    for entry in &summary.review {
        let _ = writeln!(out, "{entry}");
        let _ = writeln!(out);
    }
    out
}

/// Per-field validation messages, name first.
pub fn render_validation(errors: &ValidationErrors) -> Vec<String> {
    ["name", "email"]
        .into_iter()
        .filter_map(|field| field_message(errors, field))
        .collect()
}

/// Map a typed answer to the choice text: either a 1-based number or the exact text.
pub fn resolve_choice(view: &RoundView, input: &str) -> Option<String> {
    let choices = &view.current_question.as_ref()?.choices;
    let input = input.trim();
    if let Ok(number) = input.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|idx| choices.get(idx))
            .cloned();
    }
    choices.iter().find(|choice| choice.as_str() == input).cloned()
}
