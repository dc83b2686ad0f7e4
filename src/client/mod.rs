//! Remote trivia service access.

/// OpenTDB-compatible HTTP implementation.
pub mod opentdb;

use futures::future::BoxFuture;

use crate::dto::start::Difficulty;

pub use self::opentdb::{RawQuestion, TriviaError, TriviaErrorKind, TriviaResult};

/// Parameters of a question batch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionQuery {
    /// Number of questions to request.
    pub amount: u32,
    /// Difficulty filter.
    pub difficulty: Difficulty,
    /// Optional category id; `None` means any category.
    pub category: Option<u32>,
    /// Session token deduplicating questions across rounds.
    pub token: Option<String>,
}

/// Source of session tokens and raw question batches.
pub trait TriviaSource: Send + Sync {
    /// Request a fresh session token.
    fn acquire_token(&self) -> BoxFuture<'static, TriviaResult<String>>;
    /// Request one batch of multiple-choice questions.
    fn fetch_questions(&self, query: QuestionQuery)
    -> BoxFuture<'static, TriviaResult<Vec<RawQuestion>>>;
}
