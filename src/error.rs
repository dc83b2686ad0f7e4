use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

use crate::state::InvalidTransition;

/// Errors returned by the round controller entry points.
///
/// Trivia service and storage failures never show up here: the former move the
/// round to the error phase, the latter are absorbed by the progress store.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Start form input was rejected; carries one message per failing field.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// Operation cannot be performed in the current phase.
    #[error(transparent)]
    InvalidState(#[from] InvalidTransition),
    /// Operation needs data that the current round does not have.
    #[error("invalid state: {0}")]
    MissingRound(String),
    /// The round was left before its questions arrived; the result was dropped.
    #[error("round {round_id} was abandoned while loading")]
    Abandoned {
        /// Identifier of the abandoned round.
        round_id: Uuid,
    },
}
