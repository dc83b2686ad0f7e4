//! Error types raised while talking to the trivia service.

use reqwest::StatusCode;
use thiserror::Error;

/// Convenient result alias returning [`TriviaError`] failures.
pub type TriviaResult<T> = Result<T, TriviaError>;

/// Coarse classification of trivia failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriviaErrorKind {
    /// Transport failure or non-success HTTP status.
    Network,
    /// Unexpected payload or unrecognized service status code.
    Protocol,
    /// The service asked the client to slow down.
    RateLimit,
}

/// Failures that can occur while interacting with the trivia service.
#[derive(Debug, Error)]
pub enum TriviaError {
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build trivia HTTP client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// The request could not be sent or its body could not be read.
    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    /// The service answered with a non-success HTTP status.
    #[error("{endpoint} HTTP {status}")]
    HttpStatus {
        endpoint: &'static str,
        status: StatusCode,
    },
    /// A success response could not be decoded.
    #[error("{endpoint} returned an unreadable payload")]
    MalformedPayload {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// The token endpoint answered without a token.
    #[error("No token in response")]
    MissingToken,
    /// The service reported a status code other than success or rate limit.
    #[error("API error code {code}")]
    ServiceCode { code: i64 },
    /// The service reported status code 5.
    #[error("Rate limit exceeded (code 5). Please wait a few seconds.")]
    RateLimited,
    /// The service reported success but sent no questions.
    #[error("API returned no questions")]
    EmptyBatch,
}

impl TriviaError {
    /// Classify the failure.
    pub fn kind(&self) -> TriviaErrorKind {
        match self {
            TriviaError::ClientBuilder { .. }
            | TriviaError::Transport { .. }
            | TriviaError::HttpStatus { .. } => TriviaErrorKind::Network,
            TriviaError::MalformedPayload { .. }
            | TriviaError::MissingToken
            | TriviaError::ServiceCode { .. }
            | TriviaError::EmptyBatch => TriviaErrorKind::Protocol,
            TriviaError::RateLimited => TriviaErrorKind::RateLimit,
        }
    }

    /// Whether the cached session token should be dropped after this failure.
    pub fn invalidates_token(&self) -> bool {
        matches!(
            self,
            TriviaError::ServiceCode {
                code: super::TOKEN_NOT_FOUND_CODE | super::TOKEN_EMPTY_CODE
            }
        )
    }
}
