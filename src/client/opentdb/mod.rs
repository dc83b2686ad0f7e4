mod client;
mod config;
mod error;
mod models;

pub use client::OpenTdbClient;
pub use config::OpenTdbConfig;
pub use error::{TriviaError, TriviaErrorKind, TriviaResult};
pub use models::{
    RATE_LIMITED_CODE, RawQuestion, SUCCESS_CODE, TOKEN_EMPTY_CODE, TOKEN_NOT_FOUND_CODE,
};
