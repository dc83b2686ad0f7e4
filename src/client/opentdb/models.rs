use serde::Deserialize;

/// Service status code for a successful request.
pub const SUCCESS_CODE: i64 = 0;
/// Service status code for "too many requests".
pub const RATE_LIMITED_CODE: i64 = 5;
/// Service status code for an unknown session token.
pub const TOKEN_NOT_FOUND_CODE: i64 = 3;
/// Service status code for a session token that has served every question.
pub const TOKEN_EMPTY_CODE: i64 = 4;

/// Body returned by the token endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    #[serde(default)]
    pub token: Option<String>,
}

/// Body returned by the questions endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct QuestionsResponse {
    pub response_code: i64,
    #[serde(default)]
    pub results: Vec<RawQuestion>,
}

/// One question exactly as the service sends it, still HTML-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawQuestion {
    /// Encoded question prompt.
    pub question: String,
    /// Encoded correct answer.
    pub correct_answer: String,
    /// Encoded distractors.
    pub incorrect_answers: Vec<String>,
}
