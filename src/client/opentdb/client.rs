use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::client::{QuestionQuery, TriviaSource};

use super::{
    config::OpenTdbConfig,
    error::{TriviaError, TriviaResult},
    models::{QuestionsResponse, RATE_LIMITED_CODE, RawQuestion, SUCCESS_CODE, TokenResponse},
};

const TOKEN_ENDPOINT: &str = "Token";
const QUESTIONS_ENDPOINT: &str = "API";

/// HTTP client for an OpenTDB-compatible trivia service.
#[derive(Clone)]
pub struct OpenTdbClient {
    client: Client,
    base_url: Arc<str>,
}

impl OpenTdbClient {
    /// Build a client from the provided configuration.
    pub fn new(config: OpenTdbConfig) -> TriviaResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|source| TriviaError::ClientBuilder { source })?;

        Ok(Self {
            client,
            base_url: Arc::<str>::from(config.base_url.trim_end_matches('/')),
        })
    }

    /// Request a session token from the token endpoint.
    pub async fn request_token(&self) -> TriviaResult<String> {
        let url = format!("{}/api_token.php", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("command", "request")])
            .send()
            .await
            .map_err(|source| TriviaError::Transport {
                endpoint: TOKEN_ENDPOINT,
                source,
            })?;

        let payload: TokenResponse = read_json(TOKEN_ENDPOINT, response).await?;
        match payload.token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(TriviaError::MissingToken),
        }
    }

    /// Request a batch of multiple-choice questions.
    ///
    /// The HTTP status and the service `response_code` are checked separately:
    /// a 200 response can still carry a logical failure.
    pub async fn request_questions(&self, query: &QuestionQuery) -> TriviaResult<Vec<RawQuestion>> {
        let url = format!("{}/api.php", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&query_pairs(query))
            .send()
            .await
            .map_err(|source| TriviaError::Transport {
                endpoint: QUESTIONS_ENDPOINT,
                source,
            })?;

        let payload: QuestionsResponse = read_json(QUESTIONS_ENDPOINT, response).await?;
        match payload.response_code {
            SUCCESS_CODE if payload.results.is_empty() => Err(TriviaError::EmptyBatch),
            SUCCESS_CODE => {
                debug!(count = payload.results.len(), "received question batch");
                Ok(payload.results)
            }
            RATE_LIMITED_CODE => {
                warn!("trivia service rate limit hit");
                Err(TriviaError::RateLimited)
            }
            code => Err(TriviaError::ServiceCode { code }),
        }
    }
}

impl TriviaSource for OpenTdbClient {
    fn acquire_token(&self) -> BoxFuture<'static, TriviaResult<String>> {
        let client = self.clone();
        Box::pin(async move { client.request_token().await })
    }

    fn fetch_questions(
        &self,
        query: QuestionQuery,
    ) -> BoxFuture<'static, TriviaResult<Vec<RawQuestion>>> {
        let client = self.clone();
        Box::pin(async move { client.request_questions(&query).await })
    }
}

/// Query string for the questions endpoint; optional filters are omitted when unset.
fn query_pairs(query: &QuestionQuery) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
        ("amount", query.amount.to_string()),
        ("difficulty", query.difficulty.as_str().to_string()),
        ("type", "multiple".to_string()),
    ];
    if let Some(category) = query.category {
        pairs.push(("category", category.to_string()));
    }
    if let Some(token) = query.token.as_deref().filter(|token| !token.is_empty()) {
        pairs.push(("token", token.to_string()));
    }
    pairs
}

/// Check the HTTP status, then decode the body as JSON.
async fn read_json<T>(endpoint: &'static str, response: Response) -> TriviaResult<T>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        return Err(TriviaError::HttpStatus { endpoint, status });
    }

    let body = response
        .bytes()
        .await
        .map_err(|source| TriviaError::Transport { endpoint, source })?;

    serde_json::from_slice(&body).map_err(|source| TriviaError::MalformedPayload { endpoint, source })
}
