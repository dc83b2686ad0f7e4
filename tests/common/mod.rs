#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use futures::future::BoxFuture;
use serde_json::{Value, json};
use tokio::{net::TcpListener, sync::Semaphore};
use trivia_round::{
    client::{
        QuestionQuery, RawQuestion, TriviaResult, TriviaSource,
        opentdb::{OpenTdbClient, OpenTdbConfig},
    },
    dao::{
        progress::{DEFAULT_STORAGE_KEY, ProgressStore},
        progress_store::MemoryKeyValueStore,
    },
    dto::start::StartRequest,
    services::{RoundService, RoundSettings, SharedRoundService},
    state::RoundPhase,
};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Canned HTTP reply of the fake service.
#[derive(Clone)]
pub struct Reply {
    status: StatusCode,
    body: String,
}

impl Reply {
    pub fn json(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            body: json!({ "error": "unavailable" }).to_string(),
        }
    }

    pub fn raw(body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
        }
    }
}

struct FakeState {
    token: Mutex<Reply>,
    questions: Mutex<Reply>,
    questions_delay: Mutex<Option<Duration>>,
    token_hits: AtomicUsize,
    question_queries: Mutex<Vec<HashMap<String, String>>>,
}

/// OpenTDB stand-in listening on an ephemeral local port.
pub struct FakeTrivia {
    pub base_url: String,
    state: Arc<FakeState>,
}

impl FakeTrivia {
    pub async fn start(token: Reply, questions: Reply) -> Self {
        let state = Arc::new(FakeState {
            token: Mutex::new(token),
            questions: Mutex::new(questions),
            questions_delay: Mutex::new(None),
            token_hits: AtomicUsize::new(0),
            question_queries: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api_token.php", get(token_handler))
            .route("/api.php", get(questions_handler))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn set_questions(&self, reply: Reply) {
        *self.state.questions.lock().unwrap() = reply;
    }

    /// Hold every questions reply back for `delay` before answering.
    pub fn set_questions_delay(&self, delay: Duration) {
        *self.state.questions_delay.lock().unwrap() = Some(delay);
    }

    pub fn token_hits(&self) -> usize {
        self.state.token_hits.load(Ordering::SeqCst)
    }

    pub fn question_queries(&self) -> Vec<HashMap<String, String>> {
        self.state.question_queries.lock().unwrap().clone()
    }

    pub fn client(&self) -> OpenTdbClient {
        self.client_with_timeout(Duration::from_secs(5))
    }

    pub fn client_with_timeout(&self, timeout: Duration) -> OpenTdbClient {
        OpenTdbClient::new(OpenTdbConfig::new(self.base_url.clone()).with_timeout(timeout)).unwrap()
    }
}

async fn token_handler(
    State(state): State<Arc<FakeState>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    state.token_hits.fetch_add(1, Ordering::SeqCst);
    let reply = if params.get("command").map(String::as_str) == Some("request") {
        state.token.lock().unwrap().clone()
    } else {
        Reply::status(StatusCode::BAD_REQUEST)
    };
    respond(reply)
}

async fn questions_handler(
    State(state): State<Arc<FakeState>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    state.question_queries.lock().unwrap().push(params);
    let reply = state.questions.lock().unwrap().clone();
    let delay = *state.questions_delay.lock().unwrap();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    respond(reply)
}

fn respond(reply: Reply) -> impl IntoResponse {
    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
}

pub fn token_ok(token: &str) -> Reply {
    Reply::json(json!({ "response_code": 0, "response_message": "Token Generated Successfully!", "token": token }))
}

pub fn sum_question() -> Value {
    json!({
        "type": "multiple",
        "difficulty": "easy",
        "category": "Math",
        "question": "2+2?",
        "correct_answer": "4",
        "incorrect_answers": ["3", "5", "22"]
    })
}

pub fn capital_question() -> Value {
    json!({
        "type": "multiple",
        "difficulty": "easy",
        "category": "Geography",
        "question": "Capital of France &amp; Monaco&#039;s neighbour?",
        "correct_answer": "Paris",
        "incorrect_answers": ["Lyon", "Nice", "Marseille"]
    })
}

pub fn questions_ok(results: Vec<Value>) -> Reply {
    Reply::json(json!({ "response_code": 0, "results": results }))
}

pub fn questions_code(code: i64) -> Reply {
    Reply::json(json!({ "response_code": code, "results": [] }))
}

pub fn start_request() -> StartRequest {
    StartRequest {
        name: "  Ada Lovelace ".into(),
        email: "ada@example.org".into(),
        ..StartRequest::default()
    }
}

pub fn memory_progress() -> (MemoryKeyValueStore, ProgressStore) {
    let backend = MemoryKeyValueStore::new();
    let progress = ProgressStore::new(Arc::new(backend.clone()), DEFAULT_STORAGE_KEY);
    (backend, progress)
}

pub fn service(source: Arc<dyn TriviaSource>, progress: ProgressStore, amount: u32) -> SharedRoundService {
    RoundService::new(source, progress, RoundSettings { amount })
}

/// Trivia source whose question batch is held back until released.
pub struct GatedSource {
    gate: Arc<Semaphore>,
    batch: Vec<RawQuestion>,
}

impl GatedSource {
    pub fn new(batch: Vec<RawQuestion>) -> Self {
        Self {
            gate: Arc::new(Semaphore::new(0)),
            batch,
        }
    }

    /// Let `count` pending or future fetches through.
    pub fn release(&self, count: usize) {
        self.gate.add_permits(count);
    }
}

impl TriviaSource for GatedSource {
    fn acquire_token(&self) -> BoxFuture<'static, TriviaResult<String>> {
        Box::pin(async { Ok("T".to_string()) })
    }

    fn fetch_questions(
        &self,
        _query: QuestionQuery,
    ) -> BoxFuture<'static, TriviaResult<Vec<RawQuestion>>> {
        let gate = Arc::clone(&self.gate);
        let batch = self.batch.clone();
        Box::pin(async move {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
            Ok(batch)
        })
    }
}

pub fn raw_sum_question() -> RawQuestion {
    serde_json::from_value(sum_question()).unwrap()
}

/// Poll until the controller reaches `phase`.
pub async fn wait_for_phase(service: &SharedRoundService, phase: RoundPhase) {
    for _ in 0..200 {
        if service.view().await.phase == phase {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("controller never reached {phase:?}");
}
