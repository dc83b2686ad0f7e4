mod common;

use std::sync::Arc;

use common::{FakeTrivia, capital_question, memory_progress, questions_code, questions_ok, service, token_ok};
use trivia_round::console::Console;

async fn run_console(service: trivia_round::services::SharedRoundService, script: &str) -> String {
    let mut output = Vec::new();
    Console::new(service, script.as_bytes(), &mut output)
        .run()
        .await
        .unwrap();
    String::from_utf8(output).unwrap()
}

#[tokio::test]
async fn full_round_through_the_terminal() {
    let fake = FakeTrivia::start(token_ok("T"), questions_ok(vec![capital_question()])).await;
    let (_backend, progress) = memory_progress();
    let service = service(Arc::new(fake.client()), progress, 1);

    let out = run_console(
        Arc::clone(&service),
        "s\n  Grace \ngrace@example.org\n\nhard\nParis\nh\nq\n",
    )
    .await;

    assert!(out.contains("Best score: none yet • Attempts: 0"));
    assert!(out.contains("Trivia Round (hard)"));
    assert!(out.contains("Question 1/1   Score: 0"));
    assert!(out.contains("Capital of France & Monaco's neighbour?"));
    assert!(out.contains("Grace, your score is 1/1."));
    assert!(out.contains("Your answer: Paris   Correct: Paris   ✓"));
    assert!(out.contains("Best score: 1/1 • Attempts: 1"));

    let params = &fake.question_queries()[0];
    assert_eq!(params.get("difficulty").map(String::as_str), Some("hard"));
    assert!(!params.contains_key("category"));
}

#[tokio::test]
async fn invalid_form_is_reported_and_menu_returns() {
    let fake = FakeTrivia::start(token_ok("T"), questions_ok(vec![capital_question()])).await;
    let (_backend, progress) = memory_progress();
    let service = service(Arc::new(fake.client()), progress, 1);

    let out = run_console(service, "s\nx\nbad\n\n\nq\n").await;

    assert!(out.contains("Name must be 2-30 characters."));
    assert_eq!(out.matches("[s] start quiz").count(), 2);
    assert_eq!(fake.token_hits(), 0);
}

#[tokio::test]
async fn service_error_is_shown_then_home() {
    let fake = FakeTrivia::start(token_ok("T"), questions_code(5)).await;
    let (_backend, progress) = memory_progress();
    let service = service(Arc::new(fake.client()), progress, 1);

    let out = run_console(Arc::clone(&service), "s\nAda\nada@example.org\n9\n\n\nq\n").await;

    assert!(out.contains("Error: Rate limit exceeded (code 5). Please wait a few seconds."));
    assert_eq!(service.view().await.phase, trivia_round::state::RoundPhase::Idle);
    let params = &fake.question_queries()[0];
    assert_eq!(params.get("category").map(String::as_str), Some("9"));
}

#[tokio::test]
async fn end_of_input_mid_round_quits_without_saving() {
    let fake = FakeTrivia::start(token_ok("T"), questions_ok(vec![capital_question()])).await;
    let (backend, progress) = memory_progress();
    let service = service(Arc::new(fake.client()), progress, 1);

    run_console(Arc::clone(&service), "s\nAda\nada@example.org\n\n\n").await;

    assert_eq!(service.view().await.phase, trivia_round::state::RoundPhase::Idle);
    assert_eq!(backend.peek(trivia_round::dao::progress::DEFAULT_STORAGE_KEY), None);
}
