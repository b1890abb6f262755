#![allow(dead_code)]

use std::sync::{Arc, Once};
use std::time::Duration;

use quiz_query::clients::{MockClient, MockHandle, MockResponse};
use quiz_query::{QuizService, RetryConfig};
use serde_json::{json, Value};

pub fn init_tracing() {
    static START: Once = Once::new();
    START.call_once(|| {
        let filter = std::env::var("RUST_LOG")
            .map(tracing_subscriber::EnvFilter::new)
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("quiz_query=debug"));

        let _ = tracing_subscriber::fmt()
            .with_test_writer() // ensure logs are captured by the test harness
            .without_time()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Retry policy with no pause between attempts
pub fn fast_retry() -> RetryConfig {
    RetryConfig::default().with_backoff(Duration::ZERO)
}

/// Service over a mock that serves `responses` in order
pub fn scripted_service(responses: Vec<MockResponse>) -> (QuizService<MockClient>, Arc<MockHandle>) {
    init_tracing();
    let (client, handle) = MockClient::with_responses(responses);
    (QuizService::new(client, fast_retry()), handle)
}

/// Service over a mock that serves `response` for every call
pub fn constant_service(response: MockResponse) -> (QuizService<MockClient>, Arc<MockHandle>) {
    init_tracing();
    let (client, handle) = MockClient::always(response);
    (QuizService::new(client, fast_retry()), handle)
}

pub fn valid_question(text: &str, correct_index: usize) -> Value {
    json!({
        "question": text,
        "options": ["Paris", "Berlin", "Madrid", "Rome"],
        "correctIndex": correct_index
    })
}

/// Fails validation: text is too short
pub fn short_question() -> Value {
    json!({
        "question": "OK?",
        "options": ["Yes", "No", "Maybe", "Never"],
        "correctIndex": 0
    })
}

pub const VALID_TEXTS: [&str; 5] = [
    "What is the capital of France?",
    "Which river flows through Cairo?",
    "Which ocean lies west of Portugal?",
    "What is the tallest mountain on Earth?",
    "Which desert covers most of northern Africa?",
];

pub fn five_valid() -> Value {
    Value::Array(
        VALID_TEXTS
            .iter()
            .enumerate()
            .map(|(i, text)| valid_question(text, i % 4))
            .collect(),
    )
}

pub fn text(value: &Value) -> MockResponse {
    MockResponse::text(value.to_string())
}
