mod test_utils;

use std::time::Duration;

use quiz_query::clients::{MockClient, MockResponse};
use quiz_query::fallback::{fallback_question, fallback_quiz};
use quiz_query::{GenerationParams, QuizService, RetryConfig, QUIZ_LENGTH};
use serde_json::{json, Value};

use crate::test_utils::{
    constant_service, five_valid, init_tracing, scripted_service, short_question, text, valid_question,
    VALID_TEXTS,
};

#[tokio::test]
async fn transport_failure_falls_back_to_bank_in_order() {
    let (service, handle) = constant_service(MockResponse::error("connection refused"));

    let quiz = service.generate_quiz("History").await;

    assert_eq!(handle.call_count(), 3);
    assert_eq!(quiz.len(), QUIZ_LENGTH);
    for (i, question) in quiz.iter().enumerate() {
        assert_eq!(*question, fallback_question("History", i + 1));
    }
    assert_eq!(quiz, fallback_quiz("History"));
}

#[tokio::test]
async fn three_valid_two_invalid_pads_slots_four_and_five_without_retry() {
    let response = json!([
        valid_question(VALID_TEXTS[0], 0),
        short_question(),
        valid_question(VALID_TEXTS[1], 1),
        short_question(),
        valid_question(VALID_TEXTS[2], 2),
    ]);
    let (service, handle) = scripted_service(vec![text(&response)]);

    let quiz = service.generate_quiz("World History").await;

    assert_eq!(handle.call_count(), 1);
    let questions = quiz.questions();
    assert_eq!(questions[0].question, VALID_TEXTS[0]);
    assert_eq!(questions[1].question, VALID_TEXTS[1]);
    assert_eq!(questions[2].question, VALID_TEXTS[2]);
    assert_eq!(questions[1].correct_index, 1);
    assert_eq!(questions[3], fallback_question("World History", 4));
    assert_eq!(questions[4], fallback_question("World History", 5));

    let ids: Vec<usize> = quiz.iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn five_valid_questions_are_used_as_is() {
    let fenced = format!("Here is your quiz!\n```json\n{}\n```\nGood luck.", five_valid());
    let (service, handle) = scripted_service(vec![MockResponse::text(fenced)]);

    let quiz = service.generate_quiz("Geography").await;

    assert_eq!(handle.call_count(), 1);
    let texts: Vec<&str> = quiz.iter().map(|q| q.question.as_str()).collect();
    assert_eq!(texts, VALID_TEXTS.to_vec());
}

#[tokio::test]
async fn unparseable_then_valid_response_retries_once() {
    let (service, handle) = scripted_service(vec![
        MockResponse::text("I cannot produce JSON today."),
        text(&five_valid()),
    ]);

    let quiz = service.generate_quiz("Geography").await;

    assert_eq!(handle.call_count(), 2);
    assert_eq!(quiz.questions()[0].question, VALID_TEXTS[0]);
}

#[tokio::test]
async fn shortfall_on_every_attempt_uses_full_fallback() {
    let two_valid = json!([
        valid_question(VALID_TEXTS[0], 0),
        valid_question(VALID_TEXTS[1], 1),
        short_question(),
    ]);
    let (service, handle) = constant_service(text(&two_valid));

    let quiz = service.generate_quiz("Wellness").await;

    assert_eq!(handle.call_count(), 3);
    assert_eq!(quiz, fallback_quiz("Wellness"));
}

#[tokio::test]
async fn candidates_past_the_fifth_are_never_validated() {
    let mut items = vec![
        valid_question(VALID_TEXTS[0], 0),
        valid_question(VALID_TEXTS[1], 0),
        short_question(),
        short_question(),
        short_question(),
    ];
    items.extend(VALID_TEXTS[2..].iter().map(|t| valid_question(t, 0)));
    let (service, handle) = constant_service(text(&Value::Array(items)));

    let quiz = service.generate_quiz("Pop Culture").await;

    assert_eq!(handle.call_count(), 3);
    assert_eq!(quiz, fallback_quiz("Pop Culture"));
}

#[tokio::test]
async fn empty_response_counts_as_failed_attempt() {
    let (service, handle) = scripted_service(vec![MockResponse::text("   "), text(&five_valid())]);

    let quiz = service.generate_quiz("Geography").await;

    assert_eq!(handle.call_count(), 2);
    assert_eq!(quiz.questions()[4].question, VALID_TEXTS[4]);
}

#[tokio::test]
async fn quiz_is_always_five_questions() {
    let responses = vec![
        MockResponse::error("timeout"),
        MockResponse::text(""),
        MockResponse::text("[]"),
        MockResponse::text(r#"{"questions": []}"#),
        MockResponse::text("not even close"),
        text(&json!([valid_question(VALID_TEXTS[0], 0)])),
        text(&five_valid()),
        text(&json!({ "questions": [five_valid(), five_valid()] })),
    ];

    for response in responses {
        let (service, _handle) = constant_service(response.clone());
        for topic in ["Space Exploration", "Knitting", ""] {
            let quiz = service.generate_quiz(topic).await;
            assert_eq!(quiz.len(), QUIZ_LENGTH, "response {response:?}, topic {topic:?}");
            assert_eq!(quiz.questions().len(), QUIZ_LENGTH);
        }
    }
}

#[tokio::test]
async fn prompt_and_params_reach_the_client() {
    let (service, handle) = scripted_service(vec![text(&five_valid())]);

    service.generate_quiz("Tech Trends").await;

    let prompts = handle.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("5 multiple-choice questions about Tech Trends"));
    assert!(prompts[0].contains("correctIndex"));
    assert_eq!(handle.params()[0], GenerationParams { temperature: 0.7, max_output_tokens: 2000 });
}

#[tokio::test(start_paused = true)]
async fn backoff_separates_failed_attempts_but_not_the_last() {
    init_tracing();
    let (client, handle) = MockClient::always(MockResponse::error("unavailable"));
    let service = QuizService::new(client, RetryConfig::default());

    let start = tokio::time::Instant::now();
    service.generate_quiz("Wellness").await;
    let elapsed = start.elapsed();

    assert_eq!(handle.call_count(), 3);
    assert!(elapsed >= Duration::from_secs(4), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_secs(6), "elapsed {elapsed:?}");
}

#[tokio::test]
async fn single_attempt_policy_does_not_retry() {
    init_tracing();
    let (client, handle) = MockClient::always(MockResponse::error("down"));
    let service = QuizService::new(client, RetryConfig::default().with_max_attempts(1));

    let quiz = service.generate_quiz("Chess").await;

    assert_eq!(handle.call_count(), 1);
    assert_eq!(quiz.questions()[0].question, "What is a key aspect of Chess?");
}

#[tokio::test]
async fn boxed_clients_drive_the_service() {
    init_tracing();
    let (client, handle) = MockClient::with_responses(vec![text(&five_valid())]);
    let boxed: Box<dyn quiz_query::LowLevelClient> = Box::new(client);
    let service = QuizService::new(boxed, RetryConfig::default());

    let quiz = service.generate_quiz("Geography").await;

    assert_eq!(handle.call_count(), 1);
    assert_eq!(quiz.questions()[0].question, VALID_TEXTS[0]);
}
