mod test_utils;

use quiz_query::clients::{FlexibleClient, GeminiConfig};
use quiz_query::config::DEFAULT_GEMINI_MODEL;
use quiz_query::fallback::fallback_quiz;
use quiz_query::{QuizService, RetryConfig, QUIZ_LENGTH};

use crate::test_utils::init_tracing;

// Needs GEMINI_API_KEY; run with `--ignored`

fn live_service() -> Result<QuizService<FlexibleClient>, Box<dyn std::error::Error>> {
    let config = GeminiConfig::from_env(DEFAULT_GEMINI_MODEL)?;
    Ok(QuizService::new(FlexibleClient::gemini(config)?, RetryConfig::default()))
}

#[tokio::test]
#[ignore]
async fn gemini_generates_a_model_backed_quiz() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let service = live_service()?;

    let quiz = service.generate_quiz("Astronomy").await;

    println!("{}", serde_json::to_string_pretty(&quiz)?);
    assert_eq!(quiz.len(), QUIZ_LENGTH);
    assert_ne!(quiz, fallback_quiz("Astronomy"));
    Ok(())
}

#[tokio::test]
#[ignore]
async fn gemini_feedback_stays_within_word_limit() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let service = live_service()?;

    let feedback = service.generate_feedback(3, 5, "Astronomy", &[], &[]).await;

    println!("{feedback}");
    assert!(!feedback.is_empty());
    assert!(feedback.split_whitespace().count() <= 50);
    Ok(())
}
