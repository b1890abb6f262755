use quiz_query::clients::{ClientType, FlexibleClient};
use quiz_query::config::DEFAULT_GEMINI_MODEL;
use quiz_query::error::{AIError, ConfigError};
use quiz_query::{GenerationParams, LowLevelClient};

// The only test in this binary that touches GEMINI_API_KEY, so it cannot race another test.
#[test]
fn gemini_without_key_is_a_config_error() {
    std::env::remove_var("GEMINI_API_KEY");

    let result = FlexibleClient::from_type(ClientType::default(), DEFAULT_GEMINI_MODEL);

    assert!(
        matches!(result, Err(ConfigError::MissingKey("GEMINI_API_KEY"))),
        "expected missing key, got {result:?}"
    );
}

#[test]
fn default_client_is_gemini() {
    assert_eq!(ClientType::default(), ClientType::Gemini);
    assert_eq!("MOCK".parse::<ClientType>(), Ok(ClientType::Mock));
    assert!("bedrock".parse::<ClientType>().is_err());
}

#[tokio::test]
async fn explicit_mock_needs_no_key_and_has_no_script() {
    let client = FlexibleClient::from_type(ClientType::Mock, DEFAULT_GEMINI_MODEL).unwrap();

    let result = client.ask_raw("hello".to_string(), GenerationParams::default()).await;

    assert!(matches!(result, Err(AIError::Mock(_))));
}

#[tokio::test]
async fn mock_handle_scripts_the_flexible_client() {
    let (client, handle) = FlexibleClient::mock();
    handle.push(quiz_query::clients::MockResponse::text("scripted"));

    let text = client.ask_raw("hello".to_string(), GenerationParams::default()).await.unwrap();

    assert_eq!(text, "scripted");
    assert_eq!(handle.prompts(), vec!["hello".to_string()]);
}
