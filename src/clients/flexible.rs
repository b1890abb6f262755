use crate::clients::gemini::{GeminiClient, GeminiConfig};
use crate::clients::mock::{MockClient, MockHandle};
use crate::core::{GenerationParams, LowLevelClient};
use crate::error::{AIError, ConfigError};
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Transport selected at runtime. The mock is only used when asked for by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientType {
    #[default]
    Gemini,
    Mock,
}

impl FromStr for ClientType {
    type Err = String;

    /// Parse client type from string (case insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "mock" => Ok(Self::Mock),
            _ => Err(format!("Unknown client type: '{}'. Supported: gemini, mock", s)),
        }
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientType::Gemini => write!(f, "Gemini"),
            ClientType::Mock => write!(f, "Mock"),
        }
    }
}

/// Flexible client that wraps any LowLevelClient and provides factory functions
#[derive(Debug, Clone)]
pub struct FlexibleClient {
    inner: Arc<dyn LowLevelClient>,
}

impl FlexibleClient {
    /// Create a new FlexibleClient wrapping the given client
    pub fn new(client: Box<dyn LowLevelClient>) -> Self {
        Self { inner: Arc::from(client) }
    }

    /// Build the client for `client_type`. Gemini needs `GEMINI_API_KEY`; a missing
    /// key is reported here, before any request is made.
    pub fn from_type(client_type: ClientType, model: &str) -> Result<Self, ConfigError> {
        match client_type {
            ClientType::Gemini => Ok(Self::gemini(GeminiConfig::from_env(model)?)?),
            ClientType::Mock => {
                let (client, _handle) = Self::mock();
                Ok(client)
            }
        }
    }

    /// Create a FlexibleClient with a Gemini client
    pub fn gemini(config: GeminiConfig) -> Result<Self, AIError> {
        Ok(Self::new(Box::new(GeminiClient::new(config)?)))
    }

    /// Create a FlexibleClient with an unscripted mock and return the handle for configuration
    pub fn mock() -> (Self, Arc<MockHandle>) {
        let (mock_client, handle) = MockClient::new();
        (Self::new(Box::new(mock_client)), handle)
    }
}

#[async_trait]
impl LowLevelClient for FlexibleClient {
    async fn ask_raw(&self, prompt: String, params: GenerationParams) -> Result<String, AIError> {
        self.inner.ask_raw(prompt, params).await
    }

    fn clone_box(&self) -> Box<dyn LowLevelClient> {
        Box::new(self.clone())
    }
}
