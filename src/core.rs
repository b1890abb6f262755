//! Model client abstraction shared by every transport.

use crate::error::AIError;
use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Duration;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2000;
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(2);
pub const DEFAULT_MIN_VALID_QUESTIONS: usize = 3;

/// Bounded retry policy for quiz generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total model calls per quiz, including the first
    pub max_attempts: usize,
    /// Pause between a failed attempt and the next one
    pub backoff: Duration,
    /// Valid questions an attempt needs before the rest is padded from the fallback bank
    pub min_valid_questions: usize,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: DEFAULT_BACKOFF,
            min_valid_questions: DEFAULT_MIN_VALID_QUESTIONS,
        }
    }
}

impl RetryConfig {
    #[must_use]
    pub const fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

/// Sampling settings sent with every prompt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

/// Low-level model client abstraction.
///
/// Implementors provide `ask_raw`, which executes a prompt and returns the raw
/// model text. Extraction, validation and fallback are handled by
/// [`QuizService`](crate::service::QuizService); a client never interprets
/// the text it returns.
#[async_trait]
pub trait LowLevelClient: Send + Sync + Debug {
    /// The only method that implementations must provide
    async fn ask_raw(&self, prompt: String, params: GenerationParams) -> Result<String, AIError>;

    /// Clone this client into a boxed trait object
    fn clone_box(&self) -> Box<dyn LowLevelClient>;
}

impl Clone for Box<dyn LowLevelClient> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[async_trait]
impl LowLevelClient for Box<dyn LowLevelClient> {
    async fn ask_raw(&self, prompt: String, params: GenerationParams) -> Result<String, AIError> {
        self.as_ref().ask_raw(prompt, params).await
    }

    fn clone_box(&self) -> Box<dyn LowLevelClient> {
        self.as_ref().clone_box()
    }
}
