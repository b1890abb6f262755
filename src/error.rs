use thiserror::Error;

/// Why a single generation attempt was discarded. Every variant is retryable;
/// exhausting all attempts is resolved with fallback content, not an error.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("transport error: {0}")]
    Transport(#[from] AIError),
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("only {valid} valid questions, need at least {required}")]
    Shortfall { valid: usize, required: usize },
}

#[derive(Error, Debug)]
pub enum AIError {
    #[error("Gemini API error: {0}")]
    Gemini(#[from] GeminiError),
    #[error("Mock error: {0}")]
    Mock(String),
    #[error("Model returned an empty response")]
    EmptyResponse,
}

#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Rate limit exceeded")]
    RateLimit,
    #[error("Authentication failed")]
    Authentication,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("no parseable question list found in model output")]
    NoStructure,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingKey(&'static str),
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
    #[error("failed to build client: {0}")]
    Client(#[from] AIError),
}
