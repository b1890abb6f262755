use async_trait::async_trait;
use std::fmt::Debug;

/// One prompt/response round trip with the model.
#[derive(Debug, Clone, Copy)]
pub struct Exchange<'a> {
    /// What the prompt was for, e.g. `quiz` or `feedback`
    pub purpose: &'a str,
    pub topic: &'a str,
    /// 1-based attempt number
    pub attempt: usize,
    pub prompt: &'a str,
    /// Raw model text, or the transport error message
    pub outcome: Result<&'a str, &'a str>,
}

/// Receives every model exchange for diagnostics. Failures are logged by the caller and never
/// affect generation.
#[async_trait]
pub trait Interceptor: Send + Sync + Debug {
    async fn save(&self, exchange: &Exchange<'_>) -> std::io::Result<()>;
}

pub mod file;
pub use file::FileInterceptor;
