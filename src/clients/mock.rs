use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

use crate::core::{GenerationParams, LowLevelClient};
use crate::error::AIError;

/// One scripted reply from [`MockClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum MockResponse {
    Text(String),
    Error(String),
}

impl MockResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }
}

#[derive(Debug, Default)]
struct MockState {
    queue: VecDeque<MockResponse>,
    /// Served once the queue is empty
    fallback: Option<MockResponse>,
    calls: Vec<(String, GenerationParams)>,
}

/// Shared handle for scripting a [`MockClient`] and inspecting what it was asked.
#[derive(Debug, Default)]
pub struct MockHandle {
    state: Mutex<MockState>,
}

impl MockHandle {
    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a response served after those already queued
    pub fn push(&self, response: MockResponse) {
        self.lock().queue.push_back(response);
    }

    /// Response returned whenever the queue is empty
    pub fn set_fallback(&self, response: MockResponse) {
        self.lock().fallback = Some(response);
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.lock().calls.iter().map(|(prompt, _)| prompt.clone()).collect()
    }

    pub fn params(&self) -> Vec<GenerationParams> {
        self.lock().calls.iter().map(|(_, params)| *params).collect()
    }
}

/// Scripted client for tests and offline runs.
#[derive(Debug, Clone)]
pub struct MockClient {
    handle: Arc<MockHandle>,
}

impl MockClient {
    pub fn new() -> (Self, Arc<MockHandle>) {
        let handle = Arc::new(MockHandle::default());
        (Self { handle: handle.clone() }, handle)
    }

    /// Serve `responses` in order, then fail every later call
    pub fn with_responses(responses: Vec<MockResponse>) -> (Self, Arc<MockHandle>) {
        let (client, handle) = Self::new();
        for response in responses {
            handle.push(response);
        }
        (client, handle)
    }

    /// Serve `response` for every call
    pub fn always(response: MockResponse) -> (Self, Arc<MockHandle>) {
        let (client, handle) = Self::new();
        handle.set_fallback(response);
        (client, handle)
    }
}

#[async_trait]
impl LowLevelClient for MockClient {
    async fn ask_raw(&self, prompt: String, params: GenerationParams) -> Result<String, AIError> {
        let response = {
            let mut state = self.handle.lock();
            state.calls.push((prompt, params));
            state.queue.pop_front().or_else(|| state.fallback.clone())
        };
        debug!(call = self.handle.call_count(), ?response, "mock client called");

        match response {
            Some(MockResponse::Text(text)) => Ok(text),
            Some(MockResponse::Error(message)) => Err(AIError::Mock(message)),
            None => Err(AIError::Mock("no scripted response left".to_string())),
        }
    }

    fn clone_box(&self) -> Box<dyn LowLevelClient> {
        Box::new(self.clone())
    }
}
