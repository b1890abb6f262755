pub mod clients;
pub mod config;
pub mod core;
pub mod error;
pub mod fallback;
pub mod feedback;
pub mod interceptors;
pub mod parser;
pub mod quiz;
pub mod service;
pub mod validator;

// Convenient re-exports
pub use crate::core::{GenerationParams, LowLevelClient, RetryConfig};
pub use quiz::{Question, QuizSet, QUIZ_LENGTH};
pub use service::QuizService;
