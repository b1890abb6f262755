use crate::core::{GenerationParams, RetryConfig};
use crate::error::ConfigError;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Trait for types that can retrieve their configuration key from environment variables
pub trait KeyFromEnv {
    /// The environment variable name for this client's API key
    const KEY_NAME: &'static str;

    /// Find the API key by checking environment variables first, then .env file
    fn find_key() -> Option<String> {
        // First try to load .env file (silently fail if not found)
        let _ = dotenvy::dotenv();

        env::var(Self::KEY_NAME).ok().filter(|key| !key.trim().is_empty())
    }

    /// Like [`find_key`](Self::find_key), but a missing key is a configuration error
    fn require_key() -> Result<String, ConfigError> {
        Self::find_key().ok_or(ConfigError::MissingKey(Self::KEY_NAME))
    }
}

/// Everything needed to build a [`QuizService`](crate::service::QuizService) and its client.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub model: String,
    pub params: GenerationParams,
    pub retry: RetryConfig,
    /// Directory for per-exchange markdown logs; `None` disables them
    pub exchange_log_dir: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_GEMINI_MODEL.to_string(),
            params: GenerationParams::default(),
            retry: RetryConfig::default(),
            exchange_log_dir: None,
        }
    }
}

impl ServiceConfig {
    /// Read overrides from the environment (and `.env`), keeping defaults for unset values.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        let retry = RetryConfig {
            max_attempts: parse_var("QUIZ_MAX_ATTEMPTS")?.unwrap_or(defaults.retry.max_attempts),
            backoff: parse_var::<u64>("QUIZ_RETRY_DELAY_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.retry.backoff),
            min_valid_questions: defaults.retry.min_valid_questions,
        };
        if retry.max_attempts == 0 {
            return Err(ConfigError::Invalid { name: "QUIZ_MAX_ATTEMPTS", value: "0".into() });
        }

        Ok(Self {
            model: env::var("GEMINI_MODEL").unwrap_or(defaults.model),
            params: GenerationParams {
                temperature: parse_var("QUIZ_TEMPERATURE")?.unwrap_or(defaults.params.temperature),
                max_output_tokens: parse_var("QUIZ_MAX_OUTPUT_TOKENS")?
                    .unwrap_or(defaults.params.max_output_tokens),
            },
            retry,
            exchange_log_dir: env::var_os("QUIZ_EXCHANGE_LOG_DIR").map(PathBuf::from),
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_var_reports_unparseable_values() {
        env::set_var("QUIZ_QUERY_TEST_ATTEMPTS", " 4 ");
        assert_eq!(parse_var::<usize>("QUIZ_QUERY_TEST_ATTEMPTS").unwrap(), Some(4));

        env::set_var("QUIZ_QUERY_TEST_ATTEMPTS", "many");
        assert!(matches!(
            parse_var::<usize>("QUIZ_QUERY_TEST_ATTEMPTS"),
            Err(ConfigError::Invalid { name: "QUIZ_QUERY_TEST_ATTEMPTS", .. })
        ));

        env::remove_var("QUIZ_QUERY_TEST_ATTEMPTS");
        assert_eq!(parse_var::<usize>("QUIZ_QUERY_TEST_ATTEMPTS").unwrap(), None);
    }
}
