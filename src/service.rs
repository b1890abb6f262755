//! Quiz generation and feedback on top of a [`LowLevelClient`].
//!
//! `QuizService` never fails: transport errors, unparseable output and
//! low-quality questions are retried a bounded number of times, and whatever
//! the model could not supply is filled from the fallback bank.

use crate::core::{GenerationParams, LowLevelClient, RetryConfig};
use crate::error::{AIError, GenerationError};
use crate::fallback::{fallback_question, fallback_quiz};
use crate::feedback::{condense_feedback, feedback_prompt, template_feedback};
use crate::interceptors::{Exchange, Interceptor};
use crate::parser::extract_candidates;
use crate::quiz::{Question, QuizSet, QUIZ_LENGTH};
use crate::validator::validate;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

fn quiz_prompt(topic: &str) -> String {
    format!(
        r#"You are a quiz generator. Create {QUIZ_LENGTH} multiple-choice questions about {topic}.

IMPORTANT RULES:
1. Check all spelling and grammar carefully
2. End questions with "?" not "."
3. Return ONLY valid JSON - no extra text before or after
4. Each question needs exactly 4 options
5. correctIndex must be 0, 1, 2, or 3

Return this exact JSON format:
[
  {{
    "question": "Your question here?",
    "options": ["Option A", "Option B", "Option C", "Option D"],
    "correctIndex": 0
  }}
]

Generate {QUIZ_LENGTH} interesting and educational questions about {topic}:"#
    )
}

/// Explicitly constructed service holding the model client and retry policy.
/// One instance can be shared by reference across concurrent requests.
#[derive(Debug, Clone)]
pub struct QuizService<C: LowLevelClient> {
    client: C,
    config: RetryConfig,
    params: GenerationParams,
    interceptor: Option<Arc<dyn Interceptor>>,
}

impl<C: LowLevelClient> QuizService<C> {
    pub fn new(client: C, config: RetryConfig) -> Self {
        info!(max_attempts = config.max_attempts, backoff = ?config.backoff, "Creating new QuizService");
        Self {
            client,
            config,
            params: GenerationParams::default(),
            interceptor: None,
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// Record every model exchange through `interceptor`
    #[must_use]
    pub fn with_interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptor = Some(interceptor);
        self
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Get a reference to the retry configuration
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    pub fn params(&self) -> GenerationParams {
        self.params
    }

    /// Generate exactly [`QUIZ_LENGTH`] questions about `topic`.
    ///
    /// An attempt is accepted once at least `min_valid_questions` of the first
    /// five candidates pass validation; remaining slots come from the fallback
    /// bank. When every attempt fails the whole quiz is fallback content.
    #[instrument(skip(self), fields(max_attempts = self.config.max_attempts))]
    pub async fn generate_quiz(&self, topic: &str) -> QuizSet {
        let prompt = quiz_prompt(topic);
        let max_attempts = self.config.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            info!(attempt, max_attempts, "Requesting quiz questions");
            match self.attempt_quiz(topic, &prompt, attempt).await {
                Ok(valid) => {
                    info!(
                        attempt,
                        valid = valid.len(),
                        padded = QUIZ_LENGTH - valid.len(),
                        "Accepted model questions"
                    );
                    return QuizSet::assemble(valid, |slot| fallback_question(topic, slot));
                }
                Err(error) => {
                    warn!(attempt, %error, "Quiz attempt failed");
                    last_error = Some(error);
                }
            }

            if attempt < max_attempts {
                debug!(backoff = ?self.config.backoff, "Waiting before retry");
                sleep(self.config.backoff).await;
            }
        }

        warn!(
            last_error = %last_error.map(|e| e.to_string()).unwrap_or_default(),
            "All attempts failed, using fallback questions"
        );
        fallback_quiz(topic)
    }

    async fn attempt_quiz(
        &self,
        topic: &str,
        prompt: &str,
        attempt: usize,
    ) -> Result<Vec<Question>, GenerationError> {
        let raw = self.ask("quiz", topic, attempt, prompt).await?;
        let extraction = extract_candidates(&raw)?;

        // Only the first QUIZ_LENGTH candidates are considered, even if later ones are valid.
        let valid: Vec<Question> = extraction
            .candidates
            .iter()
            .take(QUIZ_LENGTH)
            .filter_map(|candidate| validate(candidate).ok())
            .collect();
        debug!(
            strategy = ?extraction.strategy,
            candidates = extraction.candidates.len(),
            valid = valid.len(),
            "Validated candidates"
        );

        let required = self.config.min_valid_questions.min(QUIZ_LENGTH);
        if valid.len() < required {
            return Err(GenerationError::Shortfall { valid: valid.len(), required });
        }
        Ok(valid)
    }

    /// Short encouraging summary of a finished quiz, at most 50 words.
    ///
    /// Makes a single model call; any failure or empty reply yields a templated
    /// sentence chosen by score percentage.
    #[instrument(skip(self, questions, answers))]
    pub async fn generate_feedback(
        &self,
        score: usize,
        total: usize,
        topic: &str,
        questions: &[Question],
        answers: &[Option<usize>],
    ) -> String {
        let prompt = feedback_prompt(score, total, topic, questions, answers);

        match self.ask("feedback", topic, 1, &prompt).await {
            Ok(raw) => match condense_feedback(&raw) {
                Some(feedback) => return feedback,
                None => warn!("Feedback response was empty after cleanup, using template"),
            },
            Err(error) => warn!(%error, "Feedback request failed, using template"),
        }

        template_feedback(score, total, topic)
    }

    async fn ask(&self, purpose: &str, topic: &str, attempt: usize, prompt: &str) -> Result<String, AIError> {
        let result = self
            .client
            .ask_raw(prompt.to_string(), self.params)
            .await
            .and_then(|text| {
                if text.trim().is_empty() {
                    Err(AIError::EmptyResponse)
                } else {
                    Ok(text)
                }
            });

        if let Some(interceptor) = &self.interceptor {
            let outcome = match &result {
                Ok(text) => Ok(text.clone()),
                Err(error) => Err(error.to_string()),
            };
            let exchange = Exchange {
                purpose,
                topic,
                attempt,
                prompt,
                outcome: outcome.as_deref().map_err(String::as_str),
            };
            if let Err(error) = interceptor.save(&exchange).await {
                warn!(%error, "Failed to record model exchange");
            }
        }

        result
    }
}
