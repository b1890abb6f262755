//! Structural and quality rules a candidate must pass to enter a quiz.

use crate::parser::QuestionCandidate;
use crate::quiz::{Question, OPTION_COUNT};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Shortest acceptable question text, in characters after trimming.
pub const MIN_QUESTION_CHARS: usize = 15;

/// Options this short (after trimming) are placeholders like "A" or "B)".
const PLACEHOLDER_OPTION_CHARS: usize = 2;

/// Case-insensitive substrings that mark generic or meta questions.
pub const LOW_QUALITY_PATTERNS: &[&str] = &[
    "abbreviation for",
    "acronym for",
    "what does the word",
    "spell ",
    "how do you spell",
    "define the word",
    "synonym for",
    "antonym for",
    "q1",
    "q2",
    "q3",
    "q4",
    "q5",
    "question text",
    "your question",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("question text is missing")]
    MissingQuestion,
    #[error("question text is too short ({0} chars)")]
    TooShort(usize),
    #[error("question matches low quality pattern {0:?}")]
    LowQuality(&'static str),
    #[error("options are missing")]
    MissingOptions,
    #[error("expected 4 options, got {0}")]
    WrongOptionCount(usize),
    #[error("every option is a placeholder")]
    PlaceholderOptions,
    #[error("correct index is missing")]
    MissingCorrectIndex,
    #[error("correct index {0} is not an integer in 0..=3")]
    InvalidCorrectIndex(String),
}

/// Check a candidate against every rule, returning the accepted question or
/// the first rule it breaks. Pure: the same candidate always gets the same verdict.
pub fn validate(candidate: &QuestionCandidate) -> Result<Question, Rejection> {
    let verdict = check(candidate);
    if let Err(reason) = &verdict {
        debug!(id = candidate.id, %reason, "rejected candidate");
    }
    verdict
}

pub fn is_valid(candidate: &QuestionCandidate) -> bool {
    check(candidate).is_ok()
}

fn check(candidate: &QuestionCandidate) -> Result<Question, Rejection> {
    let text = match candidate.question.as_deref() {
        None | Some("") => return Err(Rejection::MissingQuestion),
        Some(text) => text.trim(),
    };

    let len = text.chars().count();
    if len < MIN_QUESTION_CHARS {
        return Err(Rejection::TooShort(len));
    }

    let lower = text.to_lowercase();
    if let Some(pattern) = LOW_QUALITY_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(Rejection::LowQuality(*pattern));
    }

    let options = candidate.options.as_ref().ok_or(Rejection::MissingOptions)?;
    if options.len() != OPTION_COUNT {
        return Err(Rejection::WrongOptionCount(options.len()));
    }
    if options
        .iter()
        .all(|opt| opt.trim().chars().count() <= PLACEHOLDER_OPTION_CHARS)
    {
        return Err(Rejection::PlaceholderOptions);
    }

    let raw_index = candidate
        .correct_index
        .as_ref()
        .filter(|v| !v.is_null())
        .ok_or(Rejection::MissingCorrectIndex)?;
    let correct_index = parse_index(raw_index)
        .and_then(|i| usize::try_from(i).ok())
        .filter(|i| *i < OPTION_COUNT)
        .ok_or_else(|| Rejection::InvalidCorrectIndex(raw_index.to_string()))?;

    let options: [String; OPTION_COUNT] = options
        .iter()
        .map(|opt| opt.trim().to_owned())
        .collect::<Vec<_>>()
        .try_into()
        .map_err(|v: Vec<String>| Rejection::WrongOptionCount(v.len()))?;

    Ok(Question {
        id: candidate.id,
        question: text.to_owned(),
        options,
        correct_index,
    })
}

/// Integers, integral floats and numeric strings count. Booleans and fractional
/// floats are rejected rather than coerced, so `true` or `1.5` never becomes index 1.
fn parse_index(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
