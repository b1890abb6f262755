//! Recover a list of question candidates from free-form model output.
//!
//! Model text is untrusted: it may be bare JSON, JSON wrapped in markdown
//! fences, or JSON buried in prose. Recognition runs an ordered chain of
//! [`Strategy`] values and the first one that yields a question list wins.

use crate::error::ExtractionError;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::{debug, instrument, trace};

static FENCED_JSON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json\s*([\s\S]*?)\s*```").expect("fenced json regex is invalid"));
static FENCED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```\s*([\s\S]*?)\s*```").expect("fenced block regex is invalid"));
static BRACKET_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[\s\S]*\]").expect("bracket span regex is invalid"));
static BRACE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").expect("brace span regex is invalid"));

/// An unvalidated question record. Any field may be missing or malformed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuestionCandidate {
    pub id: usize,
    pub question: Option<String>,
    /// `None` when the model sent something other than an array
    pub options: Option<Vec<String>>,
    /// Raw value of `correct_index` (or `correctIndex`)
    pub correct_index: Option<Value>,
}

impl QuestionCandidate {
    fn from_object(position: usize, obj: &Map<String, Value>) -> Self {
        let id = obj
            .get("id")
            .and_then(Value::as_u64)
            .and_then(|id| usize::try_from(id).ok())
            .unwrap_or(position);
        let question = obj.get("question").and_then(Value::as_str).map(str::to_owned);
        let options = obj.get("options").and_then(Value::as_array).map(|items| {
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        });
        let correct_index = obj
            .get("correct_index")
            .or_else(|| obj.get("correctIndex"))
            .cloned();

        Self { id, question, options, correct_index }
    }
}

/// One recognition technique, tried in [`Strategy::ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The whole trimmed text is JSON
    Direct,
    /// ```` ```json ```` fenced blocks
    FencedJson,
    /// Any fenced code block
    FencedBlock,
    /// Widest `[...]` span
    BracketSpan,
    /// Widest `{...}` span
    BraceSpan,
}

impl Strategy {
    pub const ORDER: [Strategy; 5] = [
        Strategy::Direct,
        Strategy::FencedJson,
        Strategy::FencedBlock,
        Strategy::BracketSpan,
        Strategy::BraceSpan,
    ];

    fn pattern(self) -> Option<&'static Regex> {
        match self {
            Strategy::Direct => None,
            Strategy::FencedJson => Some(&*FENCED_JSON),
            Strategy::FencedBlock => Some(&*FENCED_BLOCK),
            Strategy::BracketSpan => Some(&*BRACKET_SPAN),
            Strategy::BraceSpan => Some(&*BRACE_SPAN),
        }
    }

    /// Run this strategy over `text`, returning the raw question items on success.
    fn attempt(self, text: &str) -> Option<Vec<Value>> {
        let Some(pattern) = self.pattern() else {
            return match serde_json::from_str::<Value>(text.trim()).ok()? {
                Value::Array(items) if !items.is_empty() => Some(items),
                other => questions_field(other),
            };
        };

        pattern.captures_iter(text).find_map(|caps| {
            let fragment = caps.get(1).or_else(|| caps.get(0))?.as_str();
            let parsed = parse_fragment(fragment);
            if parsed.is_none() {
                trace!(strategy = ?self, fragment_len = fragment.len(), "fragment did not parse");
            }
            parsed
        })
    }
}

/// Parse one textual match. A leading `[` means a question array; anything
/// else is cut to its outermost braces and must carry a `questions` array.
fn parse_fragment(fragment: &str) -> Option<Vec<Value>> {
    let fragment = fragment.trim();
    if fragment.starts_with('[') {
        let end = fragment.rfind(']').map_or(fragment.len(), |i| i + 1);
        return match serde_json::from_str::<Value>(&fragment[..end]).ok()? {
            Value::Array(items) if !items.is_empty() => Some(items),
            _ => None,
        };
    }

    let fragment = &fragment[fragment.find('{').unwrap_or(0)..];
    let end = fragment.rfind('}').map_or(fragment.len(), |i| i + 1);
    questions_field(serde_json::from_str::<Value>(&fragment[..end]).ok()?)
}

fn questions_field(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Object(mut obj) => match obj.remove("questions") {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        },
        _ => None,
    }
}

/// Normalize raw items into candidates. Non-object items are skipped; ids
/// default to the item's 1-based position in the extracted list.
fn normalize(items: &[Value]) -> Vec<QuestionCandidate> {
    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| item.as_object().map(|obj| QuestionCandidate::from_object(i + 1, obj)))
        .collect()
}

/// Candidates recovered from one response, with the strategy that found them.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub strategy: Strategy,
    pub candidates: Vec<QuestionCandidate>,
}

/// Try every strategy in order and return the first question list found.
#[instrument(skip(text), fields(text_len = text.len()))]
pub fn extract_candidates(text: &str) -> Result<Extraction, ExtractionError> {
    for strategy in Strategy::ORDER {
        if let Some(items) = strategy.attempt(text) {
            let candidates = normalize(&items);
            debug!(?strategy, candidates = candidates.len(), "extraction succeeded");
            return Ok(Extraction { strategy, candidates });
        }
        trace!(?strategy, "strategy found nothing");
    }

    debug!("all extraction strategies failed");
    Err(ExtractionError::NoStructure)
}
