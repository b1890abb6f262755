//! Prompt, post-processing and templates for the post-quiz summary.

use crate::quiz::{Question, QUIZ_LENGTH};

/// Longest feedback returned, in whitespace-separated words.
pub const FEEDBACK_WORD_LIMIT: usize = 50;

/// Score bands used to pick the templated fallback text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackBracket {
    Excellent,
    Good,
    NiceTry,
    KeepGoing,
}

impl FeedbackBracket {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            Self::Excellent
        } else if percentage >= 60.0 {
            Self::Good
        } else if percentage >= 40.0 {
            Self::NiceTry
        } else {
            Self::KeepGoing
        }
    }

    pub fn message(self, topic: &str) -> String {
        match self {
            Self::Excellent => format!("Excellent! You really know your {topic}."),
            Self::Good => format!("Good job! Solid understanding of {topic}."),
            Self::NiceTry => format!("Nice try! Keep learning about {topic}."),
            Self::KeepGoing => format!("Keep going! {topic} takes practice."),
        }
    }
}

/// Score as a percentage; a zero total counts as 0%.
pub fn percentage(score: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        score as f64 / total as f64 * 100.0
    }
}

pub fn template_feedback(score: usize, total: usize, topic: &str) -> String {
    FeedbackBracket::from_percentage(percentage(score, total)).message(topic)
}

pub(crate) fn feedback_prompt(
    score: usize,
    total: usize,
    topic: &str,
    questions: &[Question],
    answers: &[Option<usize>],
) -> String {
    let missed: Vec<&str> = questions
        .iter()
        .take(QUIZ_LENGTH)
        .enumerate()
        .filter(|(i, q)| !q.is_correct(answers.get(*i).copied().flatten()))
        .map(|(_, q)| q.question.as_str())
        .collect();

    let mut prompt = format!("Score: {score}/{total} on {topic} quiz.\n");
    if !missed.is_empty() {
        prompt.push_str(&format!("Missed questions: {}\n", missed.join(" | ")));
    }
    prompt.push_str(&format!(
        "Write short encouraging sentences (max {FEEDBACK_WORD_LIMIT} words). No emojis."
    ));
    prompt
}

/// Strip surrounding quotes and whitespace and keep the first
/// [`FEEDBACK_WORD_LIMIT`] words. `None` when nothing is left.
pub fn condense_feedback(raw: &str) -> Option<String> {
    let words: Vec<&str> = raw
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'')
        .split_whitespace()
        .take(FEEDBACK_WORD_LIMIT)
        .collect();

    (!words.is_empty()).then(|| words.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_edges() {
        assert_eq!(FeedbackBracket::from_percentage(80.0), FeedbackBracket::Excellent);
        assert_eq!(FeedbackBracket::from_percentage(79.9), FeedbackBracket::Good);
        assert_eq!(FeedbackBracket::from_percentage(40.0), FeedbackBracket::NiceTry);
        assert_eq!(FeedbackBracket::from_percentage(0.0), FeedbackBracket::KeepGoing);
    }

    #[test]
    fn zero_total_is_zero_percent() {
        assert_eq!(percentage(3, 0), 0.0);
        assert_eq!(template_feedback(0, 0, "Pop Culture"), "Keep going! Pop Culture takes practice.");
    }

    #[test]
    fn condense_strips_quotes_and_collapses_whitespace() {
        assert_eq!(condense_feedback("  \"Great   work,\n well done!\" ").as_deref(), Some("Great work, well done!"));
        assert_eq!(condense_feedback(" '\"\"' "), None);
    }
}
