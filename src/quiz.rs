//! Quiz records handed to the surrounding application.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Number of questions in every quiz.
pub const QUIZ_LENGTH: usize = 5;
/// Number of answer options per question.
pub const OPTION_COUNT: usize = 4;

/// A multiple-choice question that passed validation or came from the fallback bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Question {
    /// 1-based slot in the quiz
    pub id: usize,
    /// Question text
    pub question: String,
    /// Answer options in display order
    pub options: [String; OPTION_COUNT],
    /// Index into `options` of the correct answer
    #[schemars(range(max = 3))]
    pub correct_index: usize,
}

impl Question {
    pub(crate) fn with_id(mut self, id: usize) -> Self {
        self.id = id;
        self
    }

    pub fn is_correct(&self, answer: Option<usize>) -> bool {
        answer == Some(self.correct_index)
    }
}

/// Exactly [`QUIZ_LENGTH`] questions, numbered 1..=5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct QuizSet([Question; QUIZ_LENGTH]);

impl QuizSet {
    /// Fill slots 1..=5 from `questions` in order, asking `fill` for any slot left empty.
    /// Extra questions are dropped and ids are rewritten to the slot number.
    pub fn assemble<I, F>(questions: I, mut fill: F) -> Self
    where
        I: IntoIterator<Item = Question>,
        F: FnMut(usize) -> Question,
    {
        let mut questions = questions.into_iter();
        Self(std::array::from_fn(|i| {
            let slot = i + 1;
            questions
                .next()
                .unwrap_or_else(|| fill(slot))
                .with_id(slot)
        }))
    }

    pub fn questions(&self) -> &[Question] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        QUIZ_LENGTH
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Count answers matching the correct option. Unanswered and missing entries are wrong.
    pub fn score(&self, answers: &[Option<usize>]) -> usize {
        self.iter()
            .enumerate()
            .filter(|(i, q)| q.is_correct(answers.get(*i).copied().flatten()))
            .count()
    }
}

impl<'a> IntoIterator for &'a QuizSet {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
