use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::text::PromptText;

/// Every question offers at least this many options.
pub const MIN_OPTIONS: usize = 2;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text must not be empty")]
    EmptyPrompt,

    #[error("question must offer at least 2 options, got {len}")]
    TooFewOptions { len: usize },

    #[error("correct answer index {index} is not a valid index into {len} options")]
    CorrectAnswerOutOfRange { index: usize, len: usize },
}

/// Serialized shape of a quiz question as it appears in the catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub id: u64,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer_index: usize,
}

impl QuestionDraft {
    /// # Errors
    ///
    /// Returns `QuestionError` if the draft violates a question invariant.
    pub fn validate(self) -> Result<QuizQuestion, QuestionError> {
        QuizQuestion::new(
            QuestionId::new(self.id),
            &self.question,
            self.options,
            self.correct_answer_index,
        )
    }
}

/// A validated multiple-choice question with exactly one correct option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    id: QuestionId,
    prompt: PromptText,
    options: Vec<String>,
    correct_answer_index: usize,
}

impl QuizQuestion {
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt`, `QuestionError::TooFewOptions` or
    /// `QuestionError::CorrectAnswerOutOfRange`.
    pub fn new(
        id: QuestionId,
        prompt: &str,
        options: Vec<String>,
        correct_answer_index: usize,
    ) -> Result<Self, QuestionError> {
        let prompt = PromptText::parse(prompt).map_err(|_| QuestionError::EmptyPrompt)?;
        if options.len() < MIN_OPTIONS {
            return Err(QuestionError::TooFewOptions { len: options.len() });
        }
        if correct_answer_index >= options.len() {
            return Err(QuestionError::CorrectAnswerOutOfRange {
                index: correct_answer_index,
                len: options.len(),
            });
        }
        Ok(Self {
            id,
            prompt,
            options,
            correct_answer_index,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        self.prompt.as_str()
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn correct_answer_index(&self) -> usize {
        self.correct_answer_index
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_answer_index]
    }

    #[must_use]
    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.correct_answer_index
    }

    #[must_use]
    pub fn to_draft(&self) -> QuestionDraft {
        QuestionDraft {
            id: self.id.value(),
            question: self.prompt.as_str().to_owned(),
            options: self.options.clone(),
            correct_answer_index: self.correct_answer_index,
        }
    }
}

/// Letter shown next to an option (`0 -> 'A'`, `1 -> 'B'`, ...).
///
/// Falls back to `'?'` past `'Z'`.
#[must_use]
pub fn option_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map_or('?', |i| char::from(b'A' + i))
}
