use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{LessonId, QuestionId};
use crate::model::question::{QuestionDraft, QuestionError, QuizQuestion};
use crate::model::slug::{Slug, SlugError};
use crate::model::text::{SummaryText, TitleText};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson title must not be empty")]
    EmptyTitle,

    #[error("lesson summary must not be empty")]
    EmptySummary,

    #[error("lesson content path must not be empty")]
    EmptyContentPath,

    #[error(transparent)]
    Slug(#[from] SlugError),

    #[error("quiz[{index}]: {source}")]
    Question {
        index: usize,
        #[source]
        source: QuestionError,
    },

    #[error("question id {0} appears more than once in the quiz")]
    DuplicateQuestionId(QuestionId),
}

/// Serialized shape of a lesson entry in the catalog file.
///
/// `created_at` may be omitted by hand-written entries; validation fills it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonDraft {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub content_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "quizJson")]
    pub quiz: Vec<QuestionDraft>,
}

impl LessonDraft {
    /// Validate the draft into an immutable `LessonMetadata`.
    ///
    /// `now` is used when the draft carries no `created_at`.
    ///
    /// # Errors
    ///
    /// Returns `LessonError` for blank fields, malformed slugs or invalid questions.
    pub fn validate(self, now: DateTime<Utc>) -> Result<LessonMetadata, LessonError> {
        let title = TitleText::parse(self.title).map_err(|_| LessonError::EmptyTitle)?;
        let summary = SummaryText::parse(self.summary).map_err(|_| LessonError::EmptySummary)?;
        let slug = Slug::parse(self.slug)?;
        if self.content_path.trim().is_empty() {
            return Err(LessonError::EmptyContentPath);
        }

        let mut seen = HashSet::with_capacity(self.quiz.len());
        let mut quiz = Vec::with_capacity(self.quiz.len());
        for (index, draft) in self.quiz.into_iter().enumerate() {
            let question = draft
                .validate()
                .map_err(|source| LessonError::Question { index, source })?;
            if !seen.insert(question.id()) {
                return Err(LessonError::DuplicateQuestionId(question.id()));
            }
            quiz.push(question);
        }

        Ok(LessonMetadata {
            id: LessonId::new(self.id),
            slug,
            title,
            summary,
            content_path: self.content_path,
            created_at: self.created_at.unwrap_or(now),
            quiz,
        })
    }
}

/// Static description of a lesson and its quiz. Read-only at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonMetadata {
    id: LessonId,
    slug: Slug,
    title: TitleText,
    summary: SummaryText,
    content_path: String,
    created_at: DateTime<Utc>,
    quiz: Vec<QuizQuestion>,
}

impl LessonMetadata {
    #[must_use]
    pub fn id(&self) -> LessonId {
        self.id
    }

    #[must_use]
    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        self.summary.as_str()
    }

    /// Markdown file name, relative to the content directory.
    #[must_use]
    pub fn content_path(&self) -> &str {
        &self.content_path
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Quiz questions in display order.
    #[must_use]
    pub fn quiz(&self) -> &[QuizQuestion] {
        &self.quiz
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.quiz.len()
    }

    #[must_use]
    pub fn to_draft(&self) -> LessonDraft {
        LessonDraft {
            id: self.id.value(),
            title: self.title.as_str().to_owned(),
            slug: self.slug.as_str().to_owned(),
            summary: self.summary.as_str().to_owned(),
            content_path: self.content_path.clone(),
            created_at: Some(self.created_at),
            quiz: self.quiz.iter().map(QuizQuestion::to_draft).collect(),
        }
    }
}
