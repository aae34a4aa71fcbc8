use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storage::repository::{CatalogRepository, ContentRepository, StorageError};
use tracing::info;

use lesson_core::model::{Catalog, CatalogError, LessonDraft, LessonMetadata, QuestionDraft, Slug};

use crate::error::AuthoringError;
use crate::Clock;

/// Admin secret used when none is configured.
pub const DEFAULT_ADMIN_SECRET: &str = "DEFAULT_ADMIN_KEY";

const PREVIEW_CHARS: usize = 15;

/// Lesson fields of an authoring payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadLesson {
    pub title: String,
    /// Derived from the title when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub summary: String,
    #[serde(default, alias = "quizJson")]
    pub quiz: Vec<QuestionDraft>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A new lesson as submitted for publishing: markdown plus catalog fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonPayload {
    pub markdown: String,
    pub lesson: PayloadLesson,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthoringOptions {
    /// Validate and plan without writing anything.
    pub dry_run: bool,
    /// Overwrite an existing markdown file for the new content path.
    pub force: bool,
}

/// What publishing did (or, for a dry run, would do).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthoringReport {
    pub lesson: LessonMetadata,
    pub dry_run: bool,
    /// Catalog backup taken before the rewrite, if the backend keeps one.
    pub backup: Option<String>,
}

/// Placeholder quiz for freshly written content.
///
/// Stands in for a real question generator: two fixed questions that only
/// echo the start and the length of the markdown.
#[must_use]
pub fn generate_quiz(markdown: &str) -> Vec<QuestionDraft> {
    let preview: String = markdown.chars().take(PREVIEW_CHARS).collect();
    vec![
        QuestionDraft {
            id: 1,
            question: format!("AI-Generated Q1 based on {preview}..."),
            options: vec!["Option A".into(), "Option B (Correct)".into()],
            correct_answer_index: 1,
        },
        QuestionDraft {
            id: 2,
            question: format!(
                "AI-Generated Q2 based on content length: {}",
                markdown.chars().count()
            ),
            options: vec!["True".into(), "False".into()],
            correct_answer_index: 0,
        },
    ]
}

/// Publishes new lessons: markdown to the content store, entry to the catalog.
#[derive(Clone)]
pub struct AuthoringService {
    clock: Clock,
    admin_secret: String,
    catalog: Arc<dyn CatalogRepository>,
    content: Arc<dyn ContentRepository>,
}

impl AuthoringService {
    #[must_use]
    pub fn new(
        clock: Clock,
        admin_secret: impl Into<String>,
        catalog: Arc<dyn CatalogRepository>,
        content: Arc<dyn ContentRepository>,
    ) -> Self {
        Self {
            clock,
            admin_secret: admin_secret.into(),
            catalog,
            content,
        }
    }

    /// # Errors
    ///
    /// Returns `AuthoringError::Unauthorized` unless `key` matches the
    /// configured secret. An empty secret admits no one.
    pub fn authorize(&self, key: &str) -> Result<(), AuthoringError> {
        if self.admin_secret.is_empty() || key != self.admin_secret {
            return Err(AuthoringError::Unauthorized);
        }
        Ok(())
    }

    /// Validate `payload` and append it to the catalog as a new lesson.
    ///
    /// The id is one past the largest existing id and the content path is
    /// `<id>-<slug>.md`. Markdown is written before the catalog so a catalog
    /// entry never points at missing content.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError` for a bad key, an invalid payload, a slug
    /// already in the catalog, an existing content file without `force`, or
    /// storage failures.
    pub async fn publish(
        &self,
        key: &str,
        payload: LessonPayload,
        options: AuthoringOptions,
    ) -> Result<AuthoringReport, AuthoringError> {
        self.authorize(key)?;
        if payload.markdown.trim().is_empty() {
            return Err(AuthoringError::EmptyField("markdown"));
        }

        let now = self.clock.now();
        let catalog = self.load_catalog(now).await?;

        let PayloadLesson {
            title,
            slug,
            summary,
            quiz,
            created_at,
        } = payload.lesson;
        if title.trim().is_empty() {
            return Err(AuthoringError::EmptyField("lesson.title"));
        }
        let slug = match slug {
            Some(raw) if !raw.trim().is_empty() => Slug::parse(raw)?,
            _ => Slug::from_title(&title)?,
        };
        if catalog.contains_slug(slug.as_str()) {
            return Err(CatalogError::DuplicateSlug(slug.to_string()).into());
        }

        let id = catalog.next_id();
        let draft = LessonDraft {
            id: id.value(),
            title,
            slug: slug.to_string(),
            summary,
            content_path: format!("{id}-{slug}.md"),
            created_at: Some(created_at.unwrap_or(now)),
            quiz,
        };
        let lesson = draft.validate(now)?;
        let updated = catalog.with_lesson(lesson.clone())?;

        if options.dry_run {
            let path = lesson.content_path();
            if !options.force && self.content.content_exists(path).await? {
                return Err(StorageError::Conflict(format!("content already exists: {path}")).into());
            }
            info!(lesson_id = id.value(), %slug, path = lesson.content_path(), "dry run; nothing written");
            return Ok(AuthoringReport {
                lesson,
                dry_run: true,
                backup: None,
            });
        }

        self.content
            .write_content(lesson.content_path(), &payload.markdown, options.force)
            .await?;
        let backup = self.catalog.save_catalog(&updated.to_drafts()).await?;
        info!(lesson_id = id.value(), %slug, path = lesson.content_path(), "lesson published");

        Ok(AuthoringReport {
            lesson,
            dry_run: false,
            backup,
        })
    }

    async fn load_catalog(&self, now: DateTime<Utc>) -> Result<Catalog, AuthoringError> {
        let drafts = match self.catalog.load_catalog().await {
            Ok(drafts) => drafts,
            Err(StorageError::NotFound) => Vec::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Catalog::from_drafts(drafts, now)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_quiz_echoes_content() {
        let quiz = generate_quiz("Clarity is a decidable language.");
        assert_eq!(quiz.len(), 2);
        assert_eq!(quiz[0].question, "AI-Generated Q1 based on Clarity is a de...");
        assert_eq!(quiz[0].correct_answer_index, 1);
        assert_eq!(quiz[1].question, "AI-Generated Q2 based on content length: 32");
        assert_eq!(quiz[1].options, vec!["True".to_owned(), "False".to_owned()]);
    }

    #[test]
    fn payload_accepts_quiz_json_alias() {
        let raw = serde_json::json!({
            "markdown": "## One\nbody",
            "lesson": {
                "title": "Intro to Clarity",
                "summary": "Smart contracts",
                "quizJson": [
                    { "id": 1, "question": "Q", "options": ["a", "b"], "correctAnswerIndex": 0 }
                ]
            }
        });
        let payload: LessonPayload = serde_json::from_value(raw).unwrap();
        assert_eq!(payload.lesson.slug, None);
        assert_eq!(payload.lesson.quiz.len(), 1);
    }
}
