use std::sync::Arc;

use lesson_core::model::{Catalog, Slug};
use lesson_core::quiz::QuizOutcome;
use storage::repository::{ContentRepository, StorageError};
use tracing::{debug, info, warn};

use super::service::LessonSession;
use crate::completion_store::CompletionStore;

/// Shown instead of the lesson when its markdown file is missing.
pub const CONTENT_NOT_FOUND: &str = "# Error: Content File Not Found";
/// Shown instead of the lesson when its markdown cannot be read or is blank.
pub const CONTENT_UNAVAILABLE: &str = "# Error: Content Failed to Load or is Empty";

/// Where the front end should go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationIntent {
    /// The lesson listing (dashboard).
    Listing,
    Lesson(Slug),
}

/// Result of asking for a lesson by slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonOpen {
    Session(Box<LessonSession>),
    /// The slug is unknown; nothing was opened.
    Redirect(NavigationIntent),
}

/// Outcome of a submitted quiz, plus what happened to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResult {
    pub outcome: QuizOutcome,
    /// True only when this submission recorded the lesson as completed.
    pub newly_completed: bool,
}

/// Opens lessons and persists completion after a passing quiz.
#[derive(Clone)]
pub struct LessonLoopService {
    catalog: Arc<Catalog>,
    content: Arc<dyn ContentRepository>,
    completions: Arc<CompletionStore>,
}

impl LessonLoopService {
    #[must_use]
    pub fn new(
        catalog: Arc<Catalog>,
        content: Arc<dyn ContentRepository>,
        completions: Arc<CompletionStore>,
    ) -> Self {
        Self {
            catalog,
            content,
            completions,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Open the lesson with `slug`.
    ///
    /// Unknown slugs redirect to the listing. Content failures never abort:
    /// the session shows an error placeholder instead of slides.
    pub async fn open_lesson(&self, slug: &str) -> LessonOpen {
        let Some(lesson) = self.catalog.lookup(slug) else {
            debug!(%slug, "unknown lesson slug; redirecting to listing");
            return LessonOpen::Redirect(NavigationIntent::Listing);
        };

        let markdown = match self.content.read_content(lesson.content_path()).await {
            Ok(markdown) if !markdown.trim().is_empty() => markdown,
            Ok(_) => {
                warn!(path = lesson.content_path(), "lesson content is empty");
                CONTENT_UNAVAILABLE.to_owned()
            }
            Err(StorageError::NotFound) => {
                warn!(path = lesson.content_path(), "lesson content file not found");
                CONTENT_NOT_FOUND.to_owned()
            }
            Err(err) => {
                warn!(path = lesson.content_path(), error = %err, "lesson content failed to load");
                CONTENT_UNAVAILABLE.to_owned()
            }
        };

        let completed = self.completions.reload().await.contains(lesson.id());
        let session = LessonSession::new(lesson.clone(), markdown, completed);
        debug!(
            %slug,
            slides = session.deck().map_or(0, |deck| deck.len()),
            completed,
            "lesson opened"
        );
        LessonOpen::Session(Box::new(session))
    }

    /// Submit the quiz and record completion on a pass.
    ///
    /// Returns `None` when the quiz cannot be submitted yet. A failed
    /// completion write is logged and the in-session result still stands.
    pub async fn submit(&self, session: &mut LessonSession) -> Option<SubmitResult> {
        let outcome = session.submit_quiz()?;
        let lesson_id = session.lesson().id();
        info!(
            lesson_id = lesson_id.value(),
            score = outcome.score,
            total = outcome.total,
            passed = outcome.passed(),
            "quiz submitted"
        );

        let mut newly_completed = false;
        if outcome.passed() {
            match self.completions.mark_completed(lesson_id).await {
                Ok(added) => {
                    newly_completed = added;
                    session.set_completed();
                }
                Err(err) => {
                    warn!(lesson_id = lesson_id.value(), error = %err, "failed to record completion");
                }
            }
        }

        Some(SubmitResult {
            outcome,
            newly_completed,
        })
    }

    /// Leave the lesson for the listing.
    #[must_use]
    pub fn exit(&self) -> NavigationIntent {
        NavigationIntent::Listing
    }
}
