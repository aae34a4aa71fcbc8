use std::sync::Arc;

use lesson_core::model::{Catalog, LessonId, LessonMetadata, Slug};
use storage::repository::{CatalogRepository, StorageError};
use tracing::{debug, warn};

use crate::completion_store::CompletionStore;
use crate::error::CatalogServiceError;
use crate::Clock;

/// Row shown on the lesson dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonListItem {
    pub id: LessonId,
    pub slug: Slug,
    pub title: String,
    pub summary: String,
    pub question_count: usize,
    pub completed: bool,
}

impl LessonListItem {
    #[must_use]
    pub fn from_lesson(lesson: &LessonMetadata, completed: bool) -> Self {
        Self {
            id: lesson.id(),
            slug: lesson.slug().clone(),
            title: lesson.title().to_owned(),
            summary: lesson.summary().to_owned(),
            question_count: lesson.question_count(),
            completed,
        }
    }
}

/// Loads and validates the lesson catalog.
#[derive(Clone)]
pub struct CatalogService {
    clock: Clock,
    repo: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn CatalogRepository>) -> Self {
        Self { clock, repo }
    }

    /// Load the catalog from storage.
    ///
    /// A catalog that does not exist yet is treated as empty.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError` for unreadable or invalid catalog data.
    pub async fn load(&self) -> Result<Catalog, CatalogServiceError> {
        let drafts = match self.repo.load_catalog().await {
            Ok(drafts) => drafts,
            Err(StorageError::NotFound) => {
                warn!("lesson catalog not found; starting with no lessons");
                Vec::new()
            }
            Err(err) => return Err(err.into()),
        };
        let catalog = Catalog::from_drafts(drafts, self.clock.now())?;
        debug!(lessons = catalog.len(), "lesson catalog loaded");
        Ok(catalog)
    }

    /// Dashboard rows in catalog order, flagged with completion state.
    #[must_use]
    pub fn listing(catalog: &Catalog, completions: &CompletionStore) -> Vec<LessonListItem> {
        catalog
            .lessons()
            .iter()
            .map(|lesson| LessonListItem::from_lesson(lesson, completions.is_completed(lesson.id())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::model::{LessonDraft, QuestionDraft};
    use lesson_core::time::fixed_clock;
    use storage::{InMemoryRepository, KeyValueStore};

    fn draft(id: u64, slug: &str) -> LessonDraft {
        LessonDraft {
            id,
            title: format!("Lesson {id}"),
            slug: slug.into(),
            summary: "Summary".into(),
            content_path: format!("{id}-{slug}.md"),
            created_at: None,
            quiz: vec![QuestionDraft {
                id: 1,
                question: "Q".into(),
                options: vec!["a".into(), "b".into()],
                correct_answer_index: 1,
            }],
        }
    }

    #[tokio::test]
    async fn load_validates_and_keeps_order() {
        let repo = InMemoryRepository::new().with_catalog(vec![draft(3, "c"), draft(1, "a")]);
        let service = CatalogService::new(fixed_clock(), Arc::new(repo));
        let catalog = service.load().await.unwrap();
        let ids: Vec<u64> = catalog.lessons().iter().map(|l| l.id().value()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[tokio::test]
    async fn load_rejects_duplicate_slugs() {
        let repo = InMemoryRepository::new().with_catalog(vec![draft(1, "a"), draft(2, "a")]);
        let service = CatalogService::new(fixed_clock(), Arc::new(repo));
        assert!(matches!(
            service.load().await,
            Err(CatalogServiceError::Catalog(_))
        ));
    }

    #[tokio::test]
    async fn listing_flags_completed_lessons() {
        let repo = InMemoryRepository::new().with_catalog(vec![draft(1, "a"), draft(2, "b")]);
        repo.put_value("completed_lessons", "[2]").await.unwrap();
        let service = CatalogService::new(fixed_clock(), Arc::new(repo.clone()));
        let catalog = service.load().await.unwrap();
        let completions = CompletionStore::load(Arc::new(repo), "completed_lessons").await;

        let items = CatalogService::listing(&catalog, &completions);
        assert_eq!(items.len(), 2);
        assert!(!items[0].completed);
        assert!(items[1].completed);
        assert_eq!(items[1].slug.as_str(), "b");
        assert_eq!(items[1].question_count, 1);
    }
}
