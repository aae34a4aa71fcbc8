use std::collections::HashSet;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::LessonId;
use crate::model::lesson::{LessonDraft, LessonError, LessonMetadata};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("lesson id {0} appears more than once in the catalog")]
    DuplicateId(LessonId),

    #[error("a lesson with slug \"{0}\" already exists in the catalog")]
    DuplicateSlug(String),

    #[error("lessons[{index}]: {source}")]
    Lesson {
        index: usize,
        #[source]
        source: LessonError,
    },
}

/// Ordered, read-only collection of lessons with unique ids and slugs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    lessons: Vec<LessonMetadata>,
}

impl Catalog {
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` or `CatalogError::DuplicateSlug`.
    pub fn new(lessons: Vec<LessonMetadata>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::with_capacity(lessons.len());
        let mut slugs = HashSet::with_capacity(lessons.len());
        for lesson in &lessons {
            if !ids.insert(lesson.id()) {
                return Err(CatalogError::DuplicateId(lesson.id()));
            }
            if !slugs.insert(lesson.slug().as_str()) {
                return Err(CatalogError::DuplicateSlug(lesson.slug().to_string()));
            }
        }
        Ok(Self { lessons })
    }

    /// Validate every draft, then the catalog-wide uniqueness rules.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Lesson` with the offending position, or a
    /// uniqueness error.
    pub fn from_drafts(drafts: Vec<LessonDraft>, now: DateTime<Utc>) -> Result<Self, CatalogError> {
        let lessons = drafts
            .into_iter()
            .enumerate()
            .map(|(index, draft)| {
                draft
                    .validate(now)
                    .map_err(|source| CatalogError::Lesson { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(lessons)
    }

    /// Resolve a slug to its lesson.
    ///
    /// Exact, case-sensitive match; the catalog is small so this is a linear scan.
    #[must_use]
    pub fn lookup(&self, slug: &str) -> Option<&LessonMetadata> {
        self.lessons.iter().find(|lesson| lesson.slug().as_str() == slug)
    }

    #[must_use]
    pub fn get(&self, id: LessonId) -> Option<&LessonMetadata> {
        self.lessons.iter().find(|lesson| lesson.id() == id)
    }

    #[must_use]
    pub fn contains_slug(&self, slug: &str) -> bool {
        self.lookup(slug).is_some()
    }

    #[must_use]
    pub fn lessons(&self) -> &[LessonMetadata] {
        &self.lessons
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    /// Id for the next appended lesson: one past the largest id, or 1.
    #[must_use]
    pub fn next_id(&self) -> LessonId {
        self.lessons
            .iter()
            .map(LessonMetadata::id)
            .max()
            .map_or(LessonId::new(1), |max| max.next())
    }

    /// Returns a new catalog with `lesson` appended at the end.
    ///
    /// # Errors
    ///
    /// Returns a uniqueness error if the id or slug is already taken.
    pub fn with_lesson(&self, lesson: LessonMetadata) -> Result<Self, CatalogError> {
        if self.contains_slug(lesson.slug().as_str()) {
            return Err(CatalogError::DuplicateSlug(lesson.slug().to_string()));
        }
        if self.get(lesson.id()).is_some() {
            return Err(CatalogError::DuplicateId(lesson.id()));
        }
        let mut lessons = self.lessons.clone();
        lessons.push(lesson);
        Ok(Self { lessons })
    }

    #[must_use]
    pub fn to_drafts(&self) -> Vec<LessonDraft> {
        self.lessons.iter().map(LessonMetadata::to_draft).collect()
    }
}
