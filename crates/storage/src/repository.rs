use async_trait::async_trait;
use lesson_core::model::LessonDraft;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            return StorageError::NotFound;
        }
        StorageError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Durable string key-value storage scoped to the local client.
///
/// `put_value` replaces the whole value for a key in one step; readers never
/// observe a partially written value.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_value(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    async fn put_value(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Source of the lesson catalog.
///
/// Entries come back unvalidated; the services layer turns them into a `Catalog`.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Load every catalog entry in display order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` when no catalog exists, or
    /// `StorageError::Serialization` for malformed data.
    async fn load_catalog(&self) -> Result<Vec<LessonDraft>, StorageError>;

    /// Replace the catalog with `lessons`.
    ///
    /// Returns the location of the backup taken before the rewrite, if the
    /// backend keeps one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be written.
    async fn save_catalog(&self, lessons: &[LessonDraft]) -> Result<Option<String>, StorageError>;
}

/// Lesson markdown keyed by the lesson's content path.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Read the raw markdown at `path`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if nothing is stored at `path`.
    async fn read_content(&self, path: &str) -> Result<String, StorageError>;

    /// Store `markdown` at `path`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if `path` exists and `overwrite` is false.
    async fn write_content(
        &self,
        path: &str,
        markdown: &str,
        overwrite: bool,
    ) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if existence cannot be determined.
    async fn content_exists(&self, path: &str) -> Result<bool, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    values: Arc<Mutex<HashMap<String, String>>>,
    catalog: Arc<Mutex<Vec<LessonDraft>>>,
    content: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with catalog entries.
    #[must_use]
    pub fn with_catalog(self, lessons: Vec<LessonDraft>) -> Self {
        if let Ok(mut guard) = self.catalog.lock() {
            *guard = lessons;
        }
        self
    }

    /// Seed markdown for a content path.
    #[must_use]
    pub fn with_content(self, path: impl Into<String>, markdown: impl Into<String>) -> Self {
        if let Ok(mut guard) = self.content.lock() {
            guard.insert(path.into(), markdown.into());
        }
        self
    }
}

#[async_trait]
impl KeyValueStore for InMemoryRepository {
    async fn get_value(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn put_value(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for InMemoryRepository {
    async fn load_catalog(&self) -> Result<Vec<LessonDraft>, StorageError> {
        let guard = self
            .catalog
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_catalog(&self, lessons: &[LessonDraft]) -> Result<Option<String>, StorageError> {
        let mut guard = self
            .catalog
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = lessons.to_vec();
        Ok(None)
    }
}

#[async_trait]
impl ContentRepository for InMemoryRepository {
    async fn read_content(&self, path: &str) -> Result<String, StorageError> {
        let guard = self
            .content
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.get(path).cloned().ok_or(StorageError::NotFound)
    }

    async fn write_content(
        &self,
        path: &str,
        markdown: &str,
        overwrite: bool,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .content
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if !overwrite && guard.contains_key(path) {
            return Err(StorageError::Conflict(format!("content already exists: {path}")));
        }
        guard.insert(path.to_owned(), markdown.to_owned());
        Ok(())
    }

    async fn content_exists(&self, path: &str) -> Result<bool, StorageError> {
        let guard = self
            .content
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.contains_key(path))
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub values: Arc<dyn KeyValueStore>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub content: Arc<dyn ContentRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_in_memory(InMemoryRepository::new())
    }

    /// Wrap a (possibly pre-seeded) in-memory repository.
    #[must_use]
    pub fn from_in_memory(repo: InMemoryRepository) -> Self {
        let values: Arc<dyn KeyValueStore> = Arc::new(repo.clone());
        let catalog: Arc<dyn CatalogRepository> = Arc::new(repo.clone());
        let content: Arc<dyn ContentRepository> = Arc::new(repo);
        Self {
            values,
            catalog,
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_value_replaces_previous_value() {
        let repo = InMemoryRepository::new();
        assert_eq!(repo.get_value("completed_lessons").await.unwrap(), None);

        repo.put_value("completed_lessons", "[1]").await.unwrap();
        repo.put_value("completed_lessons", "[1,2]").await.unwrap();
        assert_eq!(
            repo.get_value("completed_lessons").await.unwrap().as_deref(),
            Some("[1,2]")
        );
    }

    #[tokio::test]
    async fn content_write_refuses_overwrite_unless_forced() {
        let repo = InMemoryRepository::new().with_content("1-intro.md", "# Intro");
        let err = repo
            .write_content("1-intro.md", "# Other", false)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));

        repo.write_content("1-intro.md", "# Other", true).await.unwrap();
        assert_eq!(repo.read_content("1-intro.md").await.unwrap(), "# Other");
        assert!(matches!(
            repo.read_content("2-missing.md").await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn storage_handles_share_one_repository() {
        let repo = InMemoryRepository::new();
        let storage = Storage::from_in_memory(repo.clone());
        storage.values.put_value("k", "v").await.unwrap();
        assert_eq!(repo.get_value("k").await.unwrap().as_deref(), Some("v"));
    }
}
