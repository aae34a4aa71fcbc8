use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use lesson_core::model::LessonDraft;
use tracing::{debug, info};

use crate::repository::{CatalogRepository, StorageError};

/// Catalog stored as a pretty-printed JSON array of lesson entries.
///
/// Saving rewrites the whole document: the new content goes to a sibling
/// temp file which is then renamed over the catalog, after the previous
/// version has been copied to `<name>.bak.<timestamp>`.
#[derive(Debug, Clone)]
pub struct JsonCatalogFile {
    path: PathBuf,
}

impl JsonCatalogFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(suffix);
        self.path.with_file_name(name)
    }

    async fn backup(&self) -> Result<Option<PathBuf>, StorageError> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Ok(None);
        }
        let stamp = Utc::now().format("%Y-%m-%dT%H-%M-%S-%3fZ");
        let backup = self.sibling(&format!(".bak.{stamp}"));
        tokio::fs::copy(&self.path, &backup).await?;
        Ok(Some(backup))
    }
}

#[async_trait]
impl CatalogRepository for JsonCatalogFile {
    async fn load_catalog(&self) -> Result<Vec<LessonDraft>, StorageError> {
        debug!(path = %self.path.display(), "loading catalog");
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let lessons: Vec<LessonDraft> = serde_json::from_str(&raw)?;
        Ok(lessons)
    }

    async fn save_catalog(&self, lessons: &[LessonDraft]) -> Result<Option<String>, StorageError> {
        let mut body = serde_json::to_string_pretty(lessons)?;
        body.push('\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let backup = self.backup().await?;

        let tmp = self.sibling(".tmp");
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        info!(
            path = %self.path.display(),
            lessons = lessons.len(),
            backup = ?backup,
            "catalog written"
        );
        Ok(backup.map(|p| p.display().to_string()))
    }
}
