use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::repository::{ContentRepository, StorageError};

/// Lesson markdown files kept flat inside one directory.
#[derive(Debug, Clone)]
pub struct ContentDir {
    root: PathBuf,
}

impl ContentDir {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Content paths are bare file names; anything that could escape the root is refused.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let mut components = Path::new(path).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Ok(self.root.join(name)),
            _ => Err(StorageError::InvalidPath(path.to_owned())),
        }
    }
}

#[async_trait]
impl ContentRepository for ContentDir {
    async fn read_content(&self, path: &str) -> Result<String, StorageError> {
        let file = self.resolve(path)?;
        debug!(path = %file.display(), "reading lesson content");
        Ok(tokio::fs::read_to_string(file).await?)
    }

    async fn write_content(
        &self,
        path: &str,
        markdown: &str,
        overwrite: bool,
    ) -> Result<(), StorageError> {
        let file = self.resolve(path)?;
        if !overwrite && tokio::fs::try_exists(&file).await? {
            return Err(StorageError::Conflict(format!(
                "markdown file already exists: {}",
                file.display()
            )));
        }
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(&file, markdown).await?;
        info!(path = %file.display(), bytes = markdown.len(), "lesson content written");
        Ok(())
    }

    async fn content_exists(&self, path: &str) -> Result<bool, StorageError> {
        let file = self.resolve(path)?;
        Ok(tokio::fs::try_exists(file).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_and_reads_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let content = ContentDir::new(dir.path().join("content"));

        assert!(!content.content_exists("1-intro.md").await.unwrap());
        content
            .write_content("1-intro.md", "## Welcome\nHello", false)
            .await
            .unwrap();
        assert!(content.content_exists("1-intro.md").await.unwrap());
        assert_eq!(
            content.read_content("1-intro.md").await.unwrap(),
            "## Welcome\nHello"
        );
    }

    #[tokio::test]
    async fn refuses_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let content = ContentDir::new(dir.path());
        content.write_content("a.md", "one", false).await.unwrap();

        let err = content.write_content("a.md", "two", false).await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));

        content.write_content("a.md", "two", true).await.unwrap();
        assert_eq!(content.read_content("a.md").await.unwrap(), "two");
    }

    #[tokio::test]
    async fn rejects_paths_outside_root() {
        let dir = tempfile::tempdir().unwrap();
        let content = ContentDir::new(dir.path());
        for bad in ["../secret.md", "nested/a.md", "/etc/passwd", ""] {
            assert!(
                matches!(
                    content.read_content(bad).await,
                    Err(StorageError::InvalidPath(_))
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let content = ContentDir::new(dir.path());
        assert!(matches!(
            content.read_content("404.md").await,
            Err(StorageError::NotFound)
        ));
    }
}
