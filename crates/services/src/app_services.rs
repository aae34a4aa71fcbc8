use std::path::PathBuf;
use std::sync::Arc;

use lesson_core::model::Catalog;
use storage::repository::Storage;

use crate::Clock;
use crate::authoring::{AuthoringService, DEFAULT_ADMIN_SECRET};
use crate::catalog_service::{CatalogService, LessonListItem};
use crate::completion_store::{CompletionStore, DEFAULT_COMPLETION_KEY};
use crate::error::AppServicesError;
use crate::sessions::LessonLoopService;

/// Knobs for the services layer that do not belong to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicesConfig {
    pub completion_key: String,
    pub admin_secret: String,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            completion_key: DEFAULT_COMPLETION_KEY.to_owned(),
            admin_secret: DEFAULT_ADMIN_SECRET.to_owned(),
        }
    }
}

/// Assembles app-facing services around one loaded catalog.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<Catalog>,
    completions: Arc<CompletionStore>,
    lesson_loop: Arc<LessonLoopService>,
    authoring: Arc<AuthoringService>,
}

impl AppServices {
    /// Build services backed by `SQLite` progress and on-disk lesson files.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or catalog loading fails.
    pub async fn new_sqlite(
        db_url: &str,
        catalog_path: impl Into<PathBuf>,
        content_dir: impl Into<PathBuf>,
        clock: Clock,
        config: ServicesConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url, catalog_path, content_dir).await?;
        Self::from_storage(storage, clock, config).await
    }

    /// # Errors
    ///
    /// Returns `AppServicesError` if the catalog cannot be loaded.
    pub async fn from_storage(
        storage: Storage,
        clock: Clock,
        config: ServicesConfig,
    ) -> Result<Self, AppServicesError> {
        let catalog = CatalogService::new(clock, Arc::clone(&storage.catalog))
            .load()
            .await?;
        let catalog = Arc::new(catalog);
        let completions = Arc::new(
            CompletionStore::load(Arc::clone(&storage.values), config.completion_key).await,
        );
        let lesson_loop = Arc::new(LessonLoopService::new(
            Arc::clone(&catalog),
            Arc::clone(&storage.content),
            Arc::clone(&completions),
        ));
        let authoring = Arc::new(AuthoringService::new(
            clock,
            config.admin_secret,
            Arc::clone(&storage.catalog),
            Arc::clone(&storage.content),
        ));

        Ok(Self {
            catalog,
            completions,
            lesson_loop,
            authoring,
        })
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn completions(&self) -> Arc<CompletionStore> {
        Arc::clone(&self.completions)
    }

    #[must_use]
    pub fn lesson_loop(&self) -> Arc<LessonLoopService> {
        Arc::clone(&self.lesson_loop)
    }

    #[must_use]
    pub fn authoring(&self) -> Arc<AuthoringService> {
        Arc::clone(&self.authoring)
    }

    /// Dashboard rows with current completion flags.
    #[must_use]
    pub fn listing(&self) -> Vec<LessonListItem> {
        CatalogService::listing(&self.catalog, &self.completions)
    }
}
