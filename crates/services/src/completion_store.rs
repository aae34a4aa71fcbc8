use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lesson_core::model::{CompletionSet, LessonId};
use storage::repository::{KeyValueStore, StorageError};
use tracing::{info, warn};

/// Storage key for the completion set unless configured otherwise.
pub const DEFAULT_COMPLETION_KEY: &str = "completed_lessons";

/// Durable record of which lessons the learner has passed.
///
/// The whole set is stored as one JSON array under a single key. A local mirror
/// answers `is_completed` synchronously; writes are serialized so the stored
/// value always contains every id recorded so far.
pub struct CompletionStore {
    values: Arc<dyn KeyValueStore>,
    key: String,
    mirror: Mutex<CompletionSet>,
    write_lock: tokio::sync::Mutex<()>,
}

impl CompletionStore {
    /// Read the completion set stored under `key`.
    ///
    /// A missing, unreadable or malformed value yields an empty set; the
    /// learner simply sees no completions.
    pub async fn load(values: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let set = read_set(values.as_ref(), &key).await.unwrap_or_default();
        Self {
            values,
            key,
            mirror: Mutex::new(set),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn is_completed(&self, id: LessonId) -> bool {
        self.mirror().contains(id)
    }

    #[must_use]
    pub fn snapshot(&self) -> CompletionSet {
        self.mirror().clone()
    }

    /// Refresh the mirror from storage, e.g. when a lesson is opened.
    ///
    /// A failed read keeps the current mirror; the next write must not drop
    /// ids that are only missing because storage was briefly unreachable.
    pub async fn reload(&self) -> CompletionSet {
        let _write = self.write_lock.lock().await;
        match read_set(self.values.as_ref(), &self.key).await {
            Some(set) => {
                *self.mirror() = set.clone();
                set
            }
            None => self.snapshot(),
        }
    }

    /// Add `id` to the completion set and persist the whole set.
    ///
    /// Returns `false` without writing when `id` was already recorded. The
    /// mirror only changes once the write succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the set cannot be serialized or written.
    pub async fn mark_completed(&self, id: LessonId) -> Result<bool, StorageError> {
        let _write = self.write_lock.lock().await;
        let mut next = self.snapshot();
        if !next.insert(id) {
            return Ok(false);
        }

        let json = serde_json::to_string(&next)?;
        self.values.put_value(&self.key, &json).await?;
        *self.mirror() = next;
        info!(lesson_id = id.value(), key = %self.key, "lesson marked completed");
        Ok(true)
    }

    fn mirror(&self) -> MutexGuard<'_, CompletionSet> {
        self.mirror.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// `None` when storage could not be read; a missing or malformed value is an
/// empty set.
async fn read_set(values: &dyn KeyValueStore, key: &str) -> Option<CompletionSet> {
    let raw = match values.get_value(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Some(CompletionSet::new()),
        Err(err) => {
            warn!(%key, error = %err, "completion storage unavailable");
            return None;
        }
    };
    match serde_json::from_str::<CompletionSet>(&raw) {
        Ok(set) => Some(set),
        Err(err) => {
            warn!(%key, error = %err, "ignoring malformed completion set");
            Some(CompletionSet::new())
        }
    }
}
