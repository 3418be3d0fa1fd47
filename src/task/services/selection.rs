//! Explicit selection between the persistent and static task stores.

use crate::task::ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
use std::fmt;
use std::sync::Arc;

/// Identifies which backing store a service call runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKind {
    /// The relational database.
    Persistent,
    /// The fixture-seeded in-memory dataset.
    Static,
}

impl StoreKind {
    /// Returns a stable lowercase label for logging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Persistent => "persistent",
            Self::Static => "static",
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The task stores available to request handlers.
///
/// The persistent store is optional so the service can run against the
/// static dataset alone; selecting it while absent is an error rather than a
/// panic.
#[derive(Clone)]
pub struct TaskStores {
    persistent: Option<Arc<dyn TaskRepository>>,
    fixture: Arc<dyn TaskRepository>,
}

impl TaskStores {
    /// Creates a store set with only the static source configured.
    #[must_use]
    pub fn new(fixture: Arc<dyn TaskRepository>) -> Self {
        Self {
            persistent: None,
            fixture,
        }
    }

    /// Attaches the persistent store.
    #[must_use]
    pub fn with_persistent(mut self, persistent: Arc<dyn TaskRepository>) -> Self {
        self.persistent = Some(persistent);
        self
    }

    /// Reports whether a persistent store is configured.
    #[must_use]
    pub const fn has_persistent(&self) -> bool {
        self.persistent.is_some()
    }

    /// Returns the repository backing the requested store.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Unavailable`] when the persistent store
    /// is requested but not configured.
    pub fn select(&self, kind: StoreKind) -> TaskRepositoryResult<Arc<dyn TaskRepository>> {
        match kind {
            StoreKind::Persistent => self
                .persistent
                .clone()
                .ok_or(TaskRepositoryError::Unavailable),
            StoreKind::Static => Ok(Arc::clone(&self.fixture)),
        }
    }
}

impl fmt::Debug for TaskStores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskStores")
            .field("persistent", &self.has_persistent())
            .finish_non_exhaustive()
    }
}
