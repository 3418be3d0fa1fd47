//! Shared handler state.

use super::ApiError;
use crate::task::{
    ports::TaskRepository,
    services::{StoreKind, TaskService, TaskStores},
};

/// Dependencies shared by every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    stores: TaskStores,
}

impl AppState {
    /// Creates handler state over the given stores.
    #[must_use]
    pub const fn new(stores: TaskStores) -> Self {
        Self { stores }
    }

    /// Returns the configured stores.
    #[must_use]
    pub const fn stores(&self) -> &TaskStores {
        &self.stores
    }

    /// Builds a service bound to the requested store.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Service`] wrapping the unavailable-store error when
    /// the persistent store is requested but not configured.
    pub fn service(&self, kind: StoreKind) -> Result<TaskService<dyn TaskRepository>, ApiError> {
        let repository = self.stores.select(kind)?;
        Ok(TaskService::new(repository))
    }
}
