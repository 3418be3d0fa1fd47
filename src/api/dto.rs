//! Wire types for task requests and responses.

use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::task::{
    domain::{TaskId, TaskStatus},
    services::{CreateTaskRequest, UpdateTaskRequest},
};

/// JSON body accepted by task creation and replacement.
///
/// `id` is ignored on creation and required on replacement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskPayload {
    /// Identifier of the task being replaced.
    #[serde(default)]
    pub id: Option<TaskId>,
    /// Task title.
    pub title: String,
    /// Task description.
    #[serde(default)]
    pub description: Option<String>,
    /// Task status; defaults to `pending`.
    #[serde(default)]
    pub status: TaskStatus,
}

impl TaskPayload {
    /// Converts the payload into a creation request, discarding any `id`.
    #[must_use]
    pub fn into_create_request(self) -> CreateTaskRequest {
        let mut request = CreateTaskRequest::new(self.title).with_status(self.status);
        if let Some(description) = self.description {
            request = request.with_description(description);
        }
        request
    }

    /// Converts the payload into a replacement request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingTaskId`] when the payload has no `id`.
    pub fn into_update_request(self) -> Result<UpdateTaskRequest, ApiError> {
        let id = self.id.ok_or(ApiError::MissingTaskId)?;
        let mut request = UpdateTaskRequest::new(id, self.title).with_status(self.status);
        if let Some(description) = self.description {
            request = request.with_description(description);
        }
        Ok(request)
    }
}

/// JSON body accepted by task deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DeleteTaskPayload {
    /// Identifier of the task to remove.
    pub id: TaskId,
}

/// Success envelope carrying a single result value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultEnvelope<T> {
    /// Operation result.
    pub result: T,
}

impl<T> ResultEnvelope<T> {
    /// Wraps a result value.
    #[must_use]
    pub const fn new(result: T) -> Self {
        Self { result }
    }
}

/// Error envelope returned by every failing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
    /// Originating error message.
    pub error: String,
}

/// Liveness report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    /// Always `ok` while the server is answering.
    pub status: String,
    /// Whether a persistent store is configured.
    pub persistent: bool,
}
