//! Service layer for task listing, creation, replacement, and removal.

use crate::task::{
    domain::{NewTask, Task, TaskDomainError, TaskId, TaskStatus, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    status: TaskStatus,
}

impl CreateTaskRequest {
    /// Creates a pending-task request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: TaskStatus::Pending,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial task status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    fn into_new_task(self) -> Result<NewTask, TaskDomainError> {
        let mut task = NewTask::new(TaskTitle::new(self.title)?).with_status(self.status);
        if let Some(description) = self.description {
            task = task.with_description(description);
        }
        Ok(task)
    }
}

/// Request payload replacing every mutable field of an existing task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    id: TaskId,
    content: CreateTaskRequest,
}

impl UpdateTaskRequest {
    /// Creates a replacement request for the given task.
    ///
    /// Fields not set on the request are reset to their defaults: an empty
    /// description and [`TaskStatus::Pending`].
    #[must_use]
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            content: CreateTaskRequest::new(title),
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.content = self.content.with_description(description);
        self
    }

    /// Sets the task status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.content.status = status;
        self
    }

    /// Returns the identifier of the task being replaced.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service over a single repository.
///
/// Callers choose the repository explicitly, typically through
/// [`super::TaskStores::select`].
pub struct TaskService<R>
where
    R: TaskRepository + ?Sized,
{
    repository: Arc<R>,
}

impl<R> Clone for TaskService<R>
where
    R: TaskRepository + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R> TaskService<R>
where
    R: TaskRepository + ?Sized,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns every task in the repository.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn get_all(&self) -> TaskServiceResult<Vec<Task>> {
        let tasks = self.repository.get_all().await?;
        tracing::debug!(count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Validates and stores a new task, returning its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when the title is invalid and
    /// [`TaskServiceError::Repository`] when the store rejects the record.
    pub async fn insert(&self, request: CreateTaskRequest) -> TaskServiceResult<TaskId> {
        let task = request.into_new_task()?;
        let id = self.repository.insert(&task).await?;
        tracing::debug!(task_id = %id, "inserted task");
        Ok(id)
    }

    /// Replaces an existing task, returning its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when the title is invalid and
    /// [`TaskServiceError::Repository`] wrapping
    /// [`TaskRepositoryError::NotFound`] when the task does not exist.
    pub async fn update(&self, request: UpdateTaskRequest) -> TaskServiceResult<TaskId> {
        let UpdateTaskRequest { id, content } = request;
        let task = Task::new(id, content.into_new_task()?);
        self.repository.update(&task).await?;
        tracing::debug!(task_id = %id, "updated task");
        Ok(id)
    }

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] wrapping
    /// [`TaskRepositoryError::NotFound`] when the task does not exist.
    pub async fn delete(&self, id: TaskId) -> TaskServiceResult<()> {
        self.repository.delete(id).await?;
        tracing::debug!(task_id = %id, "deleted task");
        Ok(())
    }
}
