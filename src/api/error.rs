//! API error handling.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use super::dto::ErrorEnvelope;
use crate::task::{ports::TaskRepositoryError, services::TaskServiceError};

/// Failures surfaced by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body could not be read from the connection.
    #[error("{0}")]
    BodyRead(String),

    /// The create or update body is not a valid task payload.
    #[error("{0}")]
    MalformedBody(#[source] serde_json::Error),

    /// The delete body is not a valid `{"id": <int>}` payload.
    #[error("{0}")]
    MalformedDeleteBody(#[source] serde_json::Error),

    /// An update payload omitted the task identifier.
    #[error("task id is required")]
    MissingTaskId,

    /// The service layer rejected the request.
    #[error(transparent)]
    Service(#[from] TaskServiceError),
}

impl ApiError {
    /// Returns the HTTP status reported for this error.
    ///
    /// Delete bodies that fail to decode are reported as server errors,
    /// unlike create and update bodies.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MalformedBody(_)
            | Self::MissingTaskId
            | Self::Service(TaskServiceError::Domain(_)) => StatusCode::BAD_REQUEST,
            Self::BodyRead(_)
            | Self::MalformedDeleteBody(_)
            | Self::Service(TaskServiceError::Repository(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TaskRepositoryError> for ApiError {
    fn from(error: TaskRepositoryError) -> Self {
        Self::Service(TaskServiceError::Repository(error))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "request rejected");
        }
        let body = ErrorEnvelope {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
