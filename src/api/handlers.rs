//! HTTP handlers for task routes.
//!
//! Persistent routes resolve their store before touching the request body,
//! so a missing database connection is reported even for malformed input.

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use super::{
    ApiError, AppState,
    dto::{DeleteTaskPayload, HealthResponse, ResultEnvelope, TaskPayload},
};
use crate::task::{
    domain::{Task, TaskId},
    services::StoreKind,
};

/// Lists tasks from the fixture-seeded static source.
///
/// # Errors
///
/// Returns [`ApiError`] when the static store fails.
pub async fn list_static_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    list(&state, StoreKind::Static).await
}

/// Lists tasks from the persistent store.
///
/// # Errors
///
/// Returns [`ApiError`] when no persistent store is configured or the query
/// fails.
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    list(&state, StoreKind::Persistent).await
}

/// Creates a task in the persistent store and returns its identifier.
///
/// # Errors
///
/// Returns [`ApiError`] when the store is unavailable, the body is malformed,
/// or the insert fails.
pub async fn create_task(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ResultEnvelope<TaskId>>, ApiError> {
    let service = state.service(StoreKind::Persistent)?;
    let payload: TaskPayload = decode(&read_body(body)?).map_err(ApiError::MalformedBody)?;
    let id = service.insert(payload.into_create_request()).await?;
    Ok(Json(ResultEnvelope::new(id)))
}

/// Replaces a task in the persistent store and returns its identifier.
///
/// # Errors
///
/// Returns [`ApiError`] when the store is unavailable, the body is malformed
/// or lacks an `id`, or the task does not exist.
pub async fn update_task(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ResultEnvelope<TaskId>>, ApiError> {
    let service = state.service(StoreKind::Persistent)?;
    let payload: TaskPayload = decode(&read_body(body)?).map_err(ApiError::MalformedBody)?;
    let id = service.update(payload.into_update_request()?).await?;
    Ok(Json(ResultEnvelope::new(id)))
}

/// Deletes a task from the persistent store, answering with an empty body.
///
/// # Errors
///
/// Returns [`ApiError`] when the store is unavailable, the body is not an
/// `{"id": <int>}` object, or the task does not exist.
pub async fn delete_task(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, ApiError> {
    let service = state.service(StoreKind::Persistent)?;
    let payload: DeleteTaskPayload =
        decode(&read_body(body)?).map_err(ApiError::MalformedDeleteBody)?;
    service.delete(payload.id).await?;
    Ok(StatusCode::OK)
}

/// Reports liveness and whether a persistent store is configured.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
        persistent: state.stores().has_persistent(),
    })
}

async fn list(state: &AppState, kind: StoreKind) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.service(kind)?.get_all().await?;
    Ok(Json(tasks))
}

fn read_body(body: Result<Bytes, BytesRejection>) -> Result<Bytes, ApiError> {
    body.map_err(|rejection| ApiError::BodyRead(rejection.body_text()))
}

fn decode<T: DeserializeOwned>(bytes: &Bytes) -> Result<T, serde_json::Error> {
    serde_json::from_slice(bytes)
}
