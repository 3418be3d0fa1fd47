//! HTTP surface for task management.
//!
//! Each route maps onto exactly one [`crate::task::services::TaskService`]
//! call against an explicitly selected store. Failures are reported with the
//! `{"error": <message>}` envelope.

pub mod dto;
pub mod error;
pub mod handlers;
mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

/// Builds the application router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/tasks/static", get(handlers::list_static_tasks))
        .route(
            "/tasks",
            get(handlers::list_tasks)
                .post(handlers::create_task)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
