//! Connection pool construction and schema bootstrap.

use super::repository::TaskPgPool;
use crate::task::ports::{TaskRepositoryError, TaskRepositoryResult};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

/// SQL creating the `tasks` table if it does not already exist.
pub const CREATE_TASKS_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_tasks/up.sql");

/// Builds an r2d2 pool for the given database URL.
///
/// The pool eagerly opens a connection, so an unreachable server is reported
/// here rather than on the first request.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when the pool cannot be built.
pub fn connect_pool(database_url: &str, max_size: u32) -> TaskRepositoryResult<TaskPgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(TaskRepositoryError::persistence)
}

/// Applies the task schema to the pooled database.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when a connection cannot be
/// checked out or the DDL fails.
pub async fn ensure_schema(pool: &TaskPgPool) -> TaskRepositoryResult<()> {
    let blocking_pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = blocking_pool.get().map_err(TaskRepositoryError::persistence)?;
        connection
            .batch_execute(CREATE_TASKS_SQL)
            .map_err(TaskRepositoryError::persistence)
    })
    .await
    .map_err(TaskRepositoryError::persistence)?
}
