//! `PostgreSQL` adapters for task persistence.

mod models;
mod pool;
mod repository;
mod schema;

pub use pool::{CREATE_TASKS_SQL, connect_pool, ensure_schema};
pub use repository::{PostgresTaskRepository, TaskPgPool};
