//! Shared helpers for `PostgreSQL` integration tests.

pub use super::cluster::{BoxError, PostgresCluster, postgres_cluster};
use super::cluster::TemporaryDatabase;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use taskdeck::task::adapters::postgres::{
    CREATE_TASKS_SQL, PostgresTaskRepository, TaskPgPool, connect_pool,
};

/// Template database holding the migrated `tasks` schema.
pub const TEMPLATE_DB: &str = "taskdeck_test_template";

/// Repository over a freshly cloned database.
///
/// Fields drop in declaration order, so pooled connections close before the
/// database is dropped.
pub struct PreparedRepo {
    /// Repository under test.
    pub repo: PostgresTaskRepository,
    /// Pool backing the repository.
    pub pool: TaskPgPool,
    /// Database the pool connects to.
    pub temp_db: TemporaryDatabase,
}

/// Clones the migrated template into a new database and opens a repository
/// over it.
///
/// # Errors
///
/// Returns an error if the template, database, or pool cannot be set up.
pub async fn prepared_repo(cluster: PostgresCluster) -> Result<PreparedRepo, BoxError> {
    let temp_db = tokio::task::spawn_blocking(move || {
        cluster.ensure_template(TEMPLATE_DB, apply_schema)?;
        cluster.temporary_database(TEMPLATE_DB)
    })
    .await??;

    let url = temp_db.url().to_owned();
    let pool = tokio::task::spawn_blocking(move || connect_pool(&url, 2)).await??;
    Ok(PreparedRepo {
        repo: PostgresTaskRepository::new(pool.clone()),
        pool,
        temp_db,
    })
}

/// Runs `sql` against the prepared database on the blocking pool.
///
/// # Errors
///
/// Returns an error if no connection is available or the SQL fails.
pub async fn execute_sql(pool: &TaskPgPool, sql: &'static str) -> Result<(), BoxError> {
    let blocking_pool = pool.clone();
    tokio::task::spawn_blocking(move || -> Result<(), BoxError> {
        blocking_pool.get()?.batch_execute(sql)?;
        Ok(())
    })
    .await?
}

fn apply_schema(url: &str) -> Result<(), BoxError> {
    let mut connection = PgConnection::establish(url)?;
    connection.batch_execute(CREATE_TASKS_SQL)?;
    Ok(())
}
