//! Schema bootstrap and server wiring against `PostgreSQL`.

use crate::postgres::helpers::{BoxError, PostgresCluster, postgres_cluster, prepared_repo};
use rstest::rstest;
use taskdeck::config::ServerConfig;
use taskdeck::server::build_state;
use taskdeck::task::{
    adapters::postgres::ensure_schema,
    domain::{NewTask, TaskTitle},
    ports::TaskRepository,
    services::StoreKind,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ensure_schema_is_idempotent(
    postgres_cluster: Result<PostgresCluster, BoxError>,
) -> Result<(), BoxError> {
    let context = prepared_repo(postgres_cluster?).await?;

    ensure_schema(&context.pool).await?;
    ensure_schema(&context.pool).await?;

    assert!(context.repo.get_all().await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn build_state_wires_persistent_store_from_config(
    postgres_cluster: Result<PostgresCluster, BoxError>,
) -> Result<(), BoxError> {
    let context = prepared_repo(postgres_cluster?).await?;
    context
        .repo
        .insert(&NewTask::new(TaskTitle::new("seeded")?))
        .await?;

    let config = ServerConfig::default().with_database_url(context.temp_db.url());
    let state = build_state(&config).await?;

    assert!(state.stores().has_persistent());
    let tasks = state.service(StoreKind::Persistent)?.get_all().await?;
    assert_eq!(tasks.len(), 1);
    Ok(())
}
