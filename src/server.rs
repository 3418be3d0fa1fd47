//! Process bootstrap: store wiring, listener setup, and graceful shutdown.

use std::io;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;

use crate::api::{self, AppState};
use crate::config::{ConfigurationError, ServerConfig};
use crate::task::{
    adapters::{
        memory::{InMemoryTaskRepository, static_tasks},
        postgres::{PostgresTaskRepository, TaskPgPool, connect_pool, ensure_schema},
    },
    domain::TaskDomainError,
    ports::{TaskRepositoryError, TaskRepositoryResult},
    services::TaskStores,
};

/// Errors that abort server startup or shut it down abnormally.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Configuration could not be read.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The static fixture dataset failed validation.
    #[error("invalid static fixtures: {0}")]
    Fixtures(#[from] TaskDomainError),

    /// The configured database could not be reached or prepared.
    #[error("postgres is unreachable: {0}")]
    Database(#[from] TaskRepositoryError),

    /// The listener could not be bound.
    #[error("failed to bind listener: {0}")]
    Bind(#[source] io::Error),

    /// The server stopped with an I/O error.
    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}

/// Builds handler state from configuration.
///
/// The static source is always seeded from fixtures. When a database URL is
/// configured the pool is opened and the schema applied; failure to do so is
/// fatal rather than silently falling back to static-only mode.
///
/// # Errors
///
/// Returns [`StartupError`] when fixtures are invalid or the database cannot
/// be prepared.
pub async fn build_state(config: &ServerConfig) -> Result<AppState, StartupError> {
    let fixture = InMemoryTaskRepository::seeded(static_tasks()?);
    let mut stores = TaskStores::new(Arc::new(fixture));

    match config.database_url() {
        Some(url) => {
            let pool = open_pool(url.to_owned(), config.pool_size()).await?;
            ensure_schema(&pool).await?;
            tracing::info!(pool_size = config.pool_size(), "connected to postgres");
            stores = stores.with_persistent(Arc::new(PostgresTaskRepository::new(pool)));
        }
        None => {
            tracing::warn!("DATABASE_URL is not set; persistent task routes will fail");
        }
    }

    Ok(AppState::new(stores))
}

/// Serves the API until a shutdown signal arrives.
///
/// # Errors
///
/// Returns [`StartupError`] when the address is invalid, the listener cannot
/// be bound, or the server fails.
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<(), StartupError> {
    let address = config.socket_addr()?;
    let listener = TcpListener::bind(address)
        .await
        .map_err(StartupError::Bind)?;

    match listener.local_addr() {
        Ok(local) => tracing::info!("listening on http://{local}"),
        Err(error) => tracing::warn!(%error, "could not determine local address"),
    }

    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    tracing::info!("server shutdown complete");
    Ok(())
}

async fn open_pool(url: String, pool_size: u32) -> TaskRepositoryResult<TaskPgPool> {
    tokio::task::spawn_blocking(move || connect_pool(&url, pool_size))
        .await
        .map_err(TaskRepositoryError::persistence)?
}

/// Completes on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
