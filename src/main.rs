//! taskdeck HTTP server.
//!
//! Reads configuration from the environment (and `.env` when present),
//! connects to `PostgreSQL` when `DATABASE_URL` is set, and serves the task
//! API. `RUST_LOG` controls log verbosity.

use std::process::ExitCode;

use taskdeck::config::ServerConfig;
use taskdeck::server::{self, StartupError};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "taskdeck=info,tower_http=info";

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if dotenv_loaded {
        tracing::debug!("loaded environment from .env");
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "taskdeck stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;
    let state = server::build_state(&config).await?;
    server::serve(&config, state).await
}
