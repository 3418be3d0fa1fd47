//! taskdeck: a task CRUD service over `PostgreSQL` and a static fixture
//! source.
//!
//! # Architecture
//!
//! taskdeck follows hexagonal architecture principles:
//!
//! - **Domain**: task values and validation with no infrastructure
//!   dependencies
//! - **Ports**: the repository trait shared by every store
//! - **Adapters**: the `PostgreSQL` and in-memory repositories
//!
//! # Modules
//!
//! - [`task`]: task domain, repository port, adapters, and services
//! - [`api`]: axum routes, handlers, and the JSON error envelope
//! - [`config`]: environment-driven server configuration
//! - [`server`]: store wiring and the HTTP listener

pub mod api;
pub mod config;
pub mod server;
pub mod task;
