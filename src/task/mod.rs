//! Task management for taskdeck.
//!
//! Tasks are listed, created, replaced, and removed through a single
//! repository port with two implementations: a `PostgreSQL` store and a
//! fixture-seeded in-memory store. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
