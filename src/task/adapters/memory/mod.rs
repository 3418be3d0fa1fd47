//! In-memory adapter implementations.
//!
//! These adapters back the static task source and provide a thread-safe
//! repository for tests that run without a database.

mod fixtures;
mod task;

pub use fixtures::static_tasks;
pub use task::InMemoryTaskRepository;
