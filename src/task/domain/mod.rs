//! Domain model for task management.
//!
//! The task domain holds the validated scalar types and the task entity while
//! keeping storage and transport concerns outside of the domain boundary.

mod error;
mod ids;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{TaskId, TaskTitle};
pub use task::{NewTask, Task, TaskStatus};
