//! Fixture dataset served by the static task source.

use crate::task::domain::{NewTask, TaskDomainError, TaskStatus, TaskTitle};

/// Returns the fixture tasks used to seed the static source.
///
/// # Errors
///
/// Returns [`TaskDomainError`] if a fixture title fails validation.
pub fn static_tasks() -> Result<Vec<NewTask>, TaskDomainError> {
    Ok(vec![
        NewTask::new(TaskTitle::new("Write the weekly report")?)
            .with_description("Summarise progress for the team sync")
            .with_status(TaskStatus::Done),
        NewTask::new(TaskTitle::new("Review open pull requests")?)
            .with_description("Clear the review queue before Friday")
            .with_status(TaskStatus::InProgress),
        NewTask::new(TaskTitle::new("Buy milk")?),
    ])
}
