//! Application services for task management.

mod selection;
mod tasks;

pub use selection::{StoreKind, TaskStores};
pub use tasks::{
    CreateTaskRequest, TaskService, TaskServiceError, TaskServiceResult, UpdateTaskRequest,
};
