//! Application services for task orchestration.

mod lifecycle;

pub use lifecycle::{
    CreateTaskCommand, TaskService, TaskServiceError, TaskServiceResult, UpdateTaskCommand,
};
