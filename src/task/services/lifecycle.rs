//! Service layer for task creation, lookup, mutation, and removal.

use crate::task::{
    domain::{NewTask, Task, TaskId, TaskStatus, TaskUpdate},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
///
/// Field constraints are enforced by the validation layer before this
/// payload reaches the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskCommand {
    title: String,
    description: Option<String>,
    status: Option<TaskStatus>,
}

impl CreateTaskCommand {
    /// Creates a command with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status; when unset, creation defaults to
    /// [`TaskStatus::Pending`].
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Request payload for updating a task.
///
/// Title and description replace the stored values unconditionally; the
/// status is replaced only when supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskCommand {
    title: String,
    description: Option<String>,
    status: Option<TaskStatus>,
}

impl UpdateTaskCommand {
    /// Creates a command with the required replacement title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: None,
        }
    }

    /// Sets the replacement description; leaving it unset clears the stored
    /// value.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the replacement status; leaving it unset preserves the stored
    /// value.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// No task exists with the given identifier.
    #[error("task not found with id: {0}")]
    NotFound(TaskId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),
}

impl From<TaskRepositoryError> for TaskServiceError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
///
/// Sole holder of the business rules for the task lifecycle: default-status
/// assignment, not-found detection, and timestamp refresh on mutation.
#[derive(Clone)]
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a new task, defaulting the status to
    /// [`TaskStatus::Pending`] when the command does not supply one.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when persistence fails.
    pub async fn create(&self, command: CreateTaskCommand) -> TaskServiceResult<Task> {
        tracing::info!(title = %command.title, "creating task");

        let draft = NewTask::new(
            command.title,
            command.description,
            command.status,
            &*self.clock,
        );
        let task = self.repository.insert(&draft).await?;

        tracing::info!(id = %task.id(), "task created");
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task has the given id.
    pub async fn get(&self, id: TaskId) -> TaskServiceResult<Task> {
        tracing::info!(%id, "fetching task");

        self.repository.find_by_id(id).await?.ok_or_else(|| {
            tracing::warn!(%id, "task not found");
            TaskServiceError::NotFound(id)
        })
    }

    /// Returns all tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn list_all(&self) -> TaskServiceResult<Vec<Task>> {
        tracing::info!("listing all tasks");

        let tasks = self.repository.list_all().await?;
        tracing::info!(count = tasks.len(), "tasks listed");
        Ok(tasks)
    }

    /// Returns all tasks with the given status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn list_by_status(&self, status: TaskStatus) -> TaskServiceResult<Vec<Task>> {
        tracing::info!(%status, "listing tasks by status");

        let tasks = self.repository.list_by_status(status).await?;
        tracing::info!(%status, count = tasks.len(), "tasks listed");
        Ok(tasks)
    }

    /// Updates an existing task and refreshes its `updated_at` timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task has the given id.
    pub async fn update(&self, id: TaskId, command: UpdateTaskCommand) -> TaskServiceResult<Task> {
        tracing::info!(%id, "updating task");

        let mut task = self.repository.find_by_id(id).await?.ok_or_else(|| {
            tracing::warn!(%id, "task not found");
            TaskServiceError::NotFound(id)
        })?;

        task.apply_update(
            TaskUpdate {
                title: command.title,
                description: command.description,
                status: command.status,
            },
            &*self.clock,
        );
        self.repository.update(&task).await?;

        tracing::info!(%id, "task updated");
        Ok(task)
    }

    /// Permanently removes a task. A second delete of the same id fails.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task has the given id.
    pub async fn delete(&self, id: TaskId) -> TaskServiceResult<()> {
        tracing::info!(%id, "deleting task");

        self.repository.delete(id).await.map_err(|err| {
            if matches!(err, TaskRepositoryError::NotFound(_)) {
                tracing::warn!(%id, "task not found");
            }
            TaskServiceError::from(err)
        })?;

        tracing::info!(%id, "task deleted");
        Ok(())
    }
}
