//! Wire DTOs for the task endpoints.
//!
//! Three shapes over the one entity: two narrow input bodies (create,
//! update) validated before they become service commands, and the response
//! representation including the generated id and timestamps.

use crate::task::domain::{Task, TaskStatus};
use crate::task::services::{CreateTaskCommand, UpdateTaskCommand};
use crate::task::validation::{ValidationFailure, validate_task_fields};
use serde::{Deserialize, Serialize};

/// Wire format for timestamps: `yyyy-MM-ddTHH:mm:ss`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Request body for creating a task.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskBody {
    /// Task title; required, 3 to 100 characters.
    pub title: Option<String>,
    /// Task description; optional, at most 500 characters.
    pub description: Option<String>,
    /// Initial status; defaults to PENDING when omitted or null.
    pub status: Option<TaskStatus>,
}

impl CreateTaskBody {
    /// Validates the body and converts it into a service command.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationFailure`] with every violated field rule.
    pub fn into_command(self) -> Result<CreateTaskCommand, ValidationFailure> {
        validate_task_fields(self.title.as_deref(), self.description.as_deref())?;

        let mut command = CreateTaskCommand::new(self.title.unwrap_or_default());
        if let Some(description) = self.description {
            command = command.with_description(description);
        }
        if let Some(status) = self.status {
            command = command.with_status(status);
        }
        Ok(command)
    }
}

/// Request body for updating a task.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskBody {
    /// Replacement title; required, 3 to 100 characters.
    pub title: Option<String>,
    /// Replacement description; omitting it clears the stored value.
    pub description: Option<String>,
    /// Replacement status; omitting it preserves the stored value.
    pub status: Option<TaskStatus>,
}

impl UpdateTaskBody {
    /// Validates the body and converts it into a service command.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationFailure`] with every violated field rule.
    pub fn into_command(self) -> Result<UpdateTaskCommand, ValidationFailure> {
        validate_task_fields(self.title.as_deref(), self.description.as_deref())?;

        let mut command = UpdateTaskCommand::new(self.title.unwrap_or_default());
        if let Some(description) = self.description {
            command = command.with_description(description);
        }
        if let Some(status) = self.status {
            command = command.with_status(status);
        }
        Ok(command)
    }
}

/// Response representation of a task.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    /// Store-assigned identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Task description, if any.
    pub description: Option<String>,
    /// Lifecycle status enum name.
    pub status: TaskStatus,
    /// Creation timestamp, `yyyy-MM-ddTHH:mm:ss`.
    pub created_at: String,
    /// Last mutation timestamp, `yyyy-MM-ddTHH:mm:ss`.
    pub updated_at: String,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().into_inner(),
            title: task.title().to_owned(),
            description: task.description().map(ToOwned::to_owned),
            status: task.status(),
            created_at: task.created_at().format(TIMESTAMP_FORMAT).to_string(),
            updated_at: task.updated_at().format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}
