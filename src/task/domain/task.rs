//! Task aggregate root and related lifecycle values.

use super::{TaskId, TaskStatus};
use chrono::{Local, NaiveDateTime};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// Field constraints (title length, description length) are enforced by the
/// validation layer before a task reaches the domain; the aggregate itself
/// only guards the lifecycle rules: `created_at` is set exactly once,
/// `updated_at` is refreshed on every mutation, and the status is never
/// cleared once set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

/// A task that has not been persisted yet.
///
/// Carries everything except the identifier, which the store assigns on
/// insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    description: Option<String>,
    status: TaskStatus,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: NaiveDateTime,
    /// Persisted latest mutation timestamp.
    pub updated_at: NaiveDateTime,
}

/// Replacement values applied to an existing task.
///
/// Title and description always overwrite the stored values (an absent
/// description clears the field); the status is overwritten only when one is
/// supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskUpdate {
    /// Replacement title.
    pub title: String,
    /// Replacement description; `None` clears the stored value.
    pub description: Option<String>,
    /// Replacement status; `None` leaves the stored status unchanged.
    pub status: Option<TaskStatus>,
}

impl NewTask {
    /// Creates an unpersisted task, defaulting the status to
    /// [`TaskStatus::Pending`] when none is supplied and stamping both
    /// timestamps from the clock.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        status: Option<TaskStatus>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = local_timestamp(clock);
        Self {
            title: title.into(),
            description,
            status: status.unwrap_or(TaskStatus::Pending),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    /// Applies replacement values to this task.
    ///
    /// Title and description are overwritten unconditionally; the status is
    /// overwritten only when the update supplies one. `updated_at` is
    /// refreshed from the clock.
    pub fn apply_update(&mut self, update: TaskUpdate, clock: &impl Clock) {
        self.title = update.title;
        self.description = update.description;
        if let Some(status) = update.status {
            self.status = status;
        }
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = local_timestamp(clock);
    }
}

/// Reads the clock and renders the instant as a server-local date-time,
/// matching the persisted column type.
fn local_timestamp(clock: &impl Clock) -> NaiveDateTime {
    clock.utc().with_timezone(&Local).naive_local()
}
