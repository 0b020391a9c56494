//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::NaiveDateTime;
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Store-assigned task identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Optional task description.
    pub description: Option<String>,
    /// Lifecycle status, stored as the enum name.
    pub status: String,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
    /// Last mutation timestamp.
    pub updated_at: NaiveDateTime,
}

/// Insert model for task records. The store assigns the identifier.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task title.
    pub title: String,
    /// Optional task description.
    pub description: Option<String>,
    /// Lifecycle status, stored as the enum name.
    pub status: String,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
    /// Last mutation timestamp.
    pub updated_at: NaiveDateTime,
}
