//! Input validation for task create and update payloads.
//!
//! Rejects structurally invalid input before it reaches the service. All
//! rules are checked and every violation is reported in one aggregated
//! failure, mirroring bean-style field validation.

pub mod rules;

pub use rules::{
    DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS, TITLE_MIN_CHARS, validate_task_fields,
};

use serde::Serialize;
use thiserror::Error;

/// A single field-level validation violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldViolation {
    /// Name of the offending field.
    pub field: String,
    /// Human-readable description of the violated rule.
    pub message: String,
    /// The rejected input value; JSON null when the field was absent.
    pub rejected_value: serde_json::Value,
}

impl FieldViolation {
    /// Creates a violation record.
    #[must_use]
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        rejected_value: serde_json::Value,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rejected_value,
        }
    }
}

/// Aggregated validation failure carrying every field violation found.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("validation failed for one or more request fields")]
pub struct ValidationFailure {
    violations: Vec<FieldViolation>,
}

impl ValidationFailure {
    /// Creates a failure from the collected violations.
    #[must_use]
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// Returns the collected violations.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Consumes the failure, yielding the collected violations.
    #[must_use]
    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }
}
