//! Individual validation rule implementations.
//!
//! Each rule is a pure function that checks one aspect of task input and
//! returns the violations it finds. Rules never short-circuit each other;
//! the aggregating entry point in [`super`] runs them all.

use super::{FieldViolation, ValidationFailure};
use serde_json::json;

/// Minimum title length in characters.
pub const TITLE_MIN_CHARS: usize = 3;

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 100;

/// Maximum description length in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Validates that the title is present and non-blank after trimming.
#[must_use]
pub fn validate_title_present(title: Option<&str>) -> Option<FieldViolation> {
    match title {
        Some(value) if !value.trim().is_empty() => None,
        Some(value) => Some(FieldViolation::new(
            "title",
            "title is required",
            json!(value),
        )),
        None => Some(FieldViolation::new(
            "title",
            "title is required",
            serde_json::Value::Null,
        )),
    }
}

/// Validates the title length when a title is present.
///
/// An absent title is not a length violation; presence is checked
/// separately by [`validate_title_present`].
#[must_use]
pub fn validate_title_length(title: Option<&str>) -> Option<FieldViolation> {
    let value = title?;
    let chars = value.chars().count();
    if (TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&chars) {
        return None;
    }
    Some(FieldViolation::new(
        "title",
        format!("title must be between {TITLE_MIN_CHARS} and {TITLE_MAX_CHARS} characters"),
        json!(value),
    ))
}

/// Validates the description length when a description is present.
#[must_use]
pub fn validate_description_length(description: Option<&str>) -> Option<FieldViolation> {
    let value = description?;
    if value.chars().count() <= DESCRIPTION_MAX_CHARS {
        return None;
    }
    Some(FieldViolation::new(
        "description",
        format!("description must be at most {DESCRIPTION_MAX_CHARS} characters"),
        json!(value),
    ))
}

/// Runs every field rule against create/update input, aggregating all
/// violations rather than failing on the first.
///
/// # Errors
///
/// Returns [`ValidationFailure`] carrying one [`FieldViolation`] per
/// offending rule.
pub fn validate_task_fields(
    title: Option<&str>,
    description: Option<&str>,
) -> Result<(), ValidationFailure> {
    let violations: Vec<FieldViolation> = [
        validate_title_present(title),
        validate_title_length(title),
        validate_description_length(description),
    ]
    .into_iter()
    .flatten()
    .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationFailure::new(violations))
    }
}
