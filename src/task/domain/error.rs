//! Error types for task domain parsing.

use thiserror::Error;

/// Error returned while parsing task statuses from persistence or request
/// path segments.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status '{0}', expected one of PENDING, IN_PROGRESS, DONE")]
pub struct ParseTaskStatusError(pub String);
