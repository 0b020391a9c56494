//! Domain-error-to-HTTP mapping and the uniform error envelope.
//!
//! Handlers return [`ApiError`]; its [`IntoResponse`] implementation parks
//! the error in the response extensions, and the [`render_error_envelope`]
//! middleware converts it exactly once into the JSON envelope, adding the
//! request path. No domain error leaks as a raw internal failure.

use crate::http::dtos::TIMESTAMP_FORMAT;
use crate::task::domain::TaskStatus;
use crate::task::services::TaskServiceError;
use crate::task::validation::{FieldViolation, ValidationFailure};
use axum::Json;
use axum::extract::Request;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::Local;
use serde::Serialize;

/// Message surfaced for unexpected failures; internals stay server-side.
const INTERNAL_ERROR_MESSAGE: &str = "internal server error, please try again later";

/// Domain error kinds, each mapped to an HTTP status and envelope message.
#[derive(Debug, Clone)]
pub enum ApiError {
    /// The addressed task does not exist (404).
    NotFound(String),
    /// A business rule was violated (422). Reserved for future rules; no
    /// current rule raises it.
    BusinessRule(String),
    /// Semantically invalid input outside field validation, such as a bad
    /// path parameter (400).
    InvalidData(String),
    /// Field-level validation violations, aggregated (400).
    Validation(Vec<FieldViolation>),
    /// The request body could not be parsed into the expected shape (400).
    MalformedBody(String),
    /// No route matches the requested path and method (404).
    RouteNotFound(String),
    /// Any other failure; detail is logged, the caller sees a generic
    /// message (500).
    Internal,
}

impl ApiError {
    /// Returns the HTTP status for this error kind.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) | Self::RouteNotFound(_) => StatusCode::NOT_FOUND,
            Self::BusinessRule(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidData(_) | Self::Validation(_) | Self::MalformedBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the envelope message for this error kind.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::NotFound(message)
            | Self::BusinessRule(message)
            | Self::InvalidData(message)
            | Self::MalformedBody(message)
            | Self::RouteNotFound(message) => message.clone(),
            Self::Validation(_) => "validation failed for one or more request fields".to_owned(),
            Self::Internal => INTERNAL_ERROR_MESSAGE.to_owned(),
        }
    }

    /// Converts a service error, logging unexpected failures with full
    /// detail before degrading them to a generic internal error.
    #[must_use]
    pub fn from_service(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::NotFound(id) => Self::NotFound(format!("task not found with id: {id}")),
            TaskServiceError::Repository(repository_err) => {
                tracing::error!(error = %repository_err, "unexpected repository failure");
                Self::Internal
            }
        }
    }

    /// Converts a JSON body rejection.
    ///
    /// When the unparseable field is the status enum, the message names the
    /// three valid values explicitly.
    #[must_use]
    pub fn from_json_rejection(rejection: &JsonRejection) -> Self {
        let detail = rejection.body_text();
        let names_status_variant = TaskStatus::ALL
            .iter()
            .any(|status| detail.contains(status.as_str()));

        if detail.contains("unknown variant") && names_status_variant {
            return Self::MalformedBody(
                "invalid value for field 'status'; allowed values: PENDING, IN_PROGRESS, DONE"
                    .to_owned(),
            );
        }
        Self::MalformedBody("malformed JSON or incompatible request data".to_owned())
    }
}

impl From<ValidationFailure> for ApiError {
    fn from(failure: ValidationFailure) -> Self {
        Self::Validation(failure.into_violations())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // The envelope needs the request path, which only the middleware
        // sees; park the error in the extensions for it to render.
        let status = self.status();
        let mut response = status.into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// Uniform error envelope serialized to JSON. Null-valued fields are
/// omitted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// When the error occurred, formatted as `yyyy-MM-ddTHH:mm:ss`.
    pub timestamp: String,
    /// Numeric HTTP status code.
    pub status: u16,
    /// HTTP status reason phrase.
    pub error: String,
    /// Human-readable error message.
    pub message: String,
    /// Path of the request that produced the error.
    pub path: String,
    /// Per-field validation violations, present only for validation
    /// failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<Vec<FieldViolation>>,
}

impl ErrorEnvelope {
    /// Builds the envelope for an error raised on the given request path.
    #[must_use]
    pub fn for_error(error: &ApiError, path: impl Into<String>) -> Self {
        let status = error.status();
        let validation_errors = match error {
            ApiError::Validation(violations) => Some(violations.clone()),
            _ => None,
        };

        Self {
            timestamp: Local::now()
                .naive_local()
                .format(TIMESTAMP_FORMAT)
                .to_string(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown").to_owned(),
            message: error.message(),
            path: path.into(),
            validation_errors,
        }
    }
}

/// Middleware that renders any [`ApiError`] parked in the response
/// extensions into the JSON envelope, carrying the request path.
pub async fn render_error_envelope(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let mut response = next.run(request).await;

    response.extensions_mut().remove::<ApiError>().map_or(
        response,
        |error| {
            let envelope = ErrorEnvelope::for_error(&error, path);
            (error.status(), Json(envelope)).into_response()
        },
    )
}
