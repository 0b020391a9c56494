//! HTTP adapter for the task service.
//!
//! A thin layer over [`crate::task`]: wire DTOs in [`dtos`], the route
//! table and request-binding handlers in [`handlers`], the error taxonomy
//! and envelope middleware in [`error`], and server bootstrap in
//! [`server`].

pub mod dtos;
pub mod error;
pub mod handlers;
pub mod server;

pub use error::{ApiError, ErrorEnvelope};
pub use handlers::{AppState, build_router};
pub use server::{AllowedOrigins, ServerConfig, ServerError, ServerHandle, start};
