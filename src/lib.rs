//! Tasklist: a task-management REST service.
//!
//! This crate provides a single-entity CRUD API over tasks (title,
//! description, status, timestamps) backed by a relational table, with
//! aggregated input validation and a centralized error-mapping layer.
//!
//! # Architecture
//!
//! Tasklist follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, HTTP)
//!
//! # Modules
//!
//! - [`task`]: Task domain, persistence ports/adapters, service, validation
//! - [`http`]: Router, wire DTOs, error envelope, server bootstrap

pub mod http;
pub mod task;
