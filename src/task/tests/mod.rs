//! Unit tests for the task module.
//!
//! Tests are organised by layer: domain behaviour, validation rules, and
//! service orchestration over the in-memory repository.
