//! Task management bounded context.
//!
//! Implements the single-entity task lifecycle: creation with default
//! status, lookup, newest-first and per-status listing, update with
//! conditional status replacement, and hard deletion. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - Input validation in [`validation`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;
