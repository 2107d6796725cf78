//! Task lifecycle management.
//!
//! This module creates tasks, moves them through `CREATED`, `IN_PROGRESS`,
//! and `DONE`, and removes them, while cross-checking every referenced user
//! against the identity authority. Each committed change is announced on the
//! lifecycle stream. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
