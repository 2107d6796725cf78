//! Task engine: task lifecycle management with remote identity checks.
//!
//! The engine creates tasks, moves them through their status lifecycle,
//! enforces per-assignee and per-task invariants, and cross-checks every
//! referenced user against an identity authority it does not control. Each
//! committed change is published on a lifecycle stream that the notification
//! consumer drains.
//!
//! # Architecture
//!
//! The engine follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, HTTP, channels)
//!
//! # Modules
//!
//! - [`task`]: Task creation, status transitions, and lifecycle events
//! - [`notification`]: Creator notifications driven by lifecycle events
//! - [`config`]: Layered engine configuration
//! - [`telemetry`]: Structured log output

pub mod config;
pub mod notification;
pub mod task;
pub mod telemetry;
