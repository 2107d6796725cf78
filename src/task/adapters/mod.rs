//! Adapter implementations of the task lifecycle ports.
//!
//! - [`memory`]: in-memory store, identity directory, and recording emitter
//! - [`postgres`]: Diesel-backed task store
//! - [`http`]: identity service client
//! - [`stream`]: lifecycle event emitters

pub mod http;
pub mod memory;
pub mod postgres;
pub mod stream;
