//! Creator notifications driven by the task lifecycle stream.
//!
//! The [`TaskEventListener`] drains a lifecycle channel, resolves each
//! task's creator through the identity authority, and records the
//! notification in the log. Delivery beyond the log is out of scope.

mod listener;

pub use listener::{ListenerSummary, NotificationOutcome, TaskEventListener};
