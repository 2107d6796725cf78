//! In-memory adapters for task lifecycle ports.

mod events;
mod identity;
mod task;

pub use events::RecordingEventEmitter;
pub use identity::{DirectoryUserStatus, InMemoryIdentityDirectory};
pub use task::InMemoryTaskStore;
