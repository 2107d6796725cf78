//! Port contracts for task lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod events;
pub mod identity;
pub mod repository;

pub use events::{EmitError, LifecycleEventEmitter};
pub use identity::{IdentityError, IdentityResult, IdentityValidator, UserLookup};
pub use repository::{TaskStore, TaskStoreError, TaskStoreResult};

#[cfg(test)]
pub use events::MockLifecycleEventEmitter;
#[cfg(test)]
pub use identity::MockIdentityValidator;
#[cfg(test)]
pub use repository::MockTaskStore;
