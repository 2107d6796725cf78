//! Application services for task lifecycle orchestration.

mod error;
mod lifecycle;
mod locks;

pub use error::{ErrorKind, TaskLifecycleError, TaskLifecycleResult};
pub use lifecycle::{LifecyclePolicy, TaskLifecycleService};
pub use locks::AssigneeLocks;
