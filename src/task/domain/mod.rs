//! Domain model for task lifecycle management.
//!
//! The task domain models creation drafts, update proposals, the persisted
//! task aggregate with its status rules, and the lifecycle events published
//! after each committed change. Infrastructure concerns stay outside of the
//! domain boundary.

mod error;
mod event;
mod ids;
mod proposal;
mod status;
mod task;

pub use error::{
    ParseTaskPriorityError, ParseTaskStatusError, TaskStateError, TaskUpdateError,
    TaskValidationError,
};
pub use event::{TaskEventKind, TaskEventPayload, TaskLifecycleEvent};
pub use ids::{TaskId, UserId};
pub use proposal::{NewTaskDraft, TaskUpdate};
pub use status::{TaskPriority, TaskStatus};
pub use task::{NewTask, PersistedTaskData, Task};
