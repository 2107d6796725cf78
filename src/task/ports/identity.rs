//! Identity validator port for cross-checking referenced users.

use crate::task::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for identity validator operations.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Outcome of a successful identity lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserLookup {
    /// The user exists and may be referenced by tasks.
    Usable,
    /// The user does not exist, or exists but may no longer be referenced.
    NotFound,
}

/// Remote identity authority contract.
///
/// A lookup that could not be answered is an [`IdentityError`], never
/// [`UserLookup::NotFound`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityValidator: Send + Sync {
    /// Checks whether `user_id` exists and is usable.
    async fn check(&self, user_id: UserId) -> IdentityResult<UserLookup>;
}

/// Transport-level failures talking to the identity authority.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// The lookup did not complete within the configured bound.
    #[error("identity lookup for user {user_id} timed out after {timeout:?}")]
    Timeout {
        /// User being looked up.
        user_id: UserId,
        /// Bound that elapsed.
        timeout: Duration,
    },

    /// The authority answered with a status other than success or not found.
    #[error("identity lookup for user {user_id} failed with status {status}")]
    UnexpectedStatus {
        /// User being looked up.
        user_id: UserId,
        /// HTTP-equivalent status code.
        status: u16,
    },

    /// The request could not be delivered or its answer could not be read.
    #[error("identity transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
