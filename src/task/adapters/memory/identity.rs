//! In-memory identity directory for lifecycle tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::UserId,
    ports::{IdentityError, IdentityResult, IdentityValidator, UserLookup},
};

/// Account state of a directory user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectoryUserStatus {
    /// The user may be referenced by tasks.
    Active,
    /// The user has been banned.
    Banned,
    /// The user has been soft-deleted.
    Deleted,
}

/// In-memory stand-in for the identity authority.
///
/// Unknown users resolve to [`UserLookup::NotFound`]. A failure installed
/// with [`InMemoryIdentityDirectory::fail_with`] is returned for every lookup
/// until it is cleared.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

#[derive(Debug, Default)]
struct DirectoryState {
    users: HashMap<UserId, DirectoryUserStatus>,
    failure: Option<IdentityError>,
    lookups: usize,
}

impl InMemoryIdentityDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory with the given active users.
    #[must_use]
    pub fn with_active_users(users: impl IntoIterator<Item = UserId>) -> Self {
        let directory = Self::new();
        for user_id in users {
            directory.set_user(user_id, DirectoryUserStatus::Active);
        }
        directory
    }

    /// Registers or replaces a user.
    pub fn set_user(&self, user_id: UserId, status: DirectoryUserStatus) {
        self.write_state(|state| {
            state.users.insert(user_id, status);
        });
    }

    /// Makes every subsequent lookup fail with `error`.
    pub fn fail_with(&self, error: IdentityError) {
        self.write_state(|state| state.failure = Some(error));
    }

    /// Clears an installed failure.
    pub fn clear_failure(&self) {
        self.write_state(|state| state.failure = None);
    }

    /// Returns how many lookups have been answered or failed so far.
    #[must_use]
    pub fn lookups(&self) -> usize {
        self.state.read().map_or(0, |state| state.lookups)
    }

    fn write_state(&self, update: impl FnOnce(&mut DirectoryState)) {
        let mut state = match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        update(&mut state);
    }
}

#[async_trait]
impl IdentityValidator for InMemoryIdentityDirectory {
    async fn check(&self, user_id: UserId) -> IdentityResult<UserLookup> {
        let mut state = self
            .state
            .write()
            .map_err(|err| IdentityError::transport(std::io::Error::other(err.to_string())))?;
        state.lookups += 1;
        if let Some(failure) = state.failure.clone() {
            return Err(failure);
        }
        let lookup = match state.users.get(&user_id) {
            Some(DirectoryUserStatus::Active) => UserLookup::Usable,
            Some(DirectoryUserStatus::Banned | DirectoryUserStatus::Deleted) | None => {
                UserLookup::NotFound
            }
        };
        Ok(lookup)
    }
}
