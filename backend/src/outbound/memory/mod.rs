//! In-process user store.
//!
//! Backs the `memory` store profile used for local development and tests.
//! Records live for the lifetime of the process; nothing is persisted.
//!
//! The duplicate-email check and the append happen under a single lock
//! acquisition, so concurrent creates with the same email cannot both
//! succeed.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId};

/// In-memory implementation of the `UserRepository` port.
///
/// Users are kept in insertion order, which is also the listing order.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<User>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::query("in-memory user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut users = self.lock()?;
        if users.iter().any(|user| user.email() == new_user.email()) {
            return Err(UserPersistenceError::duplicate_email(
                new_user.email().as_ref(),
            ));
        }

        let user = new_user.clone().into_user(UserId::random());
        users.push(user.clone());
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.lock()?.clone())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, UserPersistenceError> {
        self.lock()?
            .iter()
            .find(|user| user.id().as_uuid() == id.as_uuid())
            .cloned()
            .ok_or_else(|| UserPersistenceError::not_found(id.as_ref()))
    }
}
