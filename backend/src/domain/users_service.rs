//! User domain service.
//!
//! Implements the driving ports for users on top of any
//! [`UserRepository`], translating store failures into API errors.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info, warn};

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, NewUser, User, UserId};

/// Detail returned when the requested email is already taken.
pub const DUPLICATE_EMAIL_DETAIL: &str = "Email already registered";
/// Detail returned when no user matches the requested identifier.
pub const USER_NOT_FOUND_DETAIL: &str = "User not found";
/// Detail returned while the user store cannot be reached.
pub const STORE_UNAVAILABLE_DETAIL: &str = "Service temporarily unavailable";

/// User service implementing [`UsersCommand`] and [`UsersQuery`].
pub struct UsersService<R> {
    repo: Arc<R>,
}

impl<R> Clone for UsersService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R> UsersService<R> {
    /// Create a new service over the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> UsersService<R>
where
    R: UserRepository,
{
    fn map_persistence_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::DuplicateEmail { email } => {
                warn!(%email, "rejected duplicate email");
                Error::invalid_request(DUPLICATE_EMAIL_DETAIL)
                    .with_details(json!({ "field": "email", "code": "duplicate_email" }))
            }
            UserPersistenceError::NotFound { id } => {
                warn!(user_id = %id, "user lookup missed");
                Error::not_found(USER_NOT_FOUND_DETAIL)
            }
            UserPersistenceError::Connection { message } => {
                warn!(%message, "user repository unavailable");
                Error::service_unavailable(STORE_UNAVAILABLE_DETAIL)
            }
            UserPersistenceError::Query { message } => {
                error!(%message, "user repository query failed");
                Error::internal(format!("user repository error: {message}"))
            }
        }
    }
}

#[async_trait]
impl<R> UsersCommand for UsersService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, new_user: NewUser) -> Result<User, Error> {
        let user = self
            .repo
            .create(&new_user)
            .await
            .map_err(Self::map_persistence_error)?;
        info!(user_id = %user.id(), "user created");
        Ok(user)
    }
}

#[async_trait]
impl<R> UsersQuery for UsersService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        let users = self
            .repo
            .list()
            .await
            .map_err(Self::map_persistence_error)?;
        info!(count = users.len(), "users listed");
        Ok(users)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(Self::map_persistence_error)
    }
}

#[cfg(test)]
#[path = "users_service_tests.rs"]
mod tests;
