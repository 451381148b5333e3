//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User};

/// Domain use-case port for registering users.
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Register a user and return the stored record with its new id.
    ///
    /// A duplicate email surfaces as an `invalid_request` error whose
    /// detail reads `Email already registered`.
    async fn create_user(&self, new_user: NewUser) -> Result<User, Error>;
}
