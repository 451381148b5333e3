//! Port abstraction for user store adapters and their errors.
//!
//! Two adapters implement [`UserRepository`]: an in-process store used for
//! development and tests, and a PostgreSQL store backed by Diesel. Both share
//! the same contract so the service and HTTP layers never branch on the
//! configured profile.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Store errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Another user already holds the requested email address.
        DuplicateEmail { email: String } => "email already registered: {email}",
        /// No user exists with the requested identifier.
        NotFound { id: String } => "user not found: {id}",
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user, assigning a fresh identifier.
    ///
    /// The uniqueness check and the insert are atomic: of two concurrent
    /// creates with the same email exactly one succeeds and the other
    /// returns [`UserPersistenceError::DuplicateEmail`].
    async fn create(&self, new_user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Return every stored user in insertion order.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier, failing with
    /// [`UserPersistenceError::NotFound`] when absent.
    async fn find_by_id(&self, id: &UserId) -> Result<User, UserPersistenceError>;
}
