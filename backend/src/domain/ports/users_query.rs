//! Driving port for user-facing queries.
//!
//! Inbound adapters (HTTP handlers) use this port to fetch users without
//! importing outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading users.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return all registered users.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Return a single user or a `not_found` error.
    async fn get_user(&self, id: &UserId) -> Result<User, Error>;
}
