//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides the durable implementation of the user repository
//! port, backed by PostgreSQL via Diesel with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: The repository only translates between Diesel rows
//!   and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are never exposed to the domain layer.
//! - **Atomic uniqueness**: Email uniqueness is enforced by the
//!   `users_email_key` constraint, so concurrent duplicate inserts resolve
//!   inside PostgreSQL rather than in a read-then-write race.
//! - **Embedded migrations**: The schema ships inside the binary and is
//!   applied at startup by [`run_migrations`].
//!
//! # Example
//!
//! ```ignore
//! use users_backend::outbound::persistence::{DbPool, PoolConfig, DieselUserRepository};
//!
//! let config = PoolConfig::new("postgres://localhost/users");
//! let pool = DbPool::new(config).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DEFAULT_MAX_CONNECTIONS, DbPool, PoolConfig, PoolError};
