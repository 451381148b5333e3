//! Shared helpers for the PostgreSQL integration suites.

pub mod cluster_skip;
pub mod embedded_postgres;
