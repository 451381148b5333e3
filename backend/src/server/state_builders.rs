//! Builders for HTTP state from the configured store.

use std::sync::Arc;

use actix_web::web;

use users_backend::inbound::http::state::HttpState;
use users_backend::outbound::memory::InMemoryUserRepository;
use users_backend::outbound::persistence::DieselUserRepository;

use super::ServerConfig;

/// Build the shared HTTP state, wiring the PostgreSQL repository when a pool
/// is configured and the in-memory store otherwise.
///
/// Called once per process so every worker shares one store.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => HttpState::from_repository(Arc::new(DieselUserRepository::new(pool.clone()))),
        None => HttpState::from_repository(Arc::new(InMemoryUserRepository::new())),
    };
    web::Data::new(state)
}
