//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod cors;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use crate::domain::ApiResult;

/// Register every route plus the extractor configuration that routes
/// malformed input through the shared error envelope.
///
/// Callers supply `web::Data<HttpState>` and `web::Data<HealthState>`.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use actix_web::{App, web};
/// use users_backend::inbound::http::{configure, health::HealthState, state::HttpState};
/// use users_backend::outbound::memory::InMemoryUserRepository;
///
/// let state = HttpState::from_repository(Arc::new(InMemoryUserRepository::new()));
/// let app = App::new()
///     .app_data(web::Data::new(state))
///     .app_data(web::Data::new(HealthState::new()))
///     .configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(validation::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(validation::path_error_handler))
        .service(health::health)
        .service(health::ready)
        .service(health::live)
        .service(users::create_user)
        .service(users::list_users)
        .service(users::get_user);
}
