//! Cross-origin policy for browser clients.
//!
//! The API is public and unauthenticated, so every origin, method, and
//! header is allowed and the origin is echoed as the `*` wildcard.

use actix_cors::Cors;

/// Preflight cache lifetime in seconds.
pub const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Build the permissive CORS middleware.
pub fn permissive_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allow_any_method()
        .allow_any_header()
        .max_age(PREFLIGHT_MAX_AGE_SECS)
}
