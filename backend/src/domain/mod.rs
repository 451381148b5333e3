//! Domain primitives, ports, and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User (alias to `user::User`): stored user record.
//! - NewUser (alias to `user::NewUser`): validated create input.
//! - UsersService: driving-port implementation over a user repository.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod users_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    DEFAULT_ROLE, EmailAddress, NewUser, Role, User, UserId, UserName, UserValidationError,
};
pub use self::users_service::{
    DUPLICATE_EMAIL_DETAIL, STORE_UNAVAILABLE_DETAIL, USER_NOT_FOUND_DETAIL, UsersService,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use users_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("User not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
