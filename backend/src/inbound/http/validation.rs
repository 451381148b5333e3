//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request-shape failures (bad JSON, wrong content type, unparsable path
//! segments) and domain field violations all leave the service as an
//! `invalid_request` [`Error`] so clients see one envelope.

use actix_web::HttpRequest;
use actix_web::error::{JsonPayloadError, PathError};
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, UserValidationError};

/// Validation error codes for request-shape failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RequestErrorCode {
    InvalidJson,
    UnsupportedContentType,
    PayloadTooLarge,
    InvalidPath,
}

impl RequestErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidJson => "invalid_json",
            Self::UnsupportedContentType => "unsupported_content_type",
            Self::PayloadTooLarge => "payload_too_large",
            Self::InvalidPath => "invalid_path",
        }
    }
}

fn request_error(detail: impl Into<String>, code: RequestErrorCode) -> Error {
    Error::invalid_request(detail).with_details(json!({ "code": code.as_str() }))
}

/// Map a domain field violation to a client error naming the field.
pub fn map_user_validation_error(err: UserValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": err.code(),
    }))
}

/// Classify a JSON extraction failure.
pub(crate) fn json_payload_error(err: &JsonPayloadError) -> Error {
    match err {
        JsonPayloadError::ContentType => request_error(
            "Content type must be application/json",
            RequestErrorCode::UnsupportedContentType,
        ),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            request_error("Request body too large", RequestErrorCode::PayloadTooLarge)
        }
        JsonPayloadError::Deserialize(source) => request_error(
            format!("Invalid request body: {source}"),
            RequestErrorCode::InvalidJson,
        ),
        _ => request_error("Invalid request body", RequestErrorCode::InvalidJson),
    }
}

/// `JsonConfig` error handler producing the shared error envelope.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, path = req.path(), "rejected JSON payload");
    json_payload_error(&err).into()
}

/// `PathConfig` error handler producing the shared error envelope.
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, path = req.path(), "rejected path parameters");
    request_error(
        format!("Invalid path parameter: {err}"),
        RequestErrorCode::InvalidPath,
    )
    .into()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for request-shape error mapping.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde_json::Value;

    fn details_code(error: &Error) -> Option<&str> {
        error
            .details()
            .and_then(|details| details.get("code"))
            .and_then(Value::as_str)
    }

    #[rstest]
    fn content_type_errors_are_named() {
        let error = json_payload_error(&JsonPayloadError::ContentType);
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(details_code(&error), Some("unsupported_content_type"));
    }

    #[rstest]
    fn deserialize_errors_carry_serde_message() {
        let source = serde_json::from_str::<Value>("{").expect_err("truncated JSON");
        let error = json_payload_error(&JsonPayloadError::Deserialize(source));
        assert!(error.detail().starts_with("Invalid request body: "));
        assert_eq!(details_code(&error), Some("invalid_json"));
    }

    #[rstest]
    fn overflow_errors_are_named() {
        let error = json_payload_error(&JsonPayloadError::Overflow { limit: 8 });
        assert_eq!(details_code(&error), Some("payload_too_large"));
    }

    #[rstest]
    #[case(UserValidationError::NameTooShort { min: 2 }, "name", "name_too_short")]
    #[case(UserValidationError::InvalidEmail, "email", "invalid_email")]
    #[case(UserValidationError::RoleTooLong { max: 50 }, "role", "role_too_long")]
    fn field_violations_name_the_field(
        #[case] violation: UserValidationError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let detail = violation.to_string();
        let error = map_user_validation_error(violation);
        assert_eq!(error.detail(), detail);
        assert_eq!(
            error
                .details()
                .and_then(|details| details.get("field"))
                .and_then(Value::as_str),
            Some(field)
        );
        assert_eq!(details_code(&error), Some(code));
    }
}
