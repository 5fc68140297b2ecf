//! Error envelopes for operation handlers
//!
//! Shared response construction for every failure a handler can report.

use crate::error::{RegistrationError, RouteError};
use crate::operation_handler::core::RegistrationOperationResponse;
use serde_json::json;

pub const VALIDATION_FAILED: &str = "Validation failed";
pub const INVALID_ID_FORMAT: &str = "Invalid ID format";
pub const REGISTRATION_NOT_FOUND: &str = "Registration not found";
pub const DUPLICATE_REGISTRATION: &str = "Registration already exists";
pub const INVALID_QUERY: &str = "Invalid query parameter";

/// Create an error response from a RegistrationError.
pub fn create_error_response(
    error: RegistrationError,
    request_id: String,
) -> RegistrationOperationResponse {
    let body = match &error {
        RegistrationError::Validation(errors) => json!({
            "success": false,
            "message": VALIDATION_FAILED,
            "errors": errors,
        }),
        RegistrationError::MalformedIdentifier { .. } => json!({
            "success": false,
            "message": INVALID_ID_FORMAT,
        }),
        RegistrationError::NotFound { .. } => json!({
            "success": false,
            "message": REGISTRATION_NOT_FOUND,
        }),
        RegistrationError::DuplicateKey { .. } => json!({
            "success": false,
            "message": DUPLICATE_REGISTRATION,
            "error": error.to_string(),
        }),
        RegistrationError::InvalidQuery { parameter, message } => json!({
            "success": false,
            "message": INVALID_QUERY,
            "error": format!("\"{}\" {}", parameter, message),
        }),
        RegistrationError::Persistence(storage_error) => json!({
            "success": false,
            "error": storage_error.to_string(),
        }),
    };

    RegistrationOperationResponse {
        status: error.status_code(),
        body,
        error_code: Some(error.error_code().to_string()),
        request_id,
    }
}

/// Create a response for a method and path that resolve to no operation.
pub fn create_route_error_response(
    error: RouteError,
    request_id: String,
) -> RegistrationOperationResponse {
    let error_code = match &error {
        RouteError::NotFound { .. } => "ROUTE_NOT_FOUND",
        RouteError::MethodNotAllowed { .. } => "METHOD_NOT_ALLOWED",
    };

    RegistrationOperationResponse {
        status: error.status_code(),
        body: json!({
            "success": false,
            "message": error.to_string(),
        }),
        error_code: Some(error_code.to_string()),
        request_id,
    }
}
