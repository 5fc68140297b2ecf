//! Framework-agnostic registration operation handler.
//!
//! Maps registration operations onto HTTP status codes and JSON envelopes so
//! any transport can host them by forwarding method, path, query and body.
//!
//! # Key Types
//!
//! - [`RegistrationOperationHandler`] - Main handler for processing operations
//! - [`RegistrationOperationRequest`] - Structured request, built directly or from a route
//! - [`RegistrationOperationResponse`] - Status code plus JSON envelope
//!
//! # Examples
//!
//! ```rust
//! use registration_service::operation_handler::{
//!     RegistrationOperationHandler, RegistrationOperationRequest,
//! };
//! use registration_service::{InMemoryStore, RegistrationService};
//! use serde_json::json;
//!
//! # async fn example() {
//! let handler = RegistrationOperationHandler::new(RegistrationService::new(InMemoryStore::new()));
//!
//! let request = RegistrationOperationRequest::create(json!({
//!     "studentId": "2021-1-60-001",
//!     "name": "Alice Smith",
//!     "orgEmail": "alice@ewu.edu"
//! }));
//! let response = handler.handle_operation(request).await;
//! assert_eq!(response.status, 201);
//! # }
//! ```

mod builders;
mod core;
mod errors;
mod handlers;

pub use core::{
    OperationType, RegistrationOperationHandler, RegistrationOperationRequest,
    RegistrationOperationResponse,
};

pub use errors::{
    DUPLICATE_REGISTRATION, INVALID_ID_FORMAT, INVALID_QUERY, REGISTRATION_NOT_FOUND,
    VALIDATION_FAILED, create_error_response, create_route_error_response,
};
pub use handlers::crud::{DELETED_MESSAGE, UPDATED_MESSAGE};
