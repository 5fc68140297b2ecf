//! Student registration records service.
//!
//! Create, fetch, list, partially update and delete student registration
//! records, with schema validation, filtered and paginated listing, and a
//! pluggable document store.
//!
//! # Core Components
//!
//! - [`RegistrationService`] - Business operations over an injected store
//! - [`RegistrationStore`] - Trait for implementing storage backends
//! - [`RegistrationOperationHandler`] - Status codes and JSON envelopes for any transport
//! - [`validation`] - Field rules applied to create and update payloads
//! - [`query`] - List parameter translation and pagination
//!
//! # Quick Start
//!
//! ```rust
//! use registration_service::{InMemoryStore, ListParams, RegistrationService};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = RegistrationService::new(InMemoryStore::new());
//! service.start().await?;
//!
//! let created = service
//!     .create(&json!({
//!         "studentId": "2021-1-60-001",
//!         "name": "Alice Smith",
//!         "orgEmail": "alice@ewu.edu",
//!         "preferredDepartments": ["CS"]
//!     }))
//!     .await?;
//!
//! let page = service
//!     .list(&ListParams::new().with("name", "alice"))
//!     .await?;
//! assert_eq!(page.data[0].id, created.id);
//! assert_eq!(page.pagination.total, 1);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod docs;
pub mod error;
pub mod model;
pub mod operation_handler;
pub mod query;
pub mod service;
pub mod storage;
pub mod validation;

// Re-export commonly used types for convenience
pub use config::{ServiceConfig, ServiceConfigBuilder};
pub use error::{
    BuildError, BuildResult, FieldError, RegistrationError, RegistrationResult, RouteError,
    ValidationErrors, ValidationResult,
};
pub use model::{
    Gender, NewRegistration, Program, Registration, RegistrationId, RegistrationPayload,
};
pub use query::{AppliedFilters, ListParams, PageRequest, Pagination};
pub use service::{RegistrationPage, RegistrationService};
pub use storage::{Clock, InMemoryStore, ManualClock, RegistrationStore, StorageError, SystemClock};

pub use operation_handler::{
    OperationType, RegistrationOperationHandler, RegistrationOperationRequest,
    RegistrationOperationResponse,
};
