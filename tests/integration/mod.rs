//! Integration tests against the public API.

pub mod concurrency;
pub mod operation_handler;
pub mod properties;
pub mod service_operations;
