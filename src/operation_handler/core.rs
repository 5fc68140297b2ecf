//! Core operation handler infrastructure
//!
//! This module contains the request and response types and the main
//! dispatcher. Individual operations live in the `handlers` modules.

use crate::config::ServiceConfig;
use crate::error::RouteError;
use crate::query::ListParams;
use crate::service::RegistrationService;
use crate::storage::RegistrationStore;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Framework-agnostic operation handler for registration operations
///
/// Turns structured requests into status codes and JSON envelopes without
/// being tied to any HTTP framework.
pub struct RegistrationOperationHandler<S: RegistrationStore> {
    pub(super) service: RegistrationService<S>,
}

/// Structured request for a registration operation
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationOperationRequest {
    /// The operation to perform
    pub operation: OperationType,
    /// Path identifier for operations on a single registration
    pub resource_id: Option<String>,
    /// Request body for create and update
    pub data: Option<Value>,
    /// Query parameters for list
    pub params: ListParams,
    /// Request ID for tracing and correlation
    pub request_id: Option<String>,
}

/// Operations exposed under the mount path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationType {
    /// `POST /`
    Create,
    /// `GET /:id`
    Get,
    /// `GET /`
    List,
    /// `PATCH /:id`
    Update,
    /// `DELETE /:id`
    Delete,
}

/// Response produced for every request, successful or not
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationOperationResponse {
    /// HTTP status code
    pub status: u16,
    /// JSON envelope sent to the client
    pub body: Value,
    /// Stable error code for failures
    pub error_code: Option<String>,
    /// Request ID the response belongs to
    pub request_id: String,
}

impl RegistrationOperationResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl<S: RegistrationStore> RegistrationOperationHandler<S> {
    /// Create a new operation handler over the given service.
    pub fn new(service: RegistrationService<S>) -> Self {
        Self { service }
    }

    /// Handle a structured registration request.
    pub async fn handle_operation(
        &self,
        request: RegistrationOperationRequest,
    ) -> RegistrationOperationResponse {
        let request_id = request
            .request_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        info!(
            "Registration handler processing {:?} (request: '{}')",
            request.operation, request_id
        );

        let result = match request.operation {
            OperationType::Create => super::handlers::crud::handle_create(self, request).await,
            OperationType::Get => super::handlers::crud::handle_get(self, request).await,
            OperationType::Update => super::handlers::crud::handle_update(self, request).await,
            OperationType::Delete => super::handlers::crud::handle_delete(self, request).await,
            OperationType::List => super::handlers::query::handle_list(self, request).await,
        };

        match result {
            Ok((status, body)) => {
                debug!(
                    "Registration handler completed with {} (request: '{}')",
                    status, request_id
                );
                RegistrationOperationResponse {
                    status,
                    body,
                    error_code: None,
                    request_id,
                }
            }
            Err(e) => {
                warn!(
                    "Registration handler failed: {} (request: '{}')",
                    e, request_id
                );
                super::errors::create_error_response(e, request_id)
            }
        }
    }

    /// Resolve a method and path against the mount path, then handle it.
    ///
    /// Unknown paths produce 404 and unsupported methods 405.
    pub async fn handle_route(
        &self,
        method: &str,
        path: &str,
        params: ListParams,
        body: Option<Value>,
    ) -> RegistrationOperationResponse {
        let mount_path = self.service.config().mount_path.as_str();
        match RegistrationOperationRequest::from_route(method, path, params, body, mount_path) {
            Ok(request) => self.handle_operation(request).await,
            Err(e) => {
                let request_id = uuid::Uuid::new_v4().to_string();
                debug!("No route for {} {}: {} (request: '{}')", method, path, e, request_id);
                super::errors::create_route_error_response(e, request_id)
            }
        }
    }

    pub fn service(&self) -> &RegistrationService<S> {
        &self.service
    }

    pub fn config(&self) -> &ServiceConfig {
        self.service.config()
    }
}

/// Where a path lands relative to the mount path.
pub(super) enum RouteTarget<'a> {
    Collection,
    Item(&'a str),
}

/// Match `path` against `mount_path`. `None` when it is outside the mount
/// path or nested deeper than one segment.
pub(super) fn resolve_path<'a>(path: &'a str, mount_path: &str) -> Option<RouteTarget<'a>> {
    let path = path.split('?').next().unwrap_or(path);
    let rest = path.strip_prefix(mount_path)?;
    let rest = rest.trim_end_matches('/');

    if rest.is_empty() {
        return Some(RouteTarget::Collection);
    }

    let id = rest.strip_prefix('/')?;
    if id.is_empty() || id.contains('/') {
        None
    } else {
        Some(RouteTarget::Item(id))
    }
}

pub(super) fn route_error(method: &str, path: &str, found: bool) -> RouteError {
    if found {
        RouteError::MethodNotAllowed {
            method: method.to_string(),
            path: path.to_string(),
        }
    } else {
        RouteError::NotFound {
            path: path.to_string(),
        }
    }
}
