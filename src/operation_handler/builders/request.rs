//! Request builder utilities for RegistrationOperationRequest
//!
//! Constructors for each operation, plus route resolution from a raw method
//! and path.

use crate::error::RouteError;
use crate::operation_handler::core::{
    OperationType, RegistrationOperationRequest, RouteTarget, resolve_path, route_error,
};
use crate::query::ListParams;
use serde_json::Value;

impl RegistrationOperationRequest {
    fn new(operation: OperationType) -> Self {
        Self {
            operation,
            resource_id: None,
            data: None,
            params: ListParams::default(),
            request_id: None,
        }
    }

    /// Create a new create operation request.
    pub fn create(data: Value) -> Self {
        Self {
            data: Some(data),
            ..Self::new(OperationType::Create)
        }
    }

    /// Create a new get operation request.
    pub fn get(resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: Some(resource_id.into()),
            ..Self::new(OperationType::Get)
        }
    }

    /// Create a new list operation request.
    pub fn list(params: ListParams) -> Self {
        Self {
            params,
            ..Self::new(OperationType::List)
        }
    }

    /// Create a new update operation request.
    pub fn update(resource_id: impl Into<String>, data: Value) -> Self {
        Self {
            resource_id: Some(resource_id.into()),
            data: Some(data),
            ..Self::new(OperationType::Update)
        }
    }

    /// Create a new delete operation request.
    pub fn delete(resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: Some(resource_id.into()),
            ..Self::new(OperationType::Delete)
        }
    }

    /// Resolve an HTTP method and path under `mount_path` into a request.
    ///
    /// | Method | Path         | Operation |
    /// |--------|--------------|-----------|
    /// | POST   | `/`          | create    |
    /// | GET    | `/`          | list      |
    /// | GET    | `/:id`       | get       |
    /// | PATCH  | `/:id`       | update    |
    /// | DELETE | `/:id`       | delete    |
    pub fn from_route(
        method: &str,
        path: &str,
        params: ListParams,
        body: Option<Value>,
        mount_path: &str,
    ) -> Result<Self, RouteError> {
        let method_upper = method.to_ascii_uppercase();
        let target =
            resolve_path(path, mount_path).ok_or_else(|| route_error(method, path, false))?;

        let request = match (method_upper.as_str(), target) {
            ("POST", RouteTarget::Collection) => Self::create(body.unwrap_or(Value::Null)),
            ("GET", RouteTarget::Collection) => Self::list(params),
            ("GET", RouteTarget::Item(id)) => Self::get(id),
            ("PATCH", RouteTarget::Item(id)) => Self::update(id, body.unwrap_or(Value::Null)),
            ("DELETE", RouteTarget::Item(id)) => Self::delete(id),
            _ => return Err(route_error(method, path, true)),
        };

        Ok(request)
    }

    /// Add request ID to the request.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Add list parameters to the request.
    pub fn with_params(mut self, params: ListParams) -> Self {
        self.params = params;
        self
    }
}
