//! CRUD operation handlers
//!
//! Create, get, update and delete, each producing a status and the success
//! envelope for its operation.

use crate::error::{RegistrationError, RegistrationResult};
use crate::model::Registration;
use crate::operation_handler::core::{RegistrationOperationHandler, RegistrationOperationRequest};
use crate::storage::{RegistrationStore, StorageError};
use serde_json::{Value, json};

pub const UPDATED_MESSAGE: &str = "Registration updated successfully";
pub const DELETED_MESSAGE: &str = "Registration deleted successfully";

/// Handle create operations.
pub async fn handle_create<S: RegistrationStore>(
    handler: &RegistrationOperationHandler<S>,
    request: RegistrationOperationRequest,
) -> RegistrationResult<(u16, Value)> {
    let data = request.data.unwrap_or(Value::Null);
    let record = handler.service.create(&data).await?;

    Ok((
        201,
        json!({
            "success": true,
            "data": record_json(&record)?,
        }),
    ))
}

/// Handle get operations.
pub async fn handle_get<S: RegistrationStore>(
    handler: &RegistrationOperationHandler<S>,
    request: RegistrationOperationRequest,
) -> RegistrationResult<(u16, Value)> {
    let id = resource_id(&request)?;
    let record = handler.service.get(id).await?;

    Ok((
        200,
        json!({
            "success": true,
            "data": record_json(&record)?,
        }),
    ))
}

/// Handle update operations.
pub async fn handle_update<S: RegistrationStore>(
    handler: &RegistrationOperationHandler<S>,
    request: RegistrationOperationRequest,
) -> RegistrationResult<(u16, Value)> {
    let id = resource_id(&request)?;
    let data = request.data.clone().unwrap_or(Value::Null);
    let record = handler.service.update(id, &data).await?;

    Ok((
        200,
        json!({
            "success": true,
            "message": UPDATED_MESSAGE,
            "data": record_json(&record)?,
        }),
    ))
}

/// Handle delete operations.
pub async fn handle_delete<S: RegistrationStore>(
    handler: &RegistrationOperationHandler<S>,
    request: RegistrationOperationRequest,
) -> RegistrationResult<(u16, Value)> {
    let id = resource_id(&request)?;
    let record = handler.service.delete(id).await?;

    Ok((
        200,
        json!({
            "success": true,
            "message": DELETED_MESSAGE,
            "data": record_json(&record)?,
        }),
    ))
}

fn resource_id(request: &RegistrationOperationRequest) -> RegistrationResult<&str> {
    request
        .resource_id
        .as_deref()
        .ok_or_else(|| RegistrationError::malformed_identifier(""))
}

pub(crate) fn record_json(record: &Registration) -> RegistrationResult<Value> {
    record
        .to_json()
        .map_err(|e| RegistrationError::from(StorageError::from(e)))
}
