//! Query operation handlers
//!
//! List with filters and pagination.

use crate::error::{RegistrationError, RegistrationResult};
use crate::operation_handler::core::{RegistrationOperationHandler, RegistrationOperationRequest};
use crate::storage::{RegistrationStore, StorageError};
use serde_json::{Value, json};

/// Handle list operations.
pub async fn handle_list<S: RegistrationStore>(
    handler: &RegistrationOperationHandler<S>,
    request: RegistrationOperationRequest,
) -> RegistrationResult<(u16, Value)> {
    let page = handler.service.list(&request.params).await?;

    let data = page
        .data
        .iter()
        .map(super::crud::record_json)
        .collect::<RegistrationResult<Vec<_>>>()?;
    let filters = serde_json::to_value(&page.filters)
        .map_err(|e| RegistrationError::from(StorageError::from(e)))?;
    let pagination = serde_json::to_value(page.pagination)
        .map_err(|e| RegistrationError::from(StorageError::from(e)))?;

    Ok((
        200,
        json!({
            "success": true,
            "data": data,
            "filters": filters,
            "pagination": pagination,
        }),
    ))
}
