//! The registration service.
//!
//! [`RegistrationService`] is the business layer: it validates input,
//! translates list parameters, makes exactly one store call per operation
//! and shapes the result. It is generic over the [`RegistrationStore`] it is
//! given and holds no other state.

use crate::config::ServiceConfig;
use crate::error::{RegistrationError, RegistrationResult};
use crate::model::{Registration, RegistrationId};
use crate::query::filter::{LIMIT_PARAM, PAGE_PARAM};
use crate::query::{AppliedFilters, ListParams, PageRequest, Pagination, translate};
use crate::storage::RegistrationStore;
use crate::validation::{validate_create, validate_update};
use log::{debug, info, trace, warn};
use serde::Serialize;
use serde_json::Value;

/// One page of a list operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrationPage {
    pub data: Vec<Registration>,
    pub filters: AppliedFilters,
    pub pagination: Pagination,
}

/// Registration business operations over an injected store.
#[derive(Debug, Clone)]
pub struct RegistrationService<S> {
    store: S,
    config: ServiceConfig,
}

impl<S: RegistrationStore> RegistrationService<S> {
    /// Create a service with the default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, ServiceConfig::default())
    }

    pub fn with_config(store: S, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Open the underlying store.
    pub async fn start(&self) -> RegistrationResult<()> {
        self.store.init().await?;
        info!("Registration service started at '{}'", self.config.mount_path);
        Ok(())
    }

    /// Close the underlying store.
    pub async fn shutdown(&self) -> RegistrationResult<()> {
        self.store.shutdown().await?;
        info!("Registration service stopped");
        Ok(())
    }

    /// Validate and store a new registration.
    pub async fn create(&self, payload: &Value) -> RegistrationResult<Registration> {
        trace!(
            "Create data: {}",
            serde_json::to_string(payload).unwrap_or_else(|_| "invalid json".to_string())
        );

        let new = validate_create(payload).inspect_err(|errors| {
            debug!("Create rejected with {} validation errors", errors.len());
        })?;
        info!("Creating registration for student '{}'", new.student_id);

        let stored = self.store.insert(new).await.map_err(|e| {
            if !e.is_duplicate_key() {
                warn!("Storage error during create: {}", e);
            }
            RegistrationError::from(e)
        })?;

        debug!("Created registration {}", stored.id);
        Ok(stored)
    }

    /// Fetch one registration by id.
    pub async fn get(&self, id: &str) -> RegistrationResult<Registration> {
        let id = RegistrationId::parse(id)?;
        debug!("Getting registration {}", id);

        match self.store.find_by_id(&id).await? {
            Some(record) => {
                trace!("Registration found and returned");
                Ok(record)
            }
            None => {
                debug!("Registration {} not found", id);
                Err(RegistrationError::not_found(id.into_string()))
            }
        }
    }

    /// List registrations matching `params`, newest first.
    pub async fn list(&self, params: &ListParams) -> RegistrationResult<RegistrationPage> {
        let translated = translate(params)?;
        let request = PageRequest::parse(
            params.get(PAGE_PARAM),
            params.get(LIMIT_PARAM),
            &self.config,
        )?;

        debug!(
            "Listing registrations page {} (limit {}) with {} filters",
            request.page,
            request.limit,
            translated.filters.len()
        );

        let page = self
            .store
            .find_page(&translated.query, request.offset(), request.limit)
            .await
            .inspect_err(|e| warn!("Storage error during list: {}", e))?;

        Ok(RegistrationPage {
            pagination: Pagination::for_request(page.total, request),
            data: page.records,
            filters: translated.filters,
        })
    }

    /// Apply a partial update.
    pub async fn update(&self, id: &str, payload: &Value) -> RegistrationResult<Registration> {
        let id = RegistrationId::parse(id)?;
        info!("Updating registration {}", id);
        trace!(
            "Update data: {}",
            serde_json::to_string(payload).unwrap_or_else(|_| "invalid json".to_string())
        );

        let changes = validate_update(payload)?;

        match self.store.update(&id, changes).await? {
            Some(record) => Ok(record),
            None => {
                debug!("Registration {} not found for update", id);
                Err(RegistrationError::not_found(id.into_string()))
            }
        }
    }

    /// Delete a registration and return what it held.
    pub async fn delete(&self, id: &str) -> RegistrationResult<Registration> {
        let id = RegistrationId::parse(id)?;
        info!("Deleting registration {}", id);

        match self.store.delete(&id).await? {
            Some(record) => Ok(record),
            None => {
                debug!("Registration {} not found for delete", id);
                Err(RegistrationError::not_found(id.into_string()))
            }
        }
    }
}
