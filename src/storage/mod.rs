//! Storage abstraction for registration records.
//!
//! The [`RegistrationStore`] trait is the seam between the service and a
//! document store. A store owns everything a real database would: id
//! assignment, timestamps, the unique index on `studentId`, filtering,
//! sorting and paging. The service never mutates a record itself.
//!
//! # Example Usage
//!
//! ```rust
//! use registration_service::model::NewRegistration;
//! use registration_service::query::RegistrationQuery;
//! use registration_service::storage::{InMemoryStore, RegistrationStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryStore::new();
//! store.init().await?;
//!
//! let stored = store
//!     .insert(NewRegistration::new("2021-1-60-001", "Alice", "alice@ewu.edu"))
//!     .await?;
//!
//! let found = store.find_by_id(&stored.id).await?;
//! assert_eq!(found, Some(stored.clone()));
//!
//! let page = store.find_page(&RegistrationQuery::new(), 0, 10).await?;
//! assert_eq!(page.total, 1);
//!
//! let removed = store.delete(&stored.id).await?;
//! assert!(removed.is_some());
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod errors;
pub mod in_memory;

pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::StorageError;
pub use in_memory::{InMemoryStore, InMemoryStoreStats};

use crate::model::{NewRegistration, Registration, RegistrationId, RegistrationPayload};
use crate::query::RegistrationQuery;
use std::future::Future;

/// One page of matching records plus the size of the full match set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryPage {
    pub records: Vec<Registration>,
    pub total: usize,
}

/// Persistence operations for registration records.
///
/// # Behavior
///
/// - `insert` assigns the id and both timestamps and enforces `studentId`
///   uniqueness atomically with the write.
/// - `update` merges only the supplied fields, refreshes `updatedAt` and
///   re-checks uniqueness when `studentId` changes.
/// - `find_page` sorts by `createdAt` descending, ties broken by id
///   descending.
/// - After `shutdown` every call fails with [`StorageError::Unavailable`]
///   until `init` is called again.
pub trait RegistrationStore: Send + Sync {
    /// Open the store and make sure the `studentId` unique index exists.
    fn init(&self) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Persist a new record and return it as stored.
    fn insert(
        &self,
        registration: NewRegistration,
    ) -> impl Future<Output = Result<Registration, StorageError>> + Send;

    fn find_by_id(
        &self,
        id: &RegistrationId,
    ) -> impl Future<Output = Result<Option<Registration>, StorageError>> + Send;

    /// Records matching `query`, newest first, skipping `offset` and
    /// returning at most `limit`.
    fn find_page(
        &self,
        query: &RegistrationQuery,
        offset: usize,
        limit: usize,
    ) -> impl Future<Output = Result<QueryPage, StorageError>> + Send;

    fn count(
        &self,
        query: &RegistrationQuery,
    ) -> impl Future<Output = Result<usize, StorageError>> + Send;

    /// Merge `changes` into the record. `None` when no record has `id`.
    fn update(
        &self,
        id: &RegistrationId,
        changes: RegistrationPayload,
    ) -> impl Future<Output = Result<Option<Registration>, StorageError>> + Send;

    /// Remove the record and return its last content. `None` when absent.
    fn delete(
        &self,
        id: &RegistrationId,
    ) -> impl Future<Output = Result<Option<Registration>, StorageError>> + Send;

    /// Close the store.
    fn shutdown(&self) -> impl Future<Output = Result<(), StorageError>> + Send;
}
