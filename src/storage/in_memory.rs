//! In-memory registration store.
//!
//! A thread-safe implementation of [`RegistrationStore`] built on a
//! `HashMap` behind a tokio `RwLock`. Records and the `studentId` unique
//! index live under the same lock, so a uniqueness check and the write that
//! follows it can never interleave with another writer.
//!
//! # Performance Characteristics
//!
//! * insert/update/delete/find_by_id: O(1) average case
//! * find_page/count: O(n) over all records, plus a sort for find_page

use super::{Clock, QueryPage, RegistrationStore, StorageError, SystemClock};
use crate::model::{NewRegistration, Registration, RegistrationId, RegistrationPayload};
use crate::query::RegistrationQuery;
use chrono::{DateTime, Utc};
use log::{debug, trace};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

const STUDENT_ID_FIELD: &str = "studentId";

#[derive(Debug)]
struct StoreState {
    records: HashMap<RegistrationId, Registration>,
    // studentId -> id of the record holding it
    student_index: HashMap<String, RegistrationId>,
    open: bool,
}

impl StoreState {
    fn ensure_open(&self) -> Result<(), StorageError> {
        if self.open {
            Ok(())
        } else {
            Err(StorageError::unavailable("registration store is closed"))
        }
    }

    fn rebuild_index(&mut self) -> Result<(), StorageError> {
        let mut index = HashMap::with_capacity(self.records.len());
        for record in self.records.values() {
            if index
                .insert(record.student_id.clone(), record.id.clone())
                .is_some()
            {
                return Err(StorageError::duplicate_key(
                    STUDENT_ID_FIELD,
                    record.student_id.clone(),
                ));
            }
        }
        self.student_index = index;
        Ok(())
    }
}

/// Thread-safe in-memory registration store.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryStore {
    /// Create an empty store using wall-clock time.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty store reading time from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState {
                records: HashMap::new(),
                student_index: HashMap::new(),
                open: true,
            })),
            clock,
        }
    }

    /// Get storage statistics for debugging and monitoring.
    pub async fn stats(&self) -> InMemoryStoreStats {
        let state = self.state.read().await;
        InMemoryStoreStats {
            total_records: state.records.len(),
            indexed_student_ids: state.student_index.len(),
            open: state.open,
        }
    }

    /// Remove every record (useful for testing).
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.records.clear();
        state.student_index.clear();
    }

    fn next_id(
        records: &HashMap<RegistrationId, Registration>,
        now: DateTime<Utc>,
    ) -> RegistrationId {
        loop {
            let id = RegistrationId::generate(now);
            if !records.contains_key(&id) {
                return id;
            }
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationStore for InMemoryStore {
    async fn init(&self) -> Result<(), StorageError> {
        let mut state = self.state.write().await;
        state.rebuild_index()?;
        state.open = true;
        debug!(
            "Registration store opened with {} records",
            state.records.len()
        );
        Ok(())
    }

    async fn insert(&self, registration: NewRegistration) -> Result<Registration, StorageError> {
        let mut state = self.state.write().await;
        state.ensure_open()?;

        if state.student_index.contains_key(&registration.student_id) {
            return Err(StorageError::duplicate_key(
                STUDENT_ID_FIELD,
                registration.student_id,
            ));
        }

        let now = self.clock.now();
        let id = Self::next_id(&state.records, now);
        let record = Registration::from_new(id.clone(), registration, now);

        state
            .student_index
            .insert(record.student_id.clone(), id.clone());
        state.records.insert(id, record.clone());
        trace!("Inserted registration {}", record.id);

        Ok(record)
    }

    async fn find_by_id(&self, id: &RegistrationId) -> Result<Option<Registration>, StorageError> {
        let state = self.state.read().await;
        state.ensure_open()?;
        Ok(state.records.get(id).cloned())
    }

    async fn find_page(
        &self,
        query: &RegistrationQuery,
        offset: usize,
        limit: usize,
    ) -> Result<QueryPage, StorageError> {
        let state = self.state.read().await;
        state.ensure_open()?;

        let mut matching: Vec<&Registration> = state
            .records
            .values()
            .filter(|record| query.matches(record))
            .collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let total = matching.len();
        let records = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok(QueryPage { records, total })
    }

    async fn count(&self, query: &RegistrationQuery) -> Result<usize, StorageError> {
        let state = self.state.read().await;
        state.ensure_open()?;
        Ok(state
            .records
            .values()
            .filter(|record| query.matches(record))
            .count())
    }

    async fn update(
        &self,
        id: &RegistrationId,
        changes: RegistrationPayload,
    ) -> Result<Option<Registration>, StorageError> {
        let mut state = self.state.write().await;
        state.ensure_open()?;

        let Some(existing) = state.records.get(id) else {
            return Ok(None);
        };
        let previous_student_id = existing.student_id.clone();

        if let Some(student_id) = changes.student_id.as_deref() {
            if let Some(holder) = state.student_index.get(student_id) {
                if holder != id {
                    return Err(StorageError::duplicate_key(STUDENT_ID_FIELD, student_id));
                }
            }
        }

        let now = self.clock.now();
        let StoreState {
            records,
            student_index,
            ..
        } = &mut *state;
        let Some(record) = records.get_mut(id) else {
            return Ok(None);
        };
        record.merge(changes);
        record.updated_at = now;

        if record.student_id != previous_student_id {
            student_index.remove(&previous_student_id);
            student_index.insert(record.student_id.clone(), id.clone());
        }
        trace!("Updated registration {}", id);

        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: &RegistrationId) -> Result<Option<Registration>, StorageError> {
        let mut state = self.state.write().await;
        state.ensure_open()?;

        let removed = state.records.remove(id);
        if let Some(record) = &removed {
            state.student_index.remove(&record.student_id);
            trace!("Deleted registration {}", id);
        }
        Ok(removed)
    }

    async fn shutdown(&self) -> Result<(), StorageError> {
        let mut state = self.state.write().await;
        state.open = false;
        debug!("Registration store closed");
        Ok(())
    }
}

/// Statistics about in-memory store usage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryStoreStats {
    pub total_records: usize,
    pub indexed_student_ids: usize,
    pub open: bool,
}
