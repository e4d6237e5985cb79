//! In-memory adapter for the data access port.
//!
//! Records live in an ordered map guarded by an async `RwLock`, so listing
//! returns them by ascending id. Identifiers start at 1 and are never reused,
//! even after deletion. Timestamps come from the injected clock.
//!
//! Drafts and patches arrive as raw JSON objects. The store reads `name`,
//! `email`, `password` and `role`, rejects them with 400 when they are not
//! strings, and ignores every other member.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ports::{DataAccessError, DataAccessService};
use crate::domain::{DeletionReceipt, Record, RecordDraft, RecordId, RecordPatch, RequestedId};

#[derive(Debug)]
struct StoreState {
    next_id: i64,
    records: BTreeMap<RecordId, Record>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            next_id: 1,
            records: BTreeMap::new(),
        }
    }
}

impl StoreState {
    fn email_taken(&self, email: &str, except: Option<RecordId>) -> bool {
        !email.is_empty()
            && self
                .records
                .values()
                .any(|record| record.email == email && Some(record.id) != except)
    }

    fn allocate_id(&mut self) -> Result<RecordId, DataAccessError> {
        let id = RecordId::new(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| DataAccessError::store("record identifiers exhausted"))?;
        Ok(id)
    }
}

/// Process-local record store.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use data_api::domain::ports::DataAccessService;
/// use data_api::domain::RecordDraft;
/// use data_api::outbound::memory::InMemoryDataStore;
/// use mockable::DefaultClock;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let store = InMemoryDataStore::new(Arc::new(DefaultClock));
/// let record = store.create(RecordDraft::default()).await.expect("created");
/// assert_eq!(record.id.get(), 1);
/// # });
/// ```
pub struct InMemoryDataStore {
    state: RwLock<StoreState>,
    clock: Arc<dyn Clock>,
}

impl InMemoryDataStore {
    /// Create an empty store stamping records with `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            clock,
        }
    }
}

#[async_trait]
impl DataAccessService for InMemoryDataStore {
    async fn list_all(&self) -> Result<Vec<Record>, DataAccessError> {
        let state = self.state.read().await;
        Ok(state.records.values().cloned().collect())
    }

    async fn get_by_id(&self, id: RequestedId) -> Result<Record, DataAccessError> {
        let id = DataAccessError::require_number(&id)?;
        let state = self.state.read().await;
        state
            .records
            .get(&id)
            .cloned()
            .ok_or_else(|| DataAccessError::not_found(id))
    }

    async fn create(&self, draft: RecordDraft) -> Result<Record, DataAccessError> {
        let mut state = self.state.write().await;
        if let Some(email) = draft.email()?.filter(|email| state.email_taken(email, None)) {
            return Err(DataAccessError::duplicate_email(email));
        }
        let now = self.clock.utc();
        let record = Record::from_draft(RecordId::new(state.next_id), &draft, now)?;
        let id = state.allocate_id()?;
        state.records.insert(id, record.clone());
        debug!(record_id = %id, "record created");
        Ok(record)
    }

    async fn update(
        &self,
        id: RequestedId,
        patch: RecordPatch,
    ) -> Result<Record, DataAccessError> {
        let id = DataAccessError::require_number(&id)?;
        let mut state = self.state.write().await;
        if let Some(email) = patch
            .email()?
            .filter(|email| state.email_taken(email, Some(id)))
        {
            return Err(DataAccessError::duplicate_email(email));
        }
        let now = self.clock.utc();
        let record = state
            .records
            .get_mut(&id)
            .ok_or_else(|| DataAccessError::not_found(id))?;
        record.apply(&patch, now)?;
        debug!(record_id = %id, "record updated");
        Ok(record.clone())
    }

    async fn delete(&self, id: RequestedId) -> Result<DeletionReceipt, DataAccessError> {
        let id = DataAccessError::require_number(&id)?;
        let mut state = self.state.write().await;
        state
            .records
            .remove(&id)
            .ok_or_else(|| DataAccessError::not_found(id))?;
        debug!(record_id = %id, "record deleted");
        Ok(DeletionReceipt::for_record(id))
    }
}

#[cfg(test)]
mod tests;
