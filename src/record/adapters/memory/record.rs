//! In-memory record repository for tests and local runs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::record::{
    domain::{Record, RecordChanges, RecordDraft, RecordId, RecordQuery},
    ports::{RecordRepository, RecordRepositoryError, RecordRepositoryResult},
};

/// Thread-safe in-memory record repository.
///
/// Identifiers start at 1 and increase monotonically; deleted identifiers
/// are not handed out again.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordRepository {
    state: Arc<RwLock<InMemoryRecordState>>,
}

#[derive(Debug, Default)]
struct InMemoryRecordState {
    last_id: i64,
    records: BTreeMap<RecordId, Record>,
}

impl InMemoryRecordRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    ///
    /// # Errors
    ///
    /// Returns [`RecordRepositoryError::Persistence`] when the state lock is
    /// poisoned.
    pub fn len(&self) -> RecordRepositoryResult<usize> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.records.len())
    }

    /// Returns `true` when no records are stored.
    ///
    /// # Errors
    ///
    /// Returns [`RecordRepositoryError::Persistence`] when the state lock is
    /// poisoned.
    pub fn is_empty(&self) -> RecordRepositoryResult<bool> {
        Ok(self.len()? == 0)
    }
}

fn lock_error<E: std::fmt::Display>(err: E) -> RecordRepositoryError {
    RecordRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl RecordRepository for InMemoryRecordRepository {
    async fn insert(&self, draft: &RecordDraft) -> RecordRepositoryResult<Record> {
        let mut state = self.state.write().map_err(lock_error)?;
        let next_id = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| lock_error("record identifier space exhausted"))?;
        let id = RecordId::new(next_id);
        let record = draft.clone().into_record(id);
        state.last_id = next_id;
        state.records.insert(id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: RecordId) -> RecordRepositoryResult<Option<Record>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.records.get(&id).cloned())
    }

    async fn query(&self, query: &RecordQuery) -> RecordRepositoryResult<Vec<Record>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut matching: Vec<&Record> = state
            .records
            .values()
            .filter(|record| query.matches(record))
            .collect();
        matching.sort_by(|left, right| query.compare(left, right));

        let pagination = query.pagination();
        let offset = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(pagination.limit()).unwrap_or(usize::MAX);
        Ok(matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: RecordId,
        changes: &RecordChanges,
        updated_at: DateTime<Utc>,
    ) -> RecordRepositoryResult<Record> {
        let mut state = self.state.write().map_err(lock_error)?;
        let record = state
            .records
            .get_mut(&id)
            .ok_or(RecordRepositoryError::NotFound(id))?;
        record.apply_changes(changes, updated_at);
        Ok(record.clone())
    }

    async fn delete(&self, id: RecordId) -> RecordRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or(RecordRepositoryError::NotFound(id))
    }
}
