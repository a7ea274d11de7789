//! Repository port for record persistence and querying.

use crate::record::domain::{Record, RecordChanges, RecordDraft, RecordId, RecordQuery};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for record repository operations.
pub type RecordRepositoryResult<T> = Result<T, RecordRepositoryError>;

/// Record persistence contract.
///
/// Every mutating operation is atomic: on failure no partial change is
/// visible and no partially applied record is returned. Concurrent updates
/// to the same record resolve as last committed write wins.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Stores a new record, assigning its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RecordRepositoryError::Persistence`] on storage faults.
    async fn insert(&self, draft: &RecordDraft) -> RecordRepositoryResult<Record>;

    /// Finds a record by identifier.
    ///
    /// Returns `None` when the record does not exist.
    async fn find_by_id(&self, id: RecordId) -> RecordRepositoryResult<Option<Record>>;

    /// Returns the records matching every predicate of the query, ordered
    /// and windowed as the query specifies.
    ///
    /// An offset past the end of the matching rows yields an empty list.
    async fn query(&self, query: &RecordQuery) -> RecordRepositoryResult<Vec<Record>>;

    /// Applies the present fields of `changes` to the record and sets its
    /// modification time to `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordRepositoryError::NotFound`] when the record does not
    /// exist.
    async fn update(
        &self,
        id: RecordId,
        changes: &RecordChanges,
        updated_at: DateTime<Utc>,
    ) -> RecordRepositoryResult<Record>;

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordRepositoryError::NotFound`] when the record does not
    /// exist, including when it was already deleted.
    async fn delete(&self, id: RecordId) -> RecordRepositoryResult<()>;
}

/// Errors returned by record repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RecordRepositoryError {
    /// The record was not found.
    #[error("record not found: {0}")]
    NotFound(RecordId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RecordRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<diesel::result::Error> for RecordRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}
