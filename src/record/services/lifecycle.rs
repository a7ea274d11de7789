//! Service layer for record creation, retrieval, listing, update, and
//! deletion.

use super::{
    query_builder::build_query,
    validation::{
        CreateRecordRequest, ListRecordsRequest, RequestValidationError, UpdateRecordRequest,
        validate_create, validate_list, validate_update,
    },
};
use crate::record::{
    domain::{Record, RecordId},
    ports::{RecordRepository, RecordRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for record operations.
#[derive(Debug, Clone, Error)]
pub enum RecordServiceError {
    /// List query parameters failed validation.
    #[error("invalid query parameters: {0}")]
    InvalidQuery(RequestValidationError),
    /// A create or update body failed validation.
    #[error("invalid request body: {0}")]
    InvalidPayload(RequestValidationError),
    /// The targeted record does not exist.
    #[error("record not found: {0}")]
    NotFound(RecordId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(RecordRepositoryError),
}

impl From<RecordRepositoryError> for RecordServiceError {
    fn from(err: RecordRepositoryError) -> Self {
        match err {
            RecordRepositoryError::NotFound(id) => Self::NotFound(id),
            other @ RecordRepositoryError::Persistence(_) => Self::Repository(other),
        }
    }
}

/// Result type for record service operations.
pub type RecordServiceResult<T> = Result<T, RecordServiceError>;

/// Record lifecycle orchestration service.
///
/// Validates requests, stamps timestamps from the injected clock, and
/// delegates persistence to the repository.
pub struct RecordService<R, C>
where
    R: RecordRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for RecordService<R, C>
where
    R: RecordRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> RecordService<R, C>
where
    R: RecordRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new record service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns the current time of the injected clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    /// Validates and stores a new record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordServiceError::InvalidPayload`] when the body is
    /// invalid, or [`RecordServiceError::Repository`] on storage faults.
    pub async fn create(&self, request: &CreateRecordRequest) -> RecordServiceResult<Record> {
        let draft = validate_create(request, &*self.clock).map_err(RecordServiceError::InvalidPayload)?;
        let record = self.repository.insert(&draft).await?;
        tracing::info!(record_id = %record.id(), "created record");
        Ok(record)
    }

    /// Retrieves a record by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RecordServiceError::NotFound`] when the record does not
    /// exist, or [`RecordServiceError::Repository`] on storage faults.
    pub async fn get(&self, id: RecordId) -> RecordServiceResult<Record> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(RecordServiceError::NotFound(id))
    }

    /// Lists records matching the query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`RecordServiceError::InvalidQuery`] when a parameter is
    /// invalid, or [`RecordServiceError::Repository`] on storage faults.
    pub async fn list(&self, request: &ListRecordsRequest) -> RecordServiceResult<Vec<Record>> {
        let criteria = validate_list(request).map_err(RecordServiceError::InvalidQuery)?;
        let query = build_query(&criteria);
        tracing::debug!(
            predicates = query.predicates().len(),
            sort = query.sort_field().as_str(),
            order = query.direction().as_str(),
            offset = query.pagination().offset(),
            limit = query.pagination().limit(),
            "listing records"
        );
        Ok(self.repository.query(&query).await?)
    }

    /// Applies a partial update and stamps the modification time.
    ///
    /// # Errors
    ///
    /// Returns [`RecordServiceError::InvalidPayload`] when the body is
    /// invalid, [`RecordServiceError::NotFound`] when the record does not
    /// exist, or [`RecordServiceError::Repository`] on storage faults.
    pub async fn update(
        &self,
        id: RecordId,
        request: &UpdateRecordRequest,
    ) -> RecordServiceResult<Record> {
        let changes = validate_update(request).map_err(RecordServiceError::InvalidPayload)?;
        let record = self.repository.update(id, &changes, self.clock.utc()).await?;
        tracing::info!(
            record_id = %id,
            fields = ?changes.present_fields(),
            "updated record"
        );
        Ok(record)
    }

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordServiceError::NotFound`] when the record does not
    /// exist, or [`RecordServiceError::Repository`] on storage faults.
    pub async fn delete(&self, id: RecordId) -> RecordServiceResult<()> {
        self.repository.delete(id).await?;
        tracing::info!(record_id = %id, "deleted record");
        Ok(())
    }
}
