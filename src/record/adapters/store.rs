//! Storage backend selection and lifecycle.

use super::{memory::InMemoryRecordRepository, postgres::PostgresRecordRepository};
use crate::config::StorageConfig;
use crate::record::ports::{RecordRepository, RecordRepositoryResult};
use std::sync::Arc;

/// The record store opened for the lifetime of the process.
///
/// Constructed once at startup with [`RecordStore::open`], handed to the
/// HTTP layer through [`RecordStore::repository`], and released with
/// [`RecordStore::close`] once the server has stopped.
#[derive(Debug, Clone)]
pub enum RecordStore {
    /// Process-local storage.
    InMemory(Arc<InMemoryRecordRepository>),
    /// `PostgreSQL` storage.
    Postgres(Arc<PostgresRecordRepository>),
}

impl RecordStore {
    /// Opens the store selected by `config`.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the `PostgreSQL` pool cannot be
    /// created or the schema cannot be applied.
    pub async fn open(config: &StorageConfig) -> RecordRepositoryResult<Self> {
        match config {
            StorageConfig::InMemory => {
                tracing::info!("using in-memory record store");
                Ok(Self::InMemory(Arc::new(InMemoryRecordRepository::new())))
            }
            StorageConfig::Postgres {
                database_url,
                pool_size,
            } => {
                let repository = PostgresRecordRepository::connect(database_url, *pool_size).await?;
                Ok(Self::Postgres(Arc::new(repository)))
            }
        }
    }

    /// Returns the repository handle shared with request handlers.
    #[must_use]
    pub fn repository(&self) -> Arc<dyn RecordRepository> {
        match self {
            Self::InMemory(repository) => Arc::clone(repository) as Arc<dyn RecordRepository>,
            Self::Postgres(repository) => Arc::clone(repository) as Arc<dyn RecordRepository>,
        }
    }

    /// Releases the store.
    ///
    /// Pooled connections are closed once the last handle is dropped.
    pub fn close(self) {
        match self {
            Self::InMemory(_) => tracing::info!("closed in-memory record store"),
            Self::Postgres(repository) => {
                let state = repository.pool().state();
                tracing::info!(
                    connections = state.connections,
                    idle = state.idle_connections,
                    "closing PostgreSQL record store"
                );
                drop(repository);
            }
        }
    }
}
