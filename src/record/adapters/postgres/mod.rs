//! `PostgreSQL` adapters for record persistence.

mod models;
mod repository;
mod schema;

pub use repository::{CREATE_RECORDS_SQL, PostgresRecordRepository, RecordPgPool};
