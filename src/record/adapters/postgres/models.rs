//! Diesel row models for record persistence.

use super::schema::records;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecordRow {
    /// Store-assigned record identifier.
    pub id: i64,
    /// Record title.
    pub title: String,
    /// Optional details.
    pub details: Option<String>,
    /// Completion flag.
    pub is_done: bool,
    /// Optional due date.
    pub record_date: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Modification timestamp.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insert model for records; the identifier comes from the sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = records)]
pub struct NewRecordRow {
    /// Record title.
    pub title: String,
    /// Optional details.
    pub details: Option<String>,
    /// Completion flag.
    pub is_done: bool,
    /// Optional due date.
    pub record_date: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Full-row changeset written after merging an update.
///
/// `None` values are written as SQL `NULL` so cleared fields are persisted.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = records)]
#[diesel(treat_none_as_null = true)]
pub struct RecordChangeset {
    /// Record title.
    pub title: String,
    /// Optional details.
    pub details: Option<String>,
    /// Completion flag.
    pub is_done: bool,
    /// Optional due date.
    pub record_date: Option<DateTime<Utc>>,
    /// Modification timestamp.
    pub updated_at: Option<DateTime<Utc>>,
}
