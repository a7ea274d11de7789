//! JSON response bodies.

use crate::record::domain::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record representation returned by every record endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordResponse {
    /// Record identifier.
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
    /// Modification timestamp; `null` until the first update.
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Record> for RecordResponse {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id().value(),
            title: record.title().as_str().to_owned(),
            details: record.details().map(|details| details.as_str().to_owned()),
            is_done: record.is_done(),
            record_date: record.record_date(),
            created_at: record.created_at(),
            updated_at: record.updated_at(),
        }
    }
}

impl From<Record> for RecordResponse {
    fn from(record: Record) -> Self {
        Self::from(&record)
    }
}

/// Liveness check body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process serves requests.
    pub status: String,
    /// Time the check was answered.
    pub timestamp: DateTime<Utc>,
}

/// Body served at `/` when no `index.html` is available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelcomeResponse {
    /// Greeting text.
    pub message: String,
}
