//! Record aggregate and the draft it is created from.

use super::{FieldChange, RecordChanges, RecordDetails, RecordId, RecordTitle};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A stored record.
///
/// `created_at` never changes after insertion. `updated_at` stays `None`
/// until the first update and is re-stamped on every update after that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    id: RecordId,
    title: RecordTitle,
    details: Option<RecordDetails>,
    is_done: bool,
    record_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedRecordData {
    /// Persisted record identifier.
    pub id: RecordId,
    /// Persisted title.
    pub title: RecordTitle,
    /// Persisted details, if any.
    pub details: Option<RecordDetails>,
    /// Persisted completion flag.
    pub is_done: bool,
    /// Persisted due date, if any.
    pub record_date: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted modification timestamp, if the record was ever updated.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record {
    /// Reconstructs a record from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedRecordData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            details: data.details,
            is_done: data.is_done,
            record_date: data.record_date,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> RecordId {
        self.id
    }

    /// Returns the record title.
    #[must_use]
    pub const fn title(&self) -> &RecordTitle {
        &self.title
    }

    /// Returns the record details, if any.
    #[must_use]
    pub const fn details(&self) -> Option<&RecordDetails> {
        self.details.as_ref()
    }

    /// Returns whether the record is marked done.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.is_done
    }

    /// Returns the record due date, if any.
    #[must_use]
    pub const fn record_date(&self) -> Option<DateTime<Utc>> {
        self.record_date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the modification timestamp, or `None` if never updated.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Applies a sparse set of changes and stamps the modification time.
    ///
    /// Fields left as [`FieldChange::Unchanged`] keep their current value.
    /// The modification time is set to the supplied timestamp even when no
    /// field changes or the new values equal the old ones.
    pub fn apply_changes(&mut self, changes: &RecordChanges, updated_at: DateTime<Utc>) {
        merge_field(&mut self.title, changes.title());
        merge_field(&mut self.details, changes.details());
        merge_field(&mut self.is_done, changes.is_done());
        merge_field(&mut self.record_date, changes.record_date());
        self.updated_at = Some(updated_at);
    }
}

/// Copies a present change onto its target field.
fn merge_field<T: Clone>(target: &mut T, change: &FieldChange<T>) {
    if let FieldChange::Set(value) = change {
        target.clone_from(value);
    }
}

/// Validated values for a record that has not been stored yet.
///
/// The store assigns the identifier on insertion; the creation timestamp is
/// taken from the clock when the draft is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    title: RecordTitle,
    details: Option<RecordDetails>,
    is_done: bool,
    record_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl RecordDraft {
    /// Creates a draft with the given title, no details, not done, and no
    /// due date.
    #[must_use]
    pub fn new(title: RecordTitle, clock: &impl Clock) -> Self {
        Self {
            title,
            details: None,
            is_done: false,
            record_date: None,
            created_at: clock.utc(),
        }
    }

    /// Sets the details.
    #[must_use]
    pub fn with_details(mut self, details: RecordDetails) -> Self {
        self.details = Some(details);
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub fn with_done(mut self, is_done: bool) -> Self {
        self.is_done = is_done;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_record_date(mut self, record_date: DateTime<Utc>) -> Self {
        self.record_date = Some(record_date);
        self
    }

    /// Returns the draft title.
    #[must_use]
    pub const fn title(&self) -> &RecordTitle {
        &self.title
    }

    /// Returns the draft details, if any.
    #[must_use]
    pub const fn details(&self) -> Option<&RecordDetails> {
        self.details.as_ref()
    }

    /// Returns the draft completion flag.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.is_done
    }

    /// Returns the draft due date, if any.
    #[must_use]
    pub const fn record_date(&self) -> Option<DateTime<Utc>> {
        self.record_date
    }

    /// Returns the creation timestamp stamped on the draft.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Converts the draft into a stored record with the assigned identifier.
    #[must_use]
    pub fn into_record(self, id: RecordId) -> Record {
        Record {
            id,
            title: self.title,
            details: self.details,
            is_done: self.is_done,
            record_date: self.record_date,
            created_at: self.created_at,
            updated_at: None,
        }
    }
}
