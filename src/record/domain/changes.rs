//! Sparse update payloads for records.
//!
//! An update distinguishes a field that is absent from a field that is
//! present with an empty or null value. [`FieldChange`] carries that
//! distinction per field; [`super::Record::apply_changes`] merges it.

use super::{RecordDetails, RecordTitle};
use chrono::{DateTime, Utc};

/// Change to a single field in an update payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange<T> {
    /// The field was absent; the current value is kept.
    Unchanged,
    /// The field was present; the current value is replaced.
    Set(T),
}

impl<T> FieldChange<T> {
    /// Returns `true` when the field was present in the payload.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    /// Returns the new value, if the field was present.
    #[must_use]
    pub const fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unchanged => None,
        }
    }
}

impl<T> Default for FieldChange<T> {
    fn default() -> Self {
        Self::Unchanged
    }
}

/// Validated sparse update for a record.
///
/// Nullable fields (`details`, `record_date`) use `FieldChange<Option<_>>`
/// so that `Set(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordChanges {
    title: FieldChange<RecordTitle>,
    details: FieldChange<Option<RecordDetails>>,
    is_done: FieldChange<bool>,
    record_date: FieldChange<Option<DateTime<Utc>>>,
}

impl RecordChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: RecordTitle) -> Self {
        self.title = FieldChange::Set(title);
        self
    }

    /// Replaces the details; `None` clears them.
    #[must_use]
    pub fn with_details(mut self, details: Option<RecordDetails>) -> Self {
        self.details = FieldChange::Set(details);
        self
    }

    /// Replaces the completion flag.
    #[must_use]
    pub fn with_done(mut self, is_done: bool) -> Self {
        self.is_done = FieldChange::Set(is_done);
        self
    }

    /// Replaces the due date; `None` clears it.
    #[must_use]
    pub fn with_record_date(mut self, record_date: Option<DateTime<Utc>>) -> Self {
        self.record_date = FieldChange::Set(record_date);
        self
    }

    /// Returns the title change.
    #[must_use]
    pub const fn title(&self) -> &FieldChange<RecordTitle> {
        &self.title
    }

    /// Returns the details change.
    #[must_use]
    pub const fn details(&self) -> &FieldChange<Option<RecordDetails>> {
        &self.details
    }

    /// Returns the completion flag change.
    #[must_use]
    pub const fn is_done(&self) -> &FieldChange<bool> {
        &self.is_done
    }

    /// Returns the due date change.
    #[must_use]
    pub const fn record_date(&self) -> &FieldChange<Option<DateTime<Utc>>> {
        &self.record_date
    }

    /// Returns the names of the fields present in this change set.
    #[must_use]
    pub fn present_fields(&self) -> Vec<&'static str> {
        [
            ("title", self.title.is_set()),
            ("details", self.details.is_set()),
            ("is_done", self.is_done.is_set()),
            ("record_date", self.record_date.is_set()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }

    /// Returns `true` when no field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.present_fields().is_empty()
    }
}
