//! Request validation for list queries and record payloads.
//!
//! Raw request values arrive as strings and optional JSON fields. The
//! validators here turn them into domain values or report every offending
//! field at once, before anything reaches the store.

use super::query_builder::ListCriteria;
use crate::record::domain::{
    DEFAULT_PAGE_LIMIT, Pagination, RecordChanges, RecordDetails, RecordDraft, RecordTitle,
    SortDirection, SortField,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Naive timestamp layouts accepted in addition to RFC 3339. They are
/// interpreted as UTC.
const NAIVE_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const TIMESTAMP_HINT: &str = "must be an ISO-8601 timestamp such as 2025-01-01T00:00:00Z";

/// Raw query parameters of the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListRecordsRequest {
    /// Free-text search over title and details.
    pub q: Option<String>,
    /// Completion flag filter.
    pub is_done: Option<String>,
    /// Inclusive upper bound on the due date.
    pub record_date_before: Option<String>,
    /// Inclusive lower bound on the due date.
    pub record_date_after: Option<String>,
    /// Sort field name.
    pub sort: Option<String>,
    /// Sort order, `asc` or `desc`.
    pub order: Option<String>,
    /// Number of leading rows to skip.
    pub offset: Option<String>,
    /// Maximum number of rows to return.
    pub limit: Option<String>,
}

/// Body of a create request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateRecordRequest {
    /// Record title; required.
    #[serde(default)]
    pub title: Option<String>,
    /// Optional details.
    #[serde(default)]
    pub details: Option<String>,
    /// Completion flag; defaults to `false`.
    #[serde(default)]
    pub is_done: Option<bool>,
    /// Optional due date as an ISO-8601 string.
    #[serde(default)]
    pub record_date: Option<String>,
}

/// Body of a partial update request.
///
/// The outer `Option` records whether the field was present in the body;
/// the inner one whether it was `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateRecordRequest {
    /// New title.
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    /// New details; `null` clears them.
    #[serde(default, deserialize_with = "present")]
    pub details: Option<Option<String>>,
    /// New completion flag.
    #[serde(default, deserialize_with = "present")]
    pub is_done: Option<Option<bool>>,
    /// New due date; `null` clears it.
    #[serde(default, deserialize_with = "present")]
    pub record_date: Option<Option<String>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A single rejected request field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Name of the offending field.
    pub field: &'static str,
    /// Human-readable reason.
    pub message: String,
}

impl FieldViolation {
    /// Creates a violation for `field`.
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// A request rejected because one or more fields are invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid request: {}", describe(.violations))]
pub struct RequestValidationError {
    violations: Vec<FieldViolation>,
}

impl RequestValidationError {
    /// Returns the rejected fields in the order they were checked.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Returns `true` when `field` was rejected.
    #[must_use]
    pub fn has_violation(&self, field: &str) -> bool {
        self.violations.iter().any(|violation| violation.field == field)
    }
}

impl From<FieldViolation> for RequestValidationError {
    fn from(violation: FieldViolation) -> Self {
        Self {
            violations: vec![violation],
        }
    }
}

fn describe(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|violation| format!("{}: {}", violation.field, violation.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Accumulates field violations while individual fields are validated.
#[derive(Debug, Default)]
struct Violations(Vec<FieldViolation>);

impl Violations {
    fn check<T, E: ToString>(&mut self, field: &'static str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.0.push(FieldViolation::new(field, err.to_string()));
                None
            }
        }
    }

    fn reject(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldViolation::new(field, message));
    }

    fn finish<T>(self, value: impl FnOnce() -> Option<T>) -> Result<T, RequestValidationError> {
        if !self.0.is_empty() {
            return Err(RequestValidationError { violations: self.0 });
        }
        value().ok_or_else(|| RequestValidationError {
            violations: vec![FieldViolation::new("request", "request could not be validated")],
        })
    }
}

/// Parses an ISO-8601 timestamp.
///
/// Accepts RFC 3339 with a `Z` or numeric offset, naive date-times (with
/// `T` or a space separator, optional seconds and fraction) taken as UTC,
/// and bare dates taken as midnight UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Parses a boolean query flag.
///
/// Accepts `true/false`, `1/0`, `yes/no`, and `on/off`, ignoring case.
#[must_use]
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn timestamp_field(violations: &mut Violations, field: &'static str, raw: &str) -> Option<DateTime<Utc>> {
    let parsed = parse_timestamp(raw);
    if parsed.is_none() {
        violations.reject(field, format!("{TIMESTAMP_HINT}, got '{raw}'"));
    }
    parsed
}

/// Validates list-endpoint query parameters.
///
/// # Errors
///
/// Returns [`RequestValidationError`] naming every invalid parameter.
pub fn validate_list(request: &ListRecordsRequest) -> Result<ListCriteria, RequestValidationError> {
    let mut violations = Violations::default();

    let is_done = request.is_done.as_deref().and_then(|raw| {
        let parsed = parse_flag(raw);
        if parsed.is_none() {
            violations.reject(
                "is_done",
                format!("must be one of: true, false, 1, 0, yes, no, on, off; got '{raw}'"),
            );
        }
        parsed
    });
    let record_date_before = request
        .record_date_before
        .as_deref()
        .and_then(|raw| timestamp_field(&mut violations, "record_date_before", raw));
    let record_date_after = request
        .record_date_after
        .as_deref()
        .and_then(|raw| timestamp_field(&mut violations, "record_date_after", raw));
    let sort = request
        .sort
        .as_deref()
        .map_or(Some(SortField::default()), |raw| {
            violations.check("sort", SortField::try_from(raw))
        });
    let direction = request
        .order
        .as_deref()
        .map_or(Some(SortDirection::default()), |raw| {
            violations.check("order", SortDirection::try_from(raw))
        });
    let offset = request.offset.as_deref().map_or(Some(0), |raw| {
        let parsed = raw.trim().parse::<u64>().ok();
        if parsed.is_none() {
            violations.reject("offset", format!("must be a non-negative integer, got '{raw}'"));
        }
        parsed
    });
    let limit = request
        .limit
        .as_deref()
        .map_or(Some(u64::from(DEFAULT_PAGE_LIMIT)), |raw| {
            let parsed = raw.trim().parse::<u64>().ok();
            if parsed.is_none() {
                violations.reject("limit", format!("must be a positive integer, got '{raw}'"));
            }
            parsed
        });
    let pagination = match (offset, limit) {
        (Some(skip), Some(take)) => violations.check("limit", Pagination::new(skip, take)),
        _ => None,
    };

    let search = request.q.clone();
    violations.finish(|| {
        Some(ListCriteria {
            search,
            is_done,
            record_date_before,
            record_date_after,
            sort: sort?,
            direction: direction?,
            pagination: pagination?,
        })
    })
}

/// Validates a create body into a draft stamped with the clock's time.
///
/// # Errors
///
/// Returns [`RequestValidationError`] naming every invalid field.
pub fn validate_create(
    request: &CreateRecordRequest,
    clock: &impl Clock,
) -> Result<RecordDraft, RequestValidationError> {
    let mut violations = Violations::default();

    let title = match request.title.as_deref() {
        Some(raw) => violations.check("title", RecordTitle::new(raw)),
        None => {
            violations.reject("title", "field required");
            None
        }
    };
    let details = request
        .details
        .as_deref()
        .map(|raw| violations.check("details", RecordDetails::new(raw)));
    let record_date = request
        .record_date
        .as_deref()
        .map(|raw| timestamp_field(&mut violations, "record_date", raw));

    violations.finish(|| {
        let mut draft = RecordDraft::new(title?, clock).with_done(request.is_done.unwrap_or(false));
        if let Some(valid_details) = details {
            draft = draft.with_details(valid_details?);
        }
        if let Some(valid_date) = record_date {
            draft = draft.with_record_date(valid_date?);
        }
        Some(draft)
    })
}

/// Validates a partial update body into the set of requested changes.
///
/// Absent fields stay unchanged. `details` and `record_date` may be `null`
/// to clear them; `title` and `is_done` may not.
///
/// # Errors
///
/// Returns [`RequestValidationError`] naming every invalid field.
pub fn validate_update(request: &UpdateRecordRequest) -> Result<RecordChanges, RequestValidationError> {
    let mut violations = Violations::default();
    let mut changes = RecordChanges::new();

    match &request.title {
        None => {}
        Some(None) => violations.reject("title", "may not be null"),
        Some(Some(raw)) => {
            if let Some(title) = violations.check("title", RecordTitle::new(raw.as_str())) {
                changes = changes.with_title(title);
            }
        }
    }

    match &request.details {
        None => {}
        Some(None) => changes = changes.with_details(None),
        Some(Some(raw)) => {
            if let Some(details) = violations.check("details", RecordDetails::new(raw.as_str())) {
                changes = changes.with_details(Some(details));
            }
        }
    }

    match request.is_done {
        None => {}
        Some(None) => violations.reject("is_done", "may not be null"),
        Some(Some(is_done)) => changes = changes.with_done(is_done),
    }

    match &request.record_date {
        None => {}
        Some(None) => changes = changes.with_record_date(None),
        Some(Some(raw)) => {
            if let Some(date) = timestamp_field(&mut violations, "record_date", raw) {
                changes = changes.with_record_date(Some(date));
            }
        }
    }

    violations.finish(|| Some(changes))
}
