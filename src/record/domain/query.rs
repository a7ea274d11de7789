//! Query model for listing records.
//!
//! A [`RecordQuery`] is a list of AND-combined predicates, a sort field and
//! direction, and a pagination window. Store adapters translate it into
//! their native query form; [`RecordQuery::matches`] and
//! [`RecordQuery::compare`] give the reference semantics.

use super::{ParseSortDirectionError, ParseSortFieldError, Record, RecordDomainError};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Default number of records returned per page.
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Largest accepted page size.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Field a record listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortField {
    /// Record identifier.
    Id,
    /// Record title.
    Title,
    /// Completion flag.
    IsDone,
    /// Due date.
    RecordDate,
    /// Creation timestamp.
    #[default]
    CreatedAt,
    /// Modification timestamp.
    UpdatedAt,
}

impl SortField {
    /// Every accepted sort field, in canonical order.
    pub const ALL: [Self; 6] = [
        Self::Id,
        Self::Title,
        Self::IsDone,
        Self::RecordDate,
        Self::CreatedAt,
        Self::UpdatedAt,
    ];

    /// Returns the query-parameter name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::IsDone => "is_done",
            Self::RecordDate => "record_date",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }

    /// Returns the accepted field names as a comma-separated list.
    #[must_use]
    pub fn accepted_values() -> String {
        Self::ALL.map(Self::as_str).join(", ")
    }

    /// Compares two records by this field in ascending order.
    ///
    /// Missing values of nullable fields order after every present value.
    #[must_use]
    pub fn compare(self, left: &Record, right: &Record) -> Ordering {
        match self {
            Self::Id => left.id().cmp(&right.id()),
            Self::Title => left.title().as_str().cmp(right.title().as_str()),
            Self::IsDone => left.is_done().cmp(&right.is_done()),
            Self::RecordDate => compare_nulls_last(left.record_date(), right.record_date()),
            Self::CreatedAt => left.created_at().cmp(&right.created_at()),
            Self::UpdatedAt => compare_nulls_last(left.updated_at(), right.updated_at()),
        }
    }
}

impl TryFrom<&str> for SortField {
    type Error = ParseSortFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == value)
            .ok_or_else(|| ParseSortFieldError(value.to_owned()))
    }
}

fn compare_nulls_last<T: Ord>(left: Option<T>, right: Option<T>) -> Ordering {
    match (left, right) {
        (Some(l), Some(r)) => l.cmp(&r),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort direction for a record listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    /// Smallest values first.
    Asc,
    /// Largest values first.
    #[default]
    Desc,
}

impl SortDirection {
    /// Returns the query-parameter spelling of the direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Returns the accepted direction names as a comma-separated list.
    #[must_use]
    pub fn accepted_values() -> String {
        [Self::Asc, Self::Desc].map(Self::as_str).join(", ")
    }

    /// Orients an ascending comparison result in this direction.
    #[must_use]
    pub const fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl TryFrom<&str> for SortDirection {
    type Error = ParseSortDirectionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ParseSortDirectionError(value.to_owned())),
        }
    }
}

/// Single filter condition on a record listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordPredicate {
    /// Title or details contain the text, ignoring case.
    TextContains(String),
    /// Completion flag equals the value.
    IsDone(bool),
    /// Due date is at or before the timestamp.
    RecordDateOnOrBefore(DateTime<Utc>),
    /// Due date is at or after the timestamp.
    RecordDateOnOrAfter(DateTime<Utc>),
}

impl RecordPredicate {
    /// Returns `true` when the record satisfies this predicate.
    ///
    /// Records without a due date never satisfy a due-date range.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Self::TextContains(text) => {
                let needle = text.to_lowercase();
                let in_title = record.title().as_str().to_lowercase().contains(&needle);
                let in_details = record
                    .details()
                    .is_some_and(|details| details.as_str().to_lowercase().contains(&needle));
                in_title || in_details
            }
            Self::IsDone(expected) => record.is_done() == *expected,
            Self::RecordDateOnOrBefore(bound) => {
                record.record_date().is_some_and(|date| date <= *bound)
            }
            Self::RecordDateOnOrAfter(bound) => {
                record.record_date().is_some_and(|date| date >= *bound)
            }
        }
    }
}

/// Result window of a record listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    offset: u64,
    limit: u32,
}

impl Pagination {
    /// Creates a validated pagination window.
    ///
    /// # Errors
    ///
    /// Returns [`RecordDomainError::InvalidLimit`] when `limit` is zero or
    /// greater than [`MAX_PAGE_LIMIT`].
    pub fn new(offset: u64, limit: u64) -> Result<Self, RecordDomainError> {
        let invalid = || RecordDomainError::InvalidLimit {
            value: limit,
            min: 1,
            max: MAX_PAGE_LIMIT,
        };
        let checked = u32::try_from(limit).map_err(|_| invalid())?;
        if checked == 0 || checked > MAX_PAGE_LIMIT {
            return Err(invalid());
        }
        Ok(Self {
            offset,
            limit: checked,
        })
    }

    /// Returns the number of leading rows skipped.
    #[must_use]
    pub const fn offset(self) -> u64 {
        self.offset
    }

    /// Returns the maximum number of rows returned.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// Filtered, sorted, paginated record listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordQuery {
    predicates: Vec<RecordPredicate>,
    sort_field: SortField,
    direction: SortDirection,
    pagination: Pagination,
}

impl RecordQuery {
    /// Creates a query with no predicates, sorted by creation time
    /// descending, returning the first page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a predicate; all predicates must hold for a record to match.
    #[must_use]
    pub fn with_predicate(mut self, predicate: RecordPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Sets the sort field and direction.
    #[must_use]
    pub fn sorted_by(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort_field = field;
        self.direction = direction;
        self
    }

    /// Sets the pagination window.
    #[must_use]
    pub fn paginated(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    /// Returns the predicates.
    #[must_use]
    pub fn predicates(&self) -> &[RecordPredicate] {
        &self.predicates
    }

    /// Returns the sort field.
    #[must_use]
    pub const fn sort_field(&self) -> SortField {
        self.sort_field
    }

    /// Returns the sort direction.
    #[must_use]
    pub const fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Returns the pagination window.
    #[must_use]
    pub const fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Returns `true` when the record satisfies every predicate.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.predicates
            .iter()
            .all(|predicate| predicate.matches(record))
    }

    /// Orders two records by the sort field in the sort direction, breaking
    /// ties by ascending identifier.
    #[must_use]
    pub fn compare(&self, left: &Record, right: &Record) -> Ordering {
        self.direction
            .orient(self.sort_field.compare(left, right))
            .then_with(|| left.id().cmp(&right.id()))
    }
}
