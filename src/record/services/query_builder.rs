//! Translation of validated list criteria into a store query.

use crate::record::domain::{
    Pagination, RecordPredicate, RecordQuery, SortDirection, SortField,
};
use chrono::{DateTime, Utc};

/// Validated list-request criteria.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListCriteria {
    /// Free-text search over title and details.
    pub search: Option<String>,
    /// Completion flag filter.
    pub is_done: Option<bool>,
    /// Inclusive upper bound on the due date.
    pub record_date_before: Option<DateTime<Utc>>,
    /// Inclusive lower bound on the due date.
    pub record_date_after: Option<DateTime<Utc>>,
    /// Sort field.
    pub sort: SortField,
    /// Sort direction.
    pub direction: SortDirection,
    /// Result window.
    pub pagination: Pagination,
}

/// Builds the store query for `criteria`.
///
/// Each present criterion contributes one predicate; the store combines
/// them with logical AND. An empty search string adds no predicate.
#[must_use]
pub fn build_query(criteria: &ListCriteria) -> RecordQuery {
    let mut query = RecordQuery::new()
        .sorted_by(criteria.sort, criteria.direction)
        .paginated(criteria.pagination);

    if let Some(search) = criteria.search.as_deref().filter(|text| !text.is_empty()) {
        query = query.with_predicate(RecordPredicate::TextContains(search.to_owned()));
    }
    if let Some(is_done) = criteria.is_done {
        query = query.with_predicate(RecordPredicate::IsDone(is_done));
    }
    if let Some(bound) = criteria.record_date_before {
        query = query.with_predicate(RecordPredicate::RecordDateOnOrBefore(bound));
    }
    if let Some(bound) = criteria.record_date_after {
        query = query.with_predicate(RecordPredicate::RecordDateOnOrAfter(bound));
    }
    query
}
