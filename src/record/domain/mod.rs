//! Domain model for record keeping.
//!
//! Records, their validated field values, sparse update payloads, and the
//! query model used by list requests. All infrastructure concerns stay
//! outside of the domain boundary.

mod changes;
mod error;
mod fields;
mod ids;
mod query;
mod record;

pub use changes::{FieldChange, RecordChanges};
pub use error::{ParseSortDirectionError, ParseSortFieldError, RecordDomainError};
pub use fields::{DETAILS_MAX_LENGTH, RecordDetails, RecordTitle, TITLE_MAX_LENGTH, TITLE_MIN_LENGTH};
pub use ids::RecordId;
pub use query::{
    DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, Pagination, RecordPredicate, RecordQuery, SortDirection,
    SortField,
};
pub use record::{PersistedRecordData, Record, RecordDraft};
