//! Error types for record domain validation and parsing.

use super::{SortDirection, SortField};
use thiserror::Error;

/// Errors returned while constructing domain record values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordDomainError {
    /// The title length falls outside the accepted bounds.
    #[error("title must be between {min} and {max} characters, got {length}")]
    TitleLength {
        /// Character count of the rejected title.
        length: usize,
        /// Minimum accepted length.
        min: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// The details text exceeds the accepted length.
    #[error("details must be at most {max} characters, got {length}")]
    DetailsTooLong {
        /// Character count of the rejected details.
        length: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// The page size falls outside the accepted bounds.
    #[error("limit must be between {min} and {max}, got {value}")]
    InvalidLimit {
        /// Rejected page size.
        value: u64,
        /// Minimum accepted page size.
        min: u32,
        /// Maximum accepted page size.
        max: u32,
    },
}

/// Error returned when a sort field name is not in the accepted set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid sort field '{0}', expected one of: {accepted}", accepted = SortField::accepted_values())]
pub struct ParseSortFieldError(pub String);

/// Error returned when a sort order is not in the accepted set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid sort order '{0}', expected one of: {accepted}", accepted = SortDirection::accepted_values())]
pub struct ParseSortDirectionError(pub String);
