//! Validated text fields carried by a record.
//!
//! Lengths are counted in characters, not bytes.

use super::RecordDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum title length, in characters.
pub const TITLE_MIN_LENGTH: usize = 2;

/// Maximum title length, matching the `VARCHAR(75)` column.
pub const TITLE_MAX_LENGTH: usize = 75;

/// Maximum details length, matching the `VARCHAR(500)` column.
pub const DETAILS_MAX_LENGTH: usize = 500;

/// Record title of 2 to 75 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordTitle(String);

impl RecordTitle {
    /// Creates a validated title.
    ///
    /// The value is stored as given; surrounding whitespace counts towards
    /// the length.
    ///
    /// # Errors
    ///
    /// Returns [`RecordDomainError::TitleLength`] when the value is shorter
    /// than [`TITLE_MIN_LENGTH`] or longer than [`TITLE_MAX_LENGTH`].
    pub fn new(value: impl Into<String>) -> Result<Self, RecordDomainError> {
        let raw = value.into();
        let length = raw.chars().count();
        if !(TITLE_MIN_LENGTH..=TITLE_MAX_LENGTH).contains(&length) {
            return Err(RecordDomainError::TitleLength {
                length,
                min: TITLE_MIN_LENGTH,
                max: TITLE_MAX_LENGTH,
            });
        }
        Ok(Self(raw))
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RecordTitle {
    type Error = RecordDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecordTitle> for String {
    fn from(value: RecordTitle) -> Self {
        value.0
    }
}

impl AsRef<str> for RecordTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RecordTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-form record details of at most 500 characters.
///
/// The empty string is a valid value and is distinct from absent details.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordDetails(String);

impl RecordDetails {
    /// Creates validated details text.
    ///
    /// # Errors
    ///
    /// Returns [`RecordDomainError::DetailsTooLong`] when the value exceeds
    /// [`DETAILS_MAX_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, RecordDomainError> {
        let raw = value.into();
        let length = raw.chars().count();
        if length > DETAILS_MAX_LENGTH {
            return Err(RecordDomainError::DetailsTooLong {
                length,
                max: DETAILS_MAX_LENGTH,
            });
        }
        Ok(Self(raw))
    }

    /// Returns the details as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RecordDetails {
    type Error = RecordDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecordDetails> for String {
    fn from(value: RecordDetails) -> Self {
        value.0
    }
}

impl AsRef<str> for RecordDetails {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RecordDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
