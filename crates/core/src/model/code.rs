use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Validated ISO 3166-1 alpha country code (2 or 3 ASCII letters).
///
/// Codes are normalized to uppercase, so `"de"` and `"DE"` compare equal
/// after construction. This is the identity of a country record: two
/// records with the same code are the same country.
///
/// # Examples
///
/// ```
/// # use atlas_core::model::CountryCode;
/// let code: CountryCode = "de".parse().unwrap();
/// assert_eq!(code.as_str(), "DE");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Create a validated country code.
    ///
    /// # Errors
    ///
    /// Returns `CodeError::InvalidCode` unless the trimmed input is 2 or 3
    /// ASCII letters.
    pub fn new(value: impl Into<String>) -> Result<Self, CodeError> {
        let raw = value.into();
        let trimmed = raw.trim();
        let valid = matches!(trimmed.len(), 2 | 3)
            && trimmed.chars().all(|c| c.is_ascii_alphabetic());
        if !valid {
            return Err(CodeError::InvalidCode { provided: raw });
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CountryCode({})", self.0)
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CountryCode {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = CodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CodeError {
    #[error("country code must be 2 or 3 ASCII letters, got {provided:?}")]
    InvalidCode { provided: String },
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
