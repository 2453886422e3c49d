use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

use atlas_core::model::{Country, CountryCode};

/// Errors surfaced by country data sources.
///
/// These propagate to callers unchanged; the source layer never retries or
/// substitutes fallback data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("country {code} not found")]
    NotFound { code: CountryCode },

    #[error("fetch failed with status {0}")]
    Status(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

/// Read access to the country collection.
///
/// The only capability the explorer and the quiz need: a full snapshot plus
/// per-code lookups for the detail view.
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Fetch the full country snapshot.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` when the fetch or decoding fails.
    async fn list_all(&self) -> Result<Vec<Country>, SourceError>;

    /// Fetch a single country by code.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::NotFound` if no such country exists, or other
    /// source errors.
    async fn get_by_code(&self, code: &CountryCode) -> Result<Country, SourceError>;

    /// Fetch several countries by code, preserving the requested order.
    ///
    /// Codes with no matching record are skipped, mirroring the upstream
    /// `alpha?codes=` endpoint.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` when the fetch fails.
    async fn get_by_codes(&self, codes: &[CountryCode]) -> Result<Vec<Country>, SourceError>;
}

/// In-memory source for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemorySource {
    countries: Arc<Mutex<Vec<Country>>>,
}

impl InMemorySource {
    #[must_use]
    pub fn new(countries: Vec<Country>) -> Self {
        Self {
            countries: Arc::new(Mutex::new(countries)),
        }
    }

    /// Replace the held collection.
    pub fn replace(&self, countries: Vec<Country>) {
        *self
            .countries
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = countries;
    }

    fn snapshot(&self) -> Vec<Country> {
        self.countries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl CountrySource for InMemorySource {
    async fn list_all(&self) -> Result<Vec<Country>, SourceError> {
        Ok(self.snapshot())
    }

    async fn get_by_code(&self, code: &CountryCode) -> Result<Country, SourceError> {
        self.snapshot()
            .into_iter()
            .find(|country| country.code() == code)
            .ok_or_else(|| SourceError::NotFound { code: code.clone() })
    }

    async fn get_by_codes(&self, codes: &[CountryCode]) -> Result<Vec<Country>, SourceError> {
        let snapshot = self.snapshot();
        Ok(codes
            .iter()
            .filter_map(|code| {
                snapshot
                    .iter()
                    .find(|country| country.code() == code)
                    .cloned()
            })
            .collect())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
