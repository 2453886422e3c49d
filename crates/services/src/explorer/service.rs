use std::sync::Arc;
use tracing::debug;

use atlas_core::model::{Country, CountryCode};
use source::repository::CountrySource;

use super::state::ExplorerState;
use super::view::{self, CountryPageView};
use crate::error::ExplorerError;

/// A country plus its resolved neighbours, for the detail screen.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryDetail {
    pub country: Country,
    pub borders: Vec<Country>,
}

/// Browsing and detail queries over an injected country source.
///
/// Fetching is the only async part; everything on top of the snapshot is
/// the pure view code. Inject a `CachedSource` to avoid refetching on every
/// state change.
#[derive(Clone)]
pub struct ExplorerService {
    source: Arc<dyn CountrySource>,
}

impl ExplorerService {
    #[must_use]
    pub fn new(source: Arc<dyn CountrySource>) -> Self {
        Self { source }
    }

    /// The page of countries the given state describes.
    ///
    /// # Errors
    ///
    /// Returns `ExplorerError::Source` when the snapshot fetch fails; the
    /// error is surfaced unchanged for the caller to present and retry.
    pub async fn browse(&self, state: &ExplorerState) -> Result<CountryPageView, ExplorerError> {
        let countries = self.source.list_all().await?;
        let page = view::page_view(&countries, state);
        debug!(
            total = page.total_count,
            page = page.current_page,
            "built country page view"
        );
        Ok(page)
    }

    /// Distinct regions available for filtering.
    ///
    /// # Errors
    ///
    /// Returns `ExplorerError::Source` when the snapshot fetch fails.
    pub async fn regions(&self) -> Result<Vec<String>, ExplorerError> {
        let countries = self.source.list_all().await?;
        Ok(view::unique_regions(&countries))
    }

    /// Full record for one country, with its border countries resolved.
    ///
    /// # Errors
    ///
    /// Returns `ExplorerError::Source` for a missing code or a failed fetch.
    pub async fn detail(&self, code: &CountryCode) -> Result<CountryDetail, ExplorerError> {
        let country = self.source.get_by_code(code).await?;
        let borders = if country.borders().is_empty() {
            Vec::new()
        } else {
            self.source.get_by_codes(country.borders()).await?
        };
        Ok(CountryDetail { country, borders })
    }
}
