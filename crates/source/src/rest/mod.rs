use std::env;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use atlas_core::model::{Country, CountryCode};

use crate::repository::{CountrySource, SourceError};

mod mapping;

use mapping::OneOrMany;

/// Field selection for list fetches; keeps the snapshot payload small.
const LIST_FIELDS: &str = "fields=name,flags,cca2,population,region";

const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Environment variable overriding the API base URL.
pub const ENV_BASE_URL: &str = "ATLAS_API_BASE_URL";

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug)]
pub struct RestConfig {
    base_url: Url,
}

impl RestConfig {
    /// Configuration from the environment, falling back to the public
    /// restcountries.com endpoint.
    #[must_use]
    pub fn from_env() -> Self {
        match env::var(ENV_BASE_URL) {
            Ok(raw) => match Url::parse(raw.trim()) {
                Ok(url) if !url.cannot_be_a_base() => Self { base_url: url },
                _ => {
                    warn!(value = %raw, "ignoring invalid {ENV_BASE_URL}, using default");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL)
                .expect("default base URL should parse"),
        }
    }
}

//
// ─── CLIENT ────────────────────────────────────────────────────────────────────
//

/// HTTP client for the restcountries v3.1 API.
pub struct RestCountriesClient {
    client: Client,
    config: RestConfig,
}

impl RestCountriesClient {
    #[must_use]
    pub fn new(config: RestConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(RestConfig::from_env())
    }

    fn endpoint(&self, segments: &[&str], query: Option<&str>) -> Url {
        let mut url = self.config.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.set_query(query);
        url
    }

    async fn fetch(&self, url: Url) -> Result<Vec<Country>, SourceError> {
        debug!(%url, "fetching countries");
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status()));
        }
        let body: OneOrMany = response.json().await?;
        body.into_countries()
    }

    /// Countries matching a (partial) name, as the API's `/name` endpoint.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` when the fetch or decoding fails; an unmatched
    /// name surfaces as `SourceError::Status` (the API answers 404).
    pub async fn by_name(&self, name: &str) -> Result<Vec<Country>, SourceError> {
        self.fetch(self.endpoint(&["name", name], None)).await
    }

    /// Countries of a region, as the API's `/region` endpoint.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` when the fetch or decoding fails.
    pub async fn by_region(&self, region: &str) -> Result<Vec<Country>, SourceError> {
        self.fetch(self.endpoint(&["region", region], None)).await
    }
}

#[async_trait]
impl CountrySource for RestCountriesClient {
    async fn list_all(&self) -> Result<Vec<Country>, SourceError> {
        self.fetch(self.endpoint(&["all"], Some(LIST_FIELDS))).await
    }

    async fn get_by_code(&self, code: &CountryCode) -> Result<Country, SourceError> {
        let url = self.endpoint(&["alpha", code.as_str()], None);
        let countries = match self.fetch(url).await {
            Ok(countries) => countries,
            Err(SourceError::Status(status)) if status == reqwest::StatusCode::NOT_FOUND => {
                return Err(SourceError::NotFound { code: code.clone() });
            }
            Err(err) => return Err(err),
        };
        countries
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::NotFound { code: code.clone() })
    }

    async fn get_by_codes(&self, codes: &[CountryCode]) -> Result<Vec<Country>, SourceError> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }
        let joined = codes
            .iter()
            .map(CountryCode::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let query = format!("codes={joined}");
        self.fetch(self.endpoint(&["alpha"], Some(&query))).await
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
