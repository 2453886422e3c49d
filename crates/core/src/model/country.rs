use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::CountryCode;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CountryError {
    #[error("country name cannot be empty")]
    EmptyName,

    #[error("flag images must carry at least one URL")]
    MissingFlagImage,

    #[error("currency code cannot be empty")]
    EmptyCurrencyCode,
}

//
// ─── VALUE PARTS ───────────────────────────────────────────────────────────────
//

/// Common and official names of a country.
///
/// The official name falls back to the common name when the source omits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryName {
    common: String,
    official: String,
}

impl CountryName {
    /// Create a validated name pair.
    ///
    /// # Errors
    ///
    /// Returns `CountryError::EmptyName` if the common name is empty after
    /// trimming.
    pub fn new(
        common: impl Into<String>,
        official: Option<String>,
    ) -> Result<Self, CountryError> {
        let common = common.into().trim().to_owned();
        if common.is_empty() {
            return Err(CountryError::EmptyName);
        }
        let official = official
            .map(|o| o.trim().to_owned())
            .filter(|o| !o.is_empty())
            .unwrap_or_else(|| common.clone());
        Ok(Self { common, official })
    }

    #[must_use]
    pub fn common(&self) -> &str {
        &self.common
    }

    #[must_use]
    pub fn official(&self) -> &str {
        &self.official
    }
}

/// Flag image URLs as served by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagImages {
    svg: Option<String>,
    png: Option<String>,
    alt: Option<String>,
}

impl FlagImages {
    /// Create flag images from whatever URLs the source provides.
    ///
    /// # Errors
    ///
    /// Returns `CountryError::MissingFlagImage` if neither URL is present.
    pub fn new(
        svg: Option<String>,
        png: Option<String>,
        alt: Option<String>,
    ) -> Result<Self, CountryError> {
        let svg = svg.filter(|u| !u.trim().is_empty());
        let png = png.filter(|u| !u.trim().is_empty());
        if svg.is_none() && png.is_none() {
            return Err(CountryError::MissingFlagImage);
        }
        let alt = alt.filter(|a| !a.trim().is_empty());
        Ok(Self { svg, png, alt })
    }

    #[must_use]
    pub fn svg(&self) -> Option<&str> {
        self.svg.as_deref()
    }

    #[must_use]
    pub fn png(&self) -> Option<&str> {
        self.png.as_deref()
    }

    #[must_use]
    pub fn alt(&self) -> Option<&str> {
        self.alt.as_deref()
    }

    /// Preferred display URL: SVG when available, PNG otherwise.
    ///
    /// # Panics
    ///
    /// Never panics: the constructor guarantees at least one URL.
    #[must_use]
    pub fn best(&self) -> &str {
        self.svg
            .as_deref()
            .or(self.png.as_deref())
            .expect("constructor guarantees at least one flag URL")
    }
}

/// A currency used by a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    code: String,
    name: String,
    symbol: Option<String>,
}

impl Currency {
    /// Create a currency entry.
    ///
    /// # Errors
    ///
    /// Returns `CountryError::EmptyCurrencyCode` if the code is empty.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        symbol: Option<String>,
    ) -> Result<Self, CountryError> {
        let code = code.into().trim().to_owned();
        if code.is_empty() {
            return Err(CountryError::EmptyCurrencyCode);
        }
        Ok(Self {
            code,
            name: name.into().trim().to_owned(),
            symbol: symbol.filter(|s| !s.trim().is_empty()),
        })
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }
}

/// External map links for a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLinks {
    pub google_maps: Option<String>,
    pub open_street_maps: Option<String>,
}

//
// ─── COUNTRY ───────────────────────────────────────────────────────────────────
//

/// A single country record.
///
/// Identity is the [`CountryCode`]; everything else is descriptive data the
/// source may or may not supply. List endpoints fetch a narrow field set, so
/// most facts are optional and only the detail fetch fills them all in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    code: CountryCode,
    name: CountryName,
    flags: FlagImages,
    capital: Vec<String>,
    region: Option<String>,
    subregion: Option<String>,
    population: Option<u64>,
    area: Option<f64>,
    timezones: Vec<String>,
    borders: Vec<CountryCode>,
    languages: Vec<String>,
    currencies: Vec<Currency>,
    maps: Option<MapLinks>,
}

impl Country {
    /// Create a country from its required parts; optional facts start empty
    /// and are attached with the `with_*` builders.
    #[must_use]
    pub fn new(code: CountryCode, name: CountryName, flags: FlagImages) -> Self {
        Self {
            code,
            name,
            flags,
            capital: Vec::new(),
            region: None,
            subregion: None,
            population: None,
            area: None,
            timezones: Vec::new(),
            borders: Vec::new(),
            languages: Vec::new(),
            currencies: Vec::new(),
            maps: None,
        }
    }

    #[must_use]
    pub fn with_capital(mut self, capital: Vec<String>) -> Self {
        self.capital = capital;
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: Option<String>) -> Self {
        self.region = region.filter(|r| !r.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_subregion(mut self, subregion: Option<String>) -> Self {
        self.subregion = subregion.filter(|r| !r.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_population(mut self, population: Option<u64>) -> Self {
        self.population = population;
        self
    }

    #[must_use]
    pub fn with_area(mut self, area: Option<f64>) -> Self {
        self.area = area.filter(|a| a.is_finite());
        self
    }

    #[must_use]
    pub fn with_timezones(mut self, timezones: Vec<String>) -> Self {
        self.timezones = timezones;
        self
    }

    #[must_use]
    pub fn with_borders(mut self, borders: Vec<CountryCode>) -> Self {
        self.borders = borders;
        self
    }

    #[must_use]
    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages;
        self
    }

    #[must_use]
    pub fn with_currencies(mut self, currencies: Vec<Currency>) -> Self {
        self.currencies = currencies;
        self
    }

    #[must_use]
    pub fn with_maps(mut self, maps: Option<MapLinks>) -> Self {
        self.maps = maps;
        self
    }

    // Accessors
    #[must_use]
    pub fn code(&self) -> &CountryCode {
        &self.code
    }

    #[must_use]
    pub fn name(&self) -> &CountryName {
        &self.name
    }

    #[must_use]
    pub fn flags(&self) -> &FlagImages {
        &self.flags
    }

    #[must_use]
    pub fn capital(&self) -> &[String] {
        &self.capital
    }

    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    #[must_use]
    pub fn subregion(&self) -> Option<&str> {
        self.subregion.as_deref()
    }

    #[must_use]
    pub fn population(&self) -> Option<u64> {
        self.population
    }

    #[must_use]
    pub fn area(&self) -> Option<f64> {
        self.area
    }

    #[must_use]
    pub fn timezones(&self) -> &[String] {
        &self.timezones
    }

    #[must_use]
    pub fn borders(&self) -> &[CountryCode] {
        &self.borders
    }

    #[must_use]
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    #[must_use]
    pub fn currencies(&self) -> &[Currency] {
        &self.currencies
    }

    #[must_use]
    pub fn maps(&self) -> Option<&MapLinks> {
        self.maps.as_ref()
    }
}

impl crate::quiz::Keyed for Country {
    type Key = CountryCode;

    fn key(&self) -> CountryCode {
        self.code.clone()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
