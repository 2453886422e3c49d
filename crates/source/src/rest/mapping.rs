use serde::Deserialize;
use std::collections::BTreeMap;

use atlas_core::model::{
    Country, CountryCode, CountryName, Currency, FlagImages, MapLinks,
};

use crate::repository::SourceError;

/// Wire shape of a restcountries v3.1 record.
///
/// Everything beyond name/code/flags is optional: list endpoints are fetched
/// with a narrow `fields=` selection and omit the rest.
#[derive(Debug, Deserialize)]
pub(crate) struct CountryDto {
    name: NameDto,
    cca2: String,
    flags: FlagsDto,
    #[serde(default)]
    capital: Vec<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    subregion: Option<String>,
    #[serde(default)]
    population: Option<u64>,
    #[serde(default)]
    area: Option<f64>,
    #[serde(default)]
    timezones: Vec<String>,
    #[serde(default)]
    borders: Vec<String>,
    #[serde(default)]
    languages: BTreeMap<String, String>,
    #[serde(default)]
    currencies: BTreeMap<String, CurrencyDto>,
    #[serde(default)]
    maps: Option<MapsDto>,
}

#[derive(Debug, Deserialize)]
struct NameDto {
    common: String,
    #[serde(default)]
    official: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FlagsDto {
    #[serde(default)]
    svg: Option<String>,
    #[serde(default)]
    png: Option<String>,
    #[serde(default)]
    alt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CurrencyDto {
    #[serde(default)]
    name: String,
    #[serde(default)]
    symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MapsDto {
    #[serde(default)]
    google_maps: Option<String>,
    #[serde(default)]
    open_street_maps: Option<String>,
}

impl CountryDto {
    /// Convert the wire record into the domain model.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::InvalidRecord` when a required field fails
    /// domain validation (bad code, empty name, no flag URL).
    pub(crate) fn into_country(self) -> Result<Country, SourceError> {
        let code = CountryCode::new(self.cca2)
            .map_err(|e| SourceError::InvalidRecord(e.to_string()))?;
        let name = CountryName::new(self.name.common, self.name.official)
            .map_err(|e| SourceError::InvalidRecord(format!("{code}: {e}")))?;
        let flags = FlagImages::new(self.flags.svg, self.flags.png, self.flags.alt)
            .map_err(|e| SourceError::InvalidRecord(format!("{code}: {e}")))?;

        let borders = self
            .borders
            .into_iter()
            .map(CountryCode::new)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SourceError::InvalidRecord(format!("{code}: {e}")))?;

        let currencies = self
            .currencies
            .into_iter()
            .map(|(currency_code, dto)| Currency::new(currency_code, dto.name, dto.symbol))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SourceError::InvalidRecord(format!("{code}: {e}")))?;

        let languages = self.languages.into_values().collect();

        let maps = self.maps.map(|m| MapLinks {
            google_maps: m.google_maps,
            open_street_maps: m.open_street_maps,
        });

        Ok(Country::new(code, name, flags)
            .with_capital(self.capital)
            .with_region(self.region)
            .with_subregion(self.subregion)
            .with_population(self.population)
            .with_area(self.area)
            .with_timezones(self.timezones)
            .with_borders(borders)
            .with_languages(languages)
            .with_currencies(currencies)
            .with_maps(maps))
    }
}

/// The API answers list endpoints with an array but sometimes returns a
/// single bare object (e.g. `alpha/{code}`); decoding accepts both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany {
    Many(Vec<CountryDto>),
    One(Box<CountryDto>),
}

impl OneOrMany {
    pub(crate) fn into_countries(self) -> Result<Vec<Country>, SourceError> {
        let dtos = match self {
            OneOrMany::Many(dtos) => dtos,
            OneOrMany::One(dto) => vec![*dto],
        };
        dtos.into_iter().map(CountryDto::into_country).collect()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RECORD: &str = r#"{
        "name": { "common": "Germany", "official": "Federal Republic of Germany" },
        "cca2": "DE",
        "flags": { "svg": "https://flagcdn.com/de.svg", "png": "https://flagcdn.com/w320/de.png", "alt": "The flag of Germany" },
        "capital": ["Berlin"],
        "region": "Europe",
        "subregion": "Western Europe",
        "population": 83240525,
        "area": 357114.0,
        "timezones": ["UTC+01:00"],
        "borders": ["AUT", "BEL", "CZE"],
        "languages": { "deu": "German" },
        "currencies": { "EUR": { "name": "Euro", "symbol": "€" } },
        "maps": {
            "googleMaps": "https://goo.gl/maps/mD9FBMq1nvXUBrkv6",
            "openStreetMaps": "https://www.openstreetmap.org/relation/51477"
        }
    }"#;

    #[test]
    fn full_record_maps_to_domain() {
        let dto: CountryDto = serde_json::from_str(FULL_RECORD).unwrap();
        let country = dto.into_country().unwrap();

        assert_eq!(country.code().as_str(), "DE");
        assert_eq!(country.name().official(), "Federal Republic of Germany");
        assert_eq!(country.flags().alt(), Some("The flag of Germany"));
        assert_eq!(country.capital(), ["Berlin".to_string()]);
        assert_eq!(country.region(), Some("Europe"));
        assert_eq!(country.population(), Some(83_240_525));
        assert_eq!(country.borders().len(), 3);
        assert_eq!(country.languages(), ["German".to_string()]);
        assert_eq!(country.currencies()[0].code(), "EUR");
        assert_eq!(country.currencies()[0].symbol(), Some("€"));
        assert!(country.maps().is_some());
    }

    #[test]
    fn narrow_list_record_maps_with_defaults() {
        // Shape of /all?fields=name,flags,cca2,population,region
        let json = r#"{
            "name": { "common": "Japan", "official": "Japan" },
            "cca2": "JP",
            "flags": { "svg": "https://flagcdn.com/jp.svg", "png": "https://flagcdn.com/w320/jp.png" },
            "population": 125836021,
            "region": "Asia"
        }"#;

        let dto: CountryDto = serde_json::from_str(json).unwrap();
        let country = dto.into_country().unwrap();

        assert_eq!(country.code().as_str(), "JP");
        assert!(country.capital().is_empty());
        assert!(country.borders().is_empty());
        assert_eq!(country.subregion(), None);
        assert_eq!(country.area(), None);
    }

    #[test]
    fn invalid_code_becomes_invalid_record() {
        let json = r#"{
            "name": { "common": "Nowhere" },
            "cca2": "123",
            "flags": { "svg": "https://flags.example/x.svg" }
        }"#;

        let dto: CountryDto = serde_json::from_str(json).unwrap();
        let err = dto.into_country().unwrap_err();
        assert!(matches!(err, SourceError::InvalidRecord(_)));
    }

    #[test]
    fn decodes_array_and_bare_object() {
        let many: OneOrMany =
            serde_json::from_str(&format!("[{FULL_RECORD}]")).unwrap();
        assert_eq!(many.into_countries().unwrap().len(), 1);

        let one: OneOrMany = serde_json::from_str(FULL_RECORD).unwrap();
        let countries = one.into_countries().unwrap();
        assert_eq!(countries.len(), 1);
        assert_eq!(countries[0].code().as_str(), "DE");
    }
}
