#![forbid(unsafe_code)]

pub mod cache;
pub mod repository;
pub mod rest;

pub use cache::CachedSource;
pub use repository::{CountrySource, InMemorySource, SourceError};
pub use rest::{RestConfig, RestCountriesClient};
