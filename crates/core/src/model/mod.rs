mod code;
mod country;

pub use code::{CodeError, CountryCode};
pub use country::{Country, CountryError, CountryName, Currency, FlagImages, MapLinks};
