#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod pagination;
pub mod quiz;
pub mod time;

pub use error::Error;
pub use model::{CodeError, Country, CountryCode, CountryError, CountryName, Currency, FlagImages, MapLinks};
pub use pagination::{DEFAULT_SIBLING_COUNT, PageLabel, PaginationRequest, page_range};
pub use quiz::{Keyed, OPTIONS_PER_QUESTION, QuizError, QuizQuestion, draw_question, draw_question_with};
pub use time::{Clock, fixed_now};
