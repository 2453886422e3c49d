#![forbid(unsafe_code)]

pub mod error;
pub mod explorer;
pub mod guess;

pub use error::{ExplorerError, GuessError};
pub use explorer::{
    CountryDetail, CountryPageView, DEFAULT_PAGE_SIZE, ExplorerAction, ExplorerService,
    ExplorerState, RegionFilter, SortConfig, SortDirection, SortKey,
};
pub use guess::{GuessFlagService, GuessOutcome, GuessRound};
