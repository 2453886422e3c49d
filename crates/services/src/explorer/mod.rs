mod service;
mod state;
mod view;

// Public API of the explorer subsystem.
pub use crate::error::ExplorerError;
pub use service::{CountryDetail, ExplorerService};
pub use state::{
    DEFAULT_PAGE_SIZE, ExplorerAction, ExplorerState, RegionFilter, SortConfig, SortDirection,
    SortKey,
};
pub use view::{CountryPageView, filter_and_sort, page_view, unique_regions};
