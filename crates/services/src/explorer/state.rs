use serde::{Deserialize, Serialize};

/// Countries shown per page; matches the card grid the state was made for.
pub const DEFAULT_PAGE_SIZE: usize = 12;

//
// ─── SORT CONFIG ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    Population,
    Area,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortConfig {
    #[must_use]
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        Self::new(SortKey::Name, SortDirection::Ascending)
    }
}

//
// ─── REGION FILTER ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionFilter {
    #[default]
    All,
    Region(String),
}

impl RegionFilter {
    /// Whether a country with the given region passes this filter.
    ///
    /// A country without a region only passes the `All` filter.
    #[must_use]
    pub fn matches(&self, region: Option<&str>) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Region(wanted) => region == Some(wanted.as_str()),
        }
    }
}

//
// ─── EXPLORER STATE ────────────────────────────────────────────────────────────
//

/// The whole browsing state of the country explorer, as one explicit,
/// serializable value.
///
/// All transitions go through [`ExplorerState::apply`]; the struct never
/// mutates in place, so a UI can hold the previous state for free and tests
/// can assert on transitions directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerState {
    pub search_term: String,
    pub region: RegionFilter,
    pub sort: SortConfig,
    pub current_page: usize,
    pub page_size: usize,
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            region: RegionFilter::All,
            sort: SortConfig::default(),
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Every way the browsing state can change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplorerAction {
    SetSearchTerm(String),
    SetRegionFilter(RegionFilter),
    SetSort(SortConfig),
    GoToPage(usize),
    NextPage,
    PreviousPage,
    SetPageSize(usize),
}

impl ExplorerState {
    /// Pure transition: returns the state after the action.
    ///
    /// Narrowing actions (search, region, page size) jump back to page 1 so
    /// the viewer never lands on a page past the shrunken result; changing
    /// the sort order keeps the page. Page numbers are kept at 1 or above
    /// here, and clamped against the real page count where the result set is
    /// known (see the view builder).
    #[must_use]
    pub fn apply(&self, action: ExplorerAction) -> Self {
        let mut next = self.clone();
        match action {
            ExplorerAction::SetSearchTerm(term) => {
                next.search_term = term;
                next.current_page = 1;
            }
            ExplorerAction::SetRegionFilter(region) => {
                next.region = region;
                next.current_page = 1;
            }
            ExplorerAction::SetSort(sort) => {
                next.sort = sort;
            }
            ExplorerAction::GoToPage(page) => {
                next.current_page = page.max(1);
            }
            ExplorerAction::NextPage => {
                next.current_page = self.current_page.saturating_add(1);
            }
            ExplorerAction::PreviousPage => {
                next.current_page = self.current_page.saturating_sub(1).max(1);
            }
            ExplorerAction::SetPageSize(size) => {
                next.page_size = size.max(1);
                next.current_page = 1;
            }
        }
        next
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
