use serde::Serialize;

use atlas_core::model::Country;
use atlas_core::pagination::{DEFAULT_SIBLING_COUNT, PageLabel, PaginationRequest};

use super::state::{ExplorerState, SortDirection, SortKey};

/// One renderable page of the country browser.
///
/// Presentation-agnostic: no formatted strings, no locale assumptions. The
/// UI formats numbers and renders `labels` as its pagination control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryPageView {
    pub items: Vec<Country>,
    pub total_count: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub labels: Vec<PageLabel>,
}

impl CountryPageView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Regions present in the snapshot, sorted and deduplicated.
#[must_use]
pub fn unique_regions(countries: &[Country]) -> Vec<String> {
    let mut regions: Vec<String> = countries
        .iter()
        .filter_map(|country| country.region())
        .map(str::to_owned)
        .collect();
    regions.sort();
    regions.dedup();
    regions
}

/// Apply the state's search term, region filter, and sort order.
///
/// The search is a case-insensitive substring match on the common name.
/// Missing population/area sort as zero, so countries without the fact sink
/// to the bottom of a descending sort rather than disappearing.
#[must_use]
pub fn filter_and_sort(countries: &[Country], state: &ExplorerState) -> Vec<Country> {
    let needle = state.search_term.to_lowercase();

    let mut result: Vec<Country> = countries
        .iter()
        .filter(|country| {
            needle.is_empty() || country.name().common().to_lowercase().contains(&needle)
        })
        .filter(|country| state.region.matches(country.region()))
        .cloned()
        .collect();

    result.sort_by(|a, b| {
        let ordering = match state.sort.key {
            SortKey::Name => a
                .name()
                .common()
                .to_lowercase()
                .cmp(&b.name().common().to_lowercase()),
            SortKey::Population => a
                .population()
                .unwrap_or_default()
                .cmp(&b.population().unwrap_or_default()),
            SortKey::Area => a
                .area()
                .unwrap_or_default()
                .total_cmp(&b.area().unwrap_or_default()),
        };
        match state.sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    result
}

/// Build the page view for a snapshot under the given state.
///
/// The requested page is clamped against the filtered result, so a filter
/// that shrinks the collection can never leave the viewer past the end.
#[must_use]
pub fn page_view(countries: &[Country], state: &ExplorerState) -> CountryPageView {
    let filtered = filter_and_sort(countries, state);

    let request = PaginationRequest {
        total_count: filtered.len(),
        page_size: state.page_size,
        current_page: state.current_page,
        sibling_count: DEFAULT_SIBLING_COUNT,
    };
    let total_pages = request.total_pages();
    let current_page = state.current_page.clamp(1, total_pages.max(1));
    let labels = request.labels();

    let start = (current_page - 1) * state.page_size;
    let items = filtered
        .into_iter()
        .skip(start)
        .take(state.page_size)
        .collect();

    CountryPageView {
        items,
        total_count: request.total_count,
        total_pages,
        current_page,
        labels,
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
