//! Pagination primitives shared by the list endpoints.
//!
//! `Pagination` parses page/limit query parameters; `PageWindow` is the pure
//! calculator behind both the SQL window (offset/limit) and the pager UI
//! (displayed range, visible page numbers with ellipsis).

use serde::Deserialize;

/// Page-number style pagination query parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl Pagination {
    /// Maximum items per page.
    const MAX_LIMIT: i64 = 100;

    /// Default items per page.
    const DEFAULT_LIMIT: i64 = 10;

    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        (self.current_page() - 1) * self.limit()
    }

    pub fn current_page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }
}

/// Entry in the rendered pager: a concrete page number or a gap marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(i64),
    Ellipsis,
}

/// Derived page window over a filtered result set.
///
/// Callers are responsible for clamping `page`; a page beyond `total_pages`
/// is carried through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

impl PageWindow {
    pub fn new(total: i64, page: i64, per_page: i64) -> Self {
        Self {
            total: total.max(0),
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    pub fn total_pages(&self) -> i64 {
        ((self.total + self.per_page - 1) / self.per_page).max(1)
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }

    /// One-based inclusive range of item positions shown on this page,
    /// or (0, 0) when the result set is empty.
    pub fn display_range(&self) -> (i64, i64) {
        if self.total == 0 {
            return (0, 0);
        }
        (self.offset() + 1, (self.page * self.per_page).min(self.total))
    }

    /// Whether a pager should be rendered at all. A single page of results
    /// suppresses the pagination UI entirely.
    pub fn is_paginated(&self) -> bool {
        self.total > self.per_page
    }

    /// Page numbers to render: always 1 and the last page, the current page
    /// and its in-bounds neighbors. A gap of exactly one page is filled with
    /// that number; a wider gap collapses to a single ellipsis.
    pub fn visible_pages(&self) -> Vec<PageMarker> {
        let last = self.total_pages();
        let mut shown: Vec<i64> = vec![1, last];
        for candidate in [self.page - 1, self.page, self.page + 1] {
            if candidate >= 1 && candidate <= last {
                shown.push(candidate);
            }
        }
        shown.sort_unstable();
        shown.dedup();

        let mut markers = Vec::with_capacity(shown.len() + 2);
        let mut prev: Option<i64> = None;
        for p in shown {
            if let Some(q) = prev {
                if p - q == 2 {
                    markers.push(PageMarker::Page(q + 1));
                } else if p - q > 2 {
                    markers.push(PageMarker::Ellipsis);
                }
            }
            markers.push(PageMarker::Page(p));
            prev = Some(p);
        }
        markers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageMarker::{Ellipsis, Page};

    #[test]
    fn pagination_defaults() {
        let p = Pagination {
            page: None,
            limit: None,
        };
        assert_eq!(p.limit(), 10);
        assert_eq!(p.offset(), 0);
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn pagination_clamps_limit() {
        let p = Pagination {
            page: Some(1),
            limit: Some(500),
        };
        assert_eq!(p.limit(), 100);
    }

    #[test]
    fn pagination_offset_calculation() {
        let p = Pagination {
            page: Some(3),
            limit: Some(10),
        };
        assert_eq!(p.offset(), 20);
    }

    #[test]
    fn window_total_pages_rounds_up() {
        assert_eq!(PageWindow::new(25, 1, 10).total_pages(), 3);
        assert_eq!(PageWindow::new(30, 1, 10).total_pages(), 3);
        assert_eq!(PageWindow::new(0, 1, 10).total_pages(), 1);
    }

    #[test]
    fn window_offset_invariant() {
        let w = PageWindow::new(25, 2, 10);
        assert_eq!(w.offset(), 10);
        assert_eq!(w.display_range(), (11, 20));
    }

    #[test]
    fn last_page_display_range_is_truncated() {
        let w = PageWindow::new(25, 3, 10);
        assert_eq!(w.display_range(), (21, 25));
    }

    #[test]
    fn empty_result_set_has_empty_range() {
        assert_eq!(PageWindow::new(0, 1, 10).display_range(), (0, 0));
    }

    #[test]
    fn single_page_suppresses_pager() {
        assert!(!PageWindow::new(10, 1, 10).is_paginated());
        assert!(!PageWindow::new(3, 1, 10).is_paginated());
        assert!(PageWindow::new(11, 1, 10).is_paginated());
    }

    #[test]
    fn visible_pages_always_contain_first_and_last() {
        for total_pages in 1..=12 {
            for page in 1..=total_pages {
                let w = PageWindow::new(total_pages * 10, page, 10);
                let pages = w.visible_pages();
                assert!(pages.contains(&Page(1)), "page 1 missing for {page}/{total_pages}");
                assert!(
                    pages.contains(&Page(total_pages)),
                    "last page missing for {page}/{total_pages}"
                );
            }
        }
    }

    #[test]
    fn visible_pages_no_duplicates_or_out_of_range() {
        for total_pages in 1..=12 {
            for page in 1..=total_pages {
                let w = PageWindow::new(total_pages * 10, page, 10);
                let numbers: Vec<i64> = w
                    .visible_pages()
                    .into_iter()
                    .filter_map(|m| match m {
                        Page(n) => Some(n),
                        Ellipsis => None,
                    })
                    .collect();
                let mut deduped = numbers.clone();
                deduped.dedup();
                assert_eq!(numbers, deduped);
                assert!(numbers.iter().all(|&n| n >= 1 && n <= total_pages));
            }
        }
    }

    #[test]
    fn visible_pages_middle_of_long_list() {
        let w = PageWindow::new(100, 5, 10);
        assert_eq!(
            w.visible_pages(),
            vec![
                Page(1),
                Ellipsis,
                Page(4),
                Page(5),
                Page(6),
                Ellipsis,
                Page(10)
            ]
        );
    }

    #[test]
    fn gap_of_one_page_is_shown_not_elided() {
        // Pages {1, 2, 3, 4} around current page 3, then 5: no ellipsis fits.
        let w = PageWindow::new(50, 3, 10);
        assert_eq!(
            w.visible_pages(),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
        );
    }

    #[test]
    fn visible_pages_single_page() {
        assert_eq!(PageWindow::new(5, 1, 10).visible_pages(), vec![Page(1)]);
    }

    #[test]
    fn page_beyond_total_pages_is_not_clamped() {
        let w = PageWindow::new(10, 7, 10);
        assert_eq!(w.page, 7);
        assert_eq!(w.offset(), 60);
    }
}
