//! Framework-free list page state: a pure `(state, event) -> state`
//! transition function for the admin tables.
//!
//! Mirrors the client request cycle: the state holds the page window and the
//! active search/filter; any change to search, filter, or page size snaps
//! back to the first page so the window never points past the shrunken
//! result set.

use crate::models::pagination::PageWindow;

/// Client-side state of one admin list page.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    pub page: i64,
    pub per_page: i64,
    pub search: String,
    pub filter: Option<String>,
    /// Total from the last successful fetch; None before the first load.
    pub total: Option<i64>,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
            search: String::new(),
            filter: None,
            total: None,
        }
    }
}

/// Events driving a list page.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent {
    PageChanged(i64),
    PerPageChanged(i64),
    SearchChanged(String),
    FilterChanged(Option<String>),
    Loaded { total: i64 },
}

impl ListState {
    /// Apply one event, producing the next state.
    pub fn apply(self, event: ListEvent) -> Self {
        match event {
            ListEvent::PageChanged(page) => Self {
                page: page.max(1),
                ..self
            },
            ListEvent::PerPageChanged(per_page) => Self {
                per_page: per_page.max(1),
                page: 1,
                ..self
            },
            ListEvent::SearchChanged(search) => Self {
                search,
                page: 1,
                ..self
            },
            ListEvent::FilterChanged(filter) => Self {
                filter,
                page: 1,
                ..self
            },
            ListEvent::Loaded { total } => Self {
                total: Some(total),
                ..self
            },
        }
    }

    /// The page window for the current state, once a total is known.
    pub fn window(&self) -> Option<PageWindow> {
        self.total
            .map(|total| PageWindow::new(total, self.page, self.per_page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_starts_on_first_page() {
        let state = ListState::default();
        assert_eq!(state.page, 1);
        assert_eq!(state.per_page, 10);
        assert!(state.total.is_none());
        assert!(state.window().is_none());
    }

    #[test]
    fn search_change_resets_page() {
        let state = ListState::default()
            .apply(ListEvent::PageChanged(4))
            .apply(ListEvent::SearchChanged("ann".to_string()));
        assert_eq!(state.page, 1);
        assert_eq!(state.search, "ann");
    }

    #[test]
    fn filter_change_resets_page() {
        let state = ListState::default()
            .apply(ListEvent::PageChanged(3))
            .apply(ListEvent::FilterChanged(Some("admin".to_string())));
        assert_eq!(state.page, 1);
        assert_eq!(state.filter.as_deref(), Some("admin"));
    }

    #[test]
    fn per_page_change_resets_page() {
        let state = ListState::default()
            .apply(ListEvent::PageChanged(5))
            .apply(ListEvent::PerPageChanged(50));
        assert_eq!(state.page, 1);
        assert_eq!(state.per_page, 50);
    }

    #[test]
    fn page_change_is_clamped_to_one() {
        let state = ListState::default().apply(ListEvent::PageChanged(0));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn loaded_total_yields_window() {
        let state = ListState::default()
            .apply(ListEvent::PageChanged(2))
            .apply(ListEvent::Loaded { total: 25 });
        let window = state.window().unwrap();
        assert_eq!(window.offset(), 10);
        assert_eq!(window.total_pages(), 3);
        assert!(window.is_paginated());
    }

    #[test]
    fn loaded_keeps_current_page() {
        let state = ListState::default()
            .apply(ListEvent::PageChanged(2))
            .apply(ListEvent::Loaded { total: 25 });
        assert_eq!(state.page, 2);
    }
}
