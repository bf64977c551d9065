//! Page counting, link windowing, and navigation links.
//!
//! At most [`WINDOW_SIZE`] page numbers are shown. When there are more pages
//! than that, the window slides to keep the current page centred and is
//! clamped so it never starts before page 1 or ends after the last page.
//!
//! The current page is reported as requested. A page past the end keeps its
//! number (the store returned nothing for it); the window shows the last
//! pages, none of them marked current, and "previous" leads to the last page.

use serde::Serialize;

use crate::criteria::FilterCriteria;
use crate::query::PAGE_SIZE;

/// Maximum number of page links shown at once.
pub const WINDOW_SIZE: u32 = 7;

/// `ceil(total_count / PAGE_SIZE)`.
pub fn total_pages(total_count: u64) -> u32 {
    let pages = total_count.div_ceil(u64::from(PAGE_SIZE));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Which page numbers to show, and whether previous/next exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    /// Requested page (at least 1). May exceed `total_pages`.
    pub current: u32,
    pub total_pages: u32,
    pub pages: Vec<u32>,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageWindow {
    pub fn new(total_count: u64, requested_page: u32) -> Self {
        let total = total_pages(total_count);
        let current = requested_page.max(1);
        if total == 0 {
            return Self {
                current,
                total_pages: 0,
                pages: Vec::new(),
                has_previous: false,
                has_next: false,
            };
        }

        let anchor = current.min(total);
        let (start, end) = if total <= WINDOW_SIZE {
            (1, total)
        } else {
            let half = WINDOW_SIZE / 2;
            let start = anchor
                .saturating_sub(half)
                .max(1)
                .min(total - WINDOW_SIZE + 1);
            (start, start + WINDOW_SIZE - 1)
        };

        Self {
            current,
            total_pages: total,
            pages: (start..=end).collect(),
            has_previous: current > 1,
            has_next: current < total,
        }
    }

    /// Target of the "previous" link; the last page when past the end.
    pub fn previous_page(&self) -> Option<u32> {
        self.has_previous
            .then(|| (self.current - 1).min(self.total_pages))
    }

    pub fn next_page(&self) -> Option<u32> {
        self.has_next.then(|| self.current + 1)
    }
}

/// A numbered page link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub page: u32,
    pub href: String,
    pub current: bool,
}

/// Rendered pagination: numbered links plus optional previous/next hrefs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageNav {
    pub current: u32,
    pub total_pages: u32,
    pub pages: Vec<PageLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// `base_path?page=N&...` keeping every active filter.
pub fn page_href(base_path: &str, criteria: &FilterCriteria, page: u32) -> String {
    format!("{}?{}", base_path, criteria.query_string_for_page(page))
}

/// The "view all" link: the base path with every filter cleared.
pub fn view_all_href(base_path: &str) -> String {
    base_path.to_string()
}

impl PageNav {
    pub fn build(window: &PageWindow, criteria: &FilterCriteria, base_path: &str) -> Self {
        let pages = window
            .pages
            .iter()
            .map(|&page| PageLink {
                page,
                href: page_href(base_path, criteria, page),
                current: page == window.current,
            })
            .collect();

        Self {
            current: window.current,
            total_pages: window.total_pages,
            pages,
            previous: window
                .previous_page()
                .map(|page| page_href(base_path, criteria, page)),
            next: window
                .next_page()
                .map(|page| page_href(base_path, criteria, page)),
        }
    }
}
