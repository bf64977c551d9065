//! The listing view handed to the presentation layer.
//!
//! A [`TermListing`] is built only from a complete set of inputs (criteria,
//! categories, and a result page), so a presentation layer receives either a
//! full view or nothing at all.

use serde::Serialize;

use crate::criteria::FilterCriteria;
use crate::models::{Category, ResultPage, Term};
use crate::pagination::{view_all_href, PageNav, PageWindow};
use crate::refine::selected_category;

/// Whether the listing has entries to show.
///
/// `NoMatches` is an expected outcome, not an error: the presentation layer
/// shows a "no terms found" panel linking to [`TermListing::view_all_href`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingOutcome {
    Results,
    NoMatches,
}

#[derive(Debug, Clone, Serialize)]
pub struct TermListing {
    pub criteria: FilterCriteria,
    pub outcome: ListingOutcome,
    pub terms: Vec<Term>,
    /// Matches across the whole remote collection, not just this page.
    pub total_count: u64,
    pub categories: Vec<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_category: Option<Category>,
    pub pagination: PageNav,
    pub view_all_href: String,
}

impl TermListing {
    pub fn assemble(
        criteria: FilterCriteria,
        categories: Vec<Category>,
        page: ResultPage<Term>,
        base_path: &str,
    ) -> Self {
        let window = PageWindow::new(page.total_count, criteria.page());
        let pagination = PageNav::build(&window, &criteria, base_path);
        let selected = selected_category(&categories, &criteria).cloned();
        let outcome = if page.items.is_empty() {
            ListingOutcome::NoMatches
        } else {
            ListingOutcome::Results
        };

        Self {
            criteria,
            outcome,
            terms: page.items,
            total_count: page.total_count,
            categories,
            selected_category: selected,
            pagination,
            view_all_href: view_all_href(base_path),
        }
    }

    pub fn is_no_matches(&self) -> bool {
        self.outcome == ListingOutcome::NoMatches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;
    use chrono::{TimeZone, Utc};

    fn category(id: &str) -> Category {
        Category {
            id: id.to_string(),
            name: id.to_string(),
            icon: String::new(),
            slug: id.to_string(),
            description: None,
        }
    }

    fn term(id: &str) -> Term {
        Term {
            id: id.to_string(),
            title: id.to_string(),
            slug: id.to_string(),
            description: String::new(),
            category: category("security"),
            difficulty: vec![Difficulty::Beginner],
            search_title: None,
            published_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            order: 0,
        }
    }

    #[test]
    fn test_results_listing() {
        let criteria = FilterCriteria::new().with_category("security");
        let page = ResultPage {
            items: vec![term("a"), term("b")],
            total_count: 30,
        };
        let listing = TermListing::assemble(
            criteria,
            vec![category("security"), category("network")],
            page,
            "/terms",
        );
        assert_eq!(listing.outcome, ListingOutcome::Results);
        assert_eq!(listing.pagination.total_pages, 3);
        assert_eq!(listing.selected_category.unwrap().id, "security");
        assert_eq!(listing.view_all_href, "/terms");
    }

    #[test]
    fn test_page_past_end_agrees_with_criteria() {
        let criteria = FilterCriteria::new().with_page(50);
        let page = ResultPage {
            items: vec![],
            total_count: 100,
        };
        let listing = TermListing::assemble(criteria, vec![], page, "/terms");

        assert!(listing.is_no_matches());
        assert_eq!(listing.total_count, 100);
        assert_eq!(listing.pagination.current, listing.criteria.page());
        assert_eq!(listing.pagination.total_pages, 9);
        assert!(listing.pagination.pages.iter().all(|link| !link.current));
        assert_eq!(listing.pagination.previous.as_deref(), Some("/terms?page=9"));
        assert_eq!(listing.pagination.next, None);
    }

    #[test]
    fn test_no_matches_listing() {
        let criteria = FilterCriteria::new().with_query("zzz");
        let listing = TermListing::assemble(criteria, vec![], ResultPage::empty(), "/terms");
        assert!(listing.is_no_matches());
        assert!(listing.pagination.pages.is_empty());

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["outcome"], "no_matches");
        assert_eq!(json["criteria"]["q"], "zzz");
        assert_eq!(json["criteria"]["page"], 1);
    }
}
