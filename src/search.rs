//! Term listing and search.
//!
//! This module provides the application-level entry points for listing
//! pages. The filter construction, pagination, and view assembly live in
//! `glossary-core`; this wrapper issues the store calls and formats CLI output.
//!
//! A listing performs exactly one category fetch and one term fetch. They are
//! independent reads, so they run concurrently and are awaited jointly:
//! either both succeed and a complete [`TermListing`] is built, or the first
//! error is returned and nothing partial escapes.

use anyhow::Result;

use glossary_core::criteria::FilterCriteria;
use glossary_core::listing::TermListing;
use glossary_core::query::build_listing_query;
use glossary_core::store::{ContentStore, StoreError};

use crate::client::HttpContentStore;
use crate::config::Config;

/// Core listing function returning the structured view.
///
/// Shared by `gls search` (CLI) and `GET /terms` (HTTP server).
pub async fn load_listing<S>(
    store: &S,
    criteria: FilterCriteria,
    base_path: &str,
) -> Result<TermListing, StoreError>
where
    S: ContentStore + ?Sized,
{
    let query = build_listing_query(&criteria);
    let (categories, page) =
        tokio::try_join!(store.list_categories(), store.list_terms(&query))?;

    log::debug!(
        "listing page {} matched {} terms ({} on page)",
        criteria.page(),
        page.total_count,
        page.items.len()
    );

    Ok(TermListing::assemble(criteria, categories, page, base_path))
}

/// CLI entry point: calls [`load_listing`] and prints the page to stdout.
pub async fn run_search(config: &Config, criteria: FilterCriteria) -> Result<()> {
    let store = HttpContentStore::new(&config.store)?;
    let listing = load_listing(&store, criteria, &config.site.base_path).await?;

    if let Some(ref category) = listing.selected_category {
        println!("Category: {} {}", category.icon, category.name);
    }

    if listing.is_no_matches() {
        println!("No terms found.");
        println!("View all: {}", listing.view_all_href);
        return Ok(());
    }

    println!(
        "{} terms (page {} of {})",
        listing.total_count, listing.pagination.current, listing.pagination.total_pages
    );
    println!();

    for term in &listing.terms {
        let difficulty = term
            .difficulty
            .iter()
            .map(|d| d.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{} {} [{}] ({})",
            term.category.icon, term.title, term.category.name, difficulty
        );
        println!("    slug: {}", term.slug);
        if !term.description.is_empty() {
            let excerpt: String = term.description.chars().take(80).collect();
            println!("    {}", excerpt.replace('\n', " ").trim());
        }
    }

    println!();
    let pages = listing
        .pagination
        .pages
        .iter()
        .map(|p| {
            if p.current {
                format!("[{}]", p.page)
            } else {
                p.page.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    println!("pages: {}", pages);
    if let Some(ref prev) = listing.pagination.previous {
        println!("previous: {}", prev);
    }
    if let Some(ref next) = listing.pagination.next {
        println!("next: {}", next);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use glossary_core::listing::ListingOutcome;
    use glossary_core::models::{Category, Difficulty, Term};
    use glossary_core::store::memory::InMemoryStore;

    fn category(id: &str) -> Category {
        Category {
            id: id.to_string(),
            name: id.to_string(),
            icon: "📁".to_string(),
            slug: id.to_string(),
            description: None,
        }
    }

    fn store_with(n: i64) -> InMemoryStore {
        let terms = (1..=n)
            .map(|i| Term {
                id: format!("t{}", i),
                title: format!("Term {}", i),
                slug: format!("term-{}", i),
                description: String::new(),
                category: category(if i % 2 == 0 { "network" } else { "security" }),
                difficulty: vec![Difficulty::Beginner],
                search_title: Some(format!("term{}", i)),
                published_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                order: i,
            })
            .collect();
        InMemoryStore::with_content(terms, vec![category("security"), category("network")])
    }

    #[tokio::test]
    async fn test_listing_joins_categories_and_terms() {
        let store = store_with(30);
        let listing = load_listing(&store, FilterCriteria::new().with_page(2), "/terms")
            .await
            .unwrap();
        assert_eq!(listing.outcome, ListingOutcome::Results);
        assert_eq!(listing.categories.len(), 2);
        assert_eq!(listing.total_count, 30);
        assert_eq!(listing.terms.len(), 12);
        assert_eq!(listing.terms[0].order, 13);
        assert_eq!(listing.pagination.total_pages, 3);
    }

    #[tokio::test]
    async fn test_listing_no_matches() {
        let store = store_with(5);
        let listing = load_listing(&store, FilterCriteria::new().with_query("nothing"), "/terms")
            .await
            .unwrap();
        assert!(listing.is_no_matches());
        assert_eq!(listing.view_all_href, "/terms");
    }

    #[tokio::test]
    async fn test_listing_propagates_store_failure() {
        let store = store_with(5);
        store.set_offline(true);
        let result = load_listing(&store, FilterCriteria::new(), "/terms").await;
        assert!(matches!(result, Err(StoreError::RemoteUnavailable(_))));
    }
}
