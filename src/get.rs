//! Term retrieval by slug.
//!
//! Fetches a single term plus a handful of related terms from the same
//! category. Used by both the `gls get` CLI command and the
//! `GET /terms/{slug}` HTTP endpoint.
//!
//! # Usage
//!
//! ```bash
//! gls get firewall
//! ```

use anyhow::{bail, Result};
use serde::Serialize;

use glossary_core::filter::is_wire_safe;
use glossary_core::models::Term;
use glossary_core::query::{build_detail_query, build_related_query};
use glossary_core::store::{ContentStore, StoreError};

use crate::client::HttpContentStore;
use crate::config::Config;

/// A term with related terms from its category.
#[derive(Debug, Clone, Serialize)]
pub struct TermDetail {
    pub term: Term,
    pub related: Vec<Term>,
}

/// Looks up a term by slug. Returns `Ok(None)` when no term has that slug,
/// including slugs carrying filter operator syntax, which never reach the
/// store.
///
/// The related-terms query depends on the term's category, so the two
/// fetches run one after the other.
pub async fn get_term<S>(
    store: &S,
    slug: &str,
    related_limit: u32,
) -> Result<Option<TermDetail>, StoreError>
where
    S: ContentStore + ?Sized,
{
    if !is_wire_safe(slug) {
        log::debug!("rejecting slug with operator syntax: {:?}", slug);
        return Ok(None);
    }

    let page = store.list_terms(&build_detail_query(slug)).await?;
    let term = match page.items.into_iter().next() {
        Some(t) => t,
        None => return Ok(None),
    };

    let related = if related_limit == 0 {
        Vec::new()
    } else {
        let page = store
            .list_terms(&build_related_query(&term, related_limit))
            .await?;
        page.items
            .into_iter()
            .filter(|t| t.id != term.id)
            .take(related_limit as usize)
            .collect()
    };

    Ok(Some(TermDetail { term, related }))
}

/// CLI entry point for `gls get <slug>`.
pub async fn run_get(config: &Config, slug: &str) -> Result<()> {
    let store = HttpContentStore::new(&config.store)?;
    let detail = match get_term(&store, slug, config.site.related_limit).await? {
        Some(d) => d,
        None => bail!("term not found: {}", slug),
    };
    let term = &detail.term;

    println!("--- Term ---");
    println!("title:        {}", term.title);
    println!("slug:         {}", term.slug);
    println!(
        "category:     {} {}",
        term.category.icon, term.category.name
    );
    println!(
        "difficulty:   {}",
        term.difficulty
            .iter()
            .map(|d| d.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "published:    {}",
        term.published_at.format("%Y-%m-%d")
    );
    println!();
    println!("{}", term.description);

    if !detail.related.is_empty() {
        println!();
        println!("--- Related ---");
        for r in &detail.related {
            println!("  {} ({})", r.title, r.slug);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use glossary_core::models::{Category, Difficulty};
    use glossary_core::store::memory::InMemoryStore;

    fn term(id: &str, category_id: &str, order: i64) -> Term {
        Term {
            id: id.to_string(),
            title: id.to_uppercase(),
            slug: id.to_string(),
            description: String::new(),
            category: Category {
                id: category_id.to_string(),
                name: category_id.to_string(),
                icon: String::new(),
                slug: category_id.to_string(),
                description: None,
            },
            difficulty: vec![Difficulty::Intermediate],
            search_title: None,
            published_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            order,
        }
    }

    fn store() -> InMemoryStore {
        InMemoryStore::with_content(
            vec![
                term("aes", "security", 1),
                term("rsa", "security", 2),
                term("tcp", "network", 3),
                term("tls", "security", 4),
                term("vpn", "security", 5),
            ],
            vec![],
        )
    }

    #[tokio::test]
    async fn test_get_term_with_related() {
        let detail = get_term(&store(), "rsa", 2).await.unwrap().unwrap();
        assert_eq!(detail.term.id, "rsa");
        let related: Vec<&str> = detail.related.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(related, vec!["aes", "tls"]);
    }

    #[tokio::test]
    async fn test_get_term_not_found() {
        assert!(get_term(&store(), "nope", 4).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_slug_with_operator_syntax_not_found() {
        let found = get_term(&store(), "aes[or]category[equals]network", 4)
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_related_disabled() {
        let detail = get_term(&store(), "aes", 0).await.unwrap().unwrap();
        assert!(detail.related.is_empty());
    }
}
