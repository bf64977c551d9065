//! In-memory [`ContentStore`] implementation for tests and embedders.
//!
//! Terms and categories live in `Vec`s behind `std::sync::RwLock`. Queries
//! are answered with the same
//! [`FilterExpr::matches`](crate::filter::FilterExpr::matches) predicate the
//! client refiner uses, so both execution sites agree on what matches.
//!
//! The store can be switched offline to exercise the remote-unavailable path.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::models::{Category, ResultPage, Term};
use crate::query::{SortOrder, TermQuery};

use super::{ContentStore, StoreError};

/// In-memory content store.
pub struct InMemoryStore {
    terms: RwLock<Vec<Term>>,
    categories: RwLock<Vec<Category>>,
    offline: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            terms: RwLock::new(Vec::new()),
            categories: RwLock::new(Vec::new()),
            offline: AtomicBool::new(false),
        }
    }

    pub fn with_content(terms: Vec<Term>, categories: Vec<Category>) -> Self {
        Self {
            terms: RwLock::new(terms),
            categories: RwLock::new(categories),
            offline: AtomicBool::new(false),
        }
    }

    /// Inserts or replaces a term by id.
    pub fn upsert_term(&self, term: Term) {
        let mut terms = self.terms.write().unwrap();
        terms.retain(|t| t.id != term.id);
        terms.push(term);
    }

    /// Inserts or replaces a category by id.
    pub fn upsert_category(&self, category: Category) {
        let mut categories = self.categories.write().unwrap();
        categories.retain(|c| c.id != category.id);
        categories.push(category);
    }

    /// While offline every call fails with [`StoreError::RemoteUnavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::RemoteUnavailable(
                "in-memory store is offline".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentStore for InMemoryStore {
    async fn list_terms(&self, query: &TermQuery) -> Result<ResultPage<Term>, StoreError> {
        self.check_online()?;
        let terms = self.terms.read().unwrap();
        let mut matched: Vec<&Term> = terms
            .iter()
            .filter(|t| query.filter.as_ref().map_or(true, |f| f.matches(t)))
            .collect();

        match query.order {
            SortOrder::DisplayOrder => matched.sort_by(|a, b| a.order.cmp(&b.order)),
            SortOrder::NewestFirst => {
                matched.sort_by(|a, b| b.published_at.cmp(&a.published_at))
            }
        }

        let total_count = matched.len() as u64;
        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        let items = matched
            .into_iter()
            .skip(offset)
            .take(query.limit as usize)
            .cloned()
            .collect();

        Ok(ResultPage { items, total_count })
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        self.check_online()?;
        Ok(self.categories.read().unwrap().clone())
    }
}
