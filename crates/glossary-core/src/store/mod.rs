//! Content store abstraction.
//!
//! The [`ContentStore`] trait is the Result Fetcher boundary: it issues a
//! filtered, paginated query and returns a [`ResultPage`]. It owns no state
//! of its own. The application crate provides the HTTP implementation; the
//! [`memory`] module provides an in-memory one for tests and embedders.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Category, ResultPage, Term};
use crate::query::TermQuery;

/// Failures at the store boundary.
///
/// Both variants are the "remote unavailable" condition: the store could not
/// produce a trustworthy answer. Neither is recovered locally; callers
/// surface an error state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or answered with a failure status.
    #[error("content store unavailable: {0}")]
    RemoteUnavailable(String),
    /// The store answered, but the payload could not be decoded.
    #[error("content store returned a malformed payload: {0}")]
    Malformed(String),
}

/// Read-only access to terms and categories.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`list_terms`](ContentStore::list_terms) | Filtered, sorted, paginated term query |
/// | [`list_categories`](ContentStore::list_categories) | The full category lookup set |
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Runs a term query. `total_count` covers the whole matching collection.
    async fn list_terms(&self, query: &TermQuery) -> Result<ResultPage<Term>, StoreError>;

    /// Returns every category.
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;
}
