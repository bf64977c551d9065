//! # Glossary Core
//!
//! Shared, runtime-free logic for Glossary Search: data models, filter
//! criteria, the typed filter expression, the query builder, the client-side
//! refiner, pagination windowing, and the content store abstraction.
//!
//! This crate contains no tokio, reqwest, or other I/O dependencies. The
//! application crate supplies the HTTP-backed store and the delivery
//! surfaces (CLI and JSON server).
//!
//! ## Pipeline
//!
//! ```text
//!  URL params ──▶ FilterCriteria ──▶ query::build_listing_query ──▶ Store::list_terms
//!                      │                                               │
//!                      │                                               ▼
//!                      │                                         ResultPage<Term>
//!                      │                                               │
//!                      ▼                                               ▼
//!              refine::refine(batch)                      listing::TermListing
//!             (already-loaded batch)                  (pagination + nav links)
//! ```

pub mod criteria;
pub mod filter;
pub mod listing;
pub mod models;
pub mod pagination;
pub mod query;
pub mod refine;
pub mod store;
