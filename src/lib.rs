//! # Glossary Search
//!
//! Search, filtering, and pagination for an IT-terminology glossary whose
//! entries live in a headless CMS.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌───────────────┐   ┌──────────────┐
//! │  URL params  │──▶│ Query Builder │──▶│ Content store│
//! │ page/cat/q…  │   │ (FilterExpr)  │   │  (HTTP/CMS)  │
//! └──────────────┘   └───────────────┘   └──────┬───────┘
//!                                               │ ResultPage + categories
//!                      ┌────────────────────────┤
//!                      ▼                        ▼
//!                 ┌──────────┐           ┌────────────┐
//!                 │   CLI    │           │ JSON server│
//!                 │  (gls)   │           │  (axum)    │
//!                 └──────────┘           └────────────┘
//! ```
//!
//! The pure pipeline (criteria, filter expressions, query builder, client
//! refiner, pagination, listing view, store trait) lives in `glossary-core`.
//! This crate adds the HTTP content store, configuration, and the delivery
//! surfaces.
//!
//! ## Quick Start
//!
//! ```bash
//! gls categories                             # list categories
//! gls search 暗号 --category security        # filtered listing
//! gls get firewall                           # one term + related terms
//! gls refine --input batch.json --q fire     # refine a loaded batch offline
//! gls serve                                  # start the JSON server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`client`] | HTTP content store with bounded retry |
//! | [`search`] | Listing pages (concurrent term + category fetch) |
//! | [`get`] | Term detail with related terms |
//! | [`categories`] | Category listing |
//! | [`refine`] | Offline refinement of a loaded batch |
//! | [`server`] | JSON HTTP server |

pub mod categories;
pub mod client;
pub mod config;
pub mod get;
pub mod refine;
pub mod search;
pub mod server;

pub use glossary_core as core;
