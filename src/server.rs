//! Glossary JSON HTTP server.
//!
//! Exposes the listing, detail, and category views as JSON for a
//! presentation layer to render. Handlers are thin: they turn query
//! parameters into [`FilterCriteria`] and delegate to [`load_listing`] and
//! [`get_term`].
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check (returns version) |
//! | `GET`  | `/categories` | All categories |
//! | `GET`  | `/terms?page&category&difficulty&q` | One listing page |
//! | `GET`  | `/terms/{slug}` | A term with related terms |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "remote_unavailable", "message": "content store unavailable: ..." } }
//! ```
//!
//! Error codes: `not_found` (404), `remote_unavailable` (502).
//!
//! An empty listing is not an error: `GET /terms` answers 200 with
//! `"outcome": "no_matches"` and a `view_all_href`.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so browser front ends on
//! other origins can call the API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use glossary_core::criteria::FilterCriteria;
use glossary_core::listing::TermListing;
use glossary_core::models::Category;
use glossary_core::store::{ContentStore, StoreError};

use crate::client::HttpContentStore;
use crate::config::Config;
use crate::get::{get_term, TermDetail};
use crate::search::load_listing;

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    store: Arc<dyn ContentStore>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn ContentStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }
}

/// Builds the router. Exposed so tests and embedders can serve any store.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/categories", get(handle_categories))
        .route("/terms", get(handle_list_terms))
        .route("/terms/{slug}", get(handle_get_term))
        .layer(cors)
        .with_state(state)
}

/// Starts the server against the configured HTTP content store.
///
/// Binds to `[server].bind` and runs until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let store = HttpContentStore::new(&config.store)?;
    run_server_with_store(config, Arc::new(store)).await
}

/// Starts the server against any [`ContentStore`].
pub async fn run_server_with_store(
    config: &Config,
    store: Arc<dyn ContentStore>,
) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let app = router(AppState::new(config.clone(), store));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    println!("Glossary server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

/// Both store failure variants are the remote-unavailable condition.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        log::error!("{}", err);
        AppError {
            status: StatusCode::BAD_GATEWAY,
            code: "remote_unavailable".to_string(),
            message: err.to_string(),
        }
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /categories ============

#[derive(Serialize)]
struct CategoriesResponse {
    categories: Vec<Category>,
}

async fn handle_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, AppError> {
    let categories = state.store.list_categories().await?;
    Ok(Json(CategoriesResponse { categories }))
}

// ============ GET /terms ============

/// Handler for `GET /terms`.
///
/// Malformed parameters never fail the request: they fall back to "no
/// constraint" (or page 1).
async fn handle_list_terms(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<TermListing>, AppError> {
    let criteria = FilterCriteria::from_params(params);
    let listing = load_listing(
        state.store.as_ref(),
        criteria,
        &state.config.site.base_path,
    )
    .await?;
    Ok(Json(listing))
}

// ============ GET /terms/{slug} ============

async fn handle_get_term(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<TermDetail>, AppError> {
    let detail = get_term(state.store.as_ref(), &slug, state.config.site.related_limit)
        .await?
        .ok_or_else(|| not_found(format!("term not found: {}", slug)))?;
    Ok(Json(detail))
}
