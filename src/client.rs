//! HTTP content store client.
//!
//! [`HttpContentStore`] implements [`ContentStore`] against a headless CMS
//! that speaks the microCMS list API:
//!
//! ```text
//! GET {base_url}/{terms_endpoint}?limit=12&offset=0&orders=order&filters=category[equals]security
//! GET {base_url}/{categories_endpoint}?limit=100
//! ```
//!
//! Both answer `{ "contents": [...], "totalCount": n, "offset": n, "limit": n }`.
//!
//! # Retry Strategy
//!
//! Every request is a side-effect-free GET, so retrying is safe. Retries are
//! bounded by `store.max_retries`:
//! - transport errors, HTTP 429, and 5xx → retry with exponential backoff
//!   (`retry_backoff_ms`, doubled per attempt, capped at 2^4)
//! - other 4xx → fail immediately
//! - a malformed body → fail immediately
//!
//! All failures surface as [`StoreError`]; nothing is recovered here.

use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use glossary_core::models::{Category, ResultPage, Term};
use glossary_core::query::TermQuery;
use glossary_core::store::{ContentStore, StoreError};

use crate::config::StoreConfig;

/// Longest slice of an error body kept in error messages.
const MAX_ERROR_BODY: usize = 200;

/// The CMS list response envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse<T> {
    contents: Vec<T>,
    total_count: u64,
}

/// [`ContentStore`] backed by the CMS HTTP API.
pub struct HttpContentStore {
    client: reqwest::Client,
    terms_url: String,
    categories_url: String,
    api_key: Option<(HeaderName, HeaderValue)>,
    max_retries: u32,
    retry_backoff: Duration,
    category_limit: u32,
}

fn endpoint_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim().trim_end_matches('/'),
        endpoint.trim().trim_start_matches('/')
    )
}

/// Exponential backoff before retry `attempt` (1-based), exponent capped at 4.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(1u32 << attempt.saturating_sub(1).min(4))
}

fn truncate(text: &str) -> String {
    text.chars().take(MAX_ERROR_BODY).collect()
}

impl HttpContentStore {
    /// Builds the client. The API key is read from the environment variable
    /// named by `api_key_env`; when it is unset, requests go out without one.
    pub fn new(config: &StoreConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let api_key = match std::env::var(&config.api_key_env) {
            Ok(key) if !key.is_empty() => {
                let name = HeaderName::from_bytes(config.api_key_header.as_bytes()).map_err(|e| {
                    anyhow::anyhow!("invalid store.api_key_header '{}': {}", config.api_key_header, e)
                })?;
                let mut value = HeaderValue::from_str(&key)
                    .map_err(|e| anyhow::anyhow!("invalid API key in {}: {}", config.api_key_env, e))?;
                value.set_sensitive(true);
                Some((name, value))
            }
            _ => {
                log::debug!(
                    "{} not set; content store requests are unauthenticated",
                    config.api_key_env
                );
                None
            }
        };

        Ok(Self {
            client,
            terms_url: endpoint_url(&config.base_url, &config.terms_endpoint),
            categories_url: endpoint_url(&config.base_url, &config.categories_endpoint),
            api_key,
            max_retries: config.max_retries,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
            category_limit: config.category_limit,
        })
    }

    /// GET `url` with `params`, retrying transient failures.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, StoreError> {
        let mut last_err = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = backoff_delay(self.retry_backoff, attempt);
                log::warn!(
                    "retrying {} in {:?} (attempt {}/{})",
                    url,
                    delay,
                    attempt,
                    self.max_retries
                );
                tokio::time::sleep(delay).await;
            }

            let mut request = self.client.get(url).query(params);
            if let Some((ref name, ref value)) = self.api_key {
                request = request.header(name.clone(), value.clone());
            }
            log::debug!("GET {} {:?}", url, params);

            match request.send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        let body = response.bytes().await.map_err(|e| {
                            StoreError::RemoteUnavailable(format!(
                                "reading response from {} failed: {}",
                                url, e
                            ))
                        })?;
                        return serde_json::from_slice(&body)
                            .map_err(|e| StoreError::Malformed(format!("{}: {}", url, e)));
                    }

                    let body_text = response.text().await.unwrap_or_default();
                    let err = StoreError::RemoteUnavailable(format!(
                        "{} returned {}: {}",
                        url,
                        status,
                        truncate(&body_text)
                    ));

                    // Rate limited or server error: retry
                    if status.as_u16() == 429 || status.is_server_error() {
                        last_err = Some(err);
                        continue;
                    }

                    return Err(err);
                }
                Err(e) => {
                    last_err = Some(StoreError::RemoteUnavailable(format!(
                        "request to {} failed: {}",
                        url, e
                    )));
                    continue;
                }
            }
        }

        Err(last_err.unwrap_or_else(|| {
            StoreError::RemoteUnavailable(format!("{}: no attempts made", url))
        }))
    }
}

/// Query parameters for a term query, in the CMS's vocabulary.
fn term_query_params(query: &TermQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("limit", query.limit.to_string()),
        ("offset", query.offset.to_string()),
        ("orders", query.order.wire().to_string()),
    ];
    if let Some(ref filter) = query.filter {
        params.push(("filters", filter.to_wire()));
    }
    params
}

#[async_trait]
impl ContentStore for HttpContentStore {
    async fn list_terms(&self, query: &TermQuery) -> Result<ResultPage<Term>, StoreError> {
        let params = term_query_params(query);
        let response: ListResponse<Term> = self.get_json(&self.terms_url, &params).await?;
        Ok(ResultPage {
            items: response.contents,
            total_count: response.total_count,
        })
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let params = [("limit", self.category_limit.to_string())];
        let response: ListResponse<Category> =
            self.get_json(&self.categories_url, &params).await?;
        Ok(response.contents)
    }
}
