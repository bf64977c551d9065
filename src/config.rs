use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub store: StoreConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// API root, e.g. `https://example.microcms.io/api/v1`.
    pub base_url: String,
    #[serde(default = "default_terms_endpoint")]
    pub terms_endpoint: String,
    #[serde(default = "default_categories_endpoint")]
    pub categories_endpoint: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    #[serde(default = "default_category_limit")]
    pub category_limit: u32,
}

fn default_terms_endpoint() -> String {
    "terms".to_string()
}
fn default_categories_endpoint() -> String {
    "categories".to_string()
}
fn default_api_key_env() -> String {
    "GLOSSARY_API_KEY".to_string()
}
fn default_api_key_header() -> String {
    "X-MICROCMS-API-KEY".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_max_retries() -> u32 {
    2
}
fn default_retry_backoff_ms() -> u64 {
    200
}
/// Upper bound for `store.retry_backoff_ms` (one minute).
const MAX_RETRY_BACKOFF_MS: u64 = 60_000;

fn default_category_limit() -> u32 {
    100
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7340".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Path that listing links are built against.
    #[serde(default = "default_base_path")]
    pub base_path: String,
    /// How many related terms the detail view shows.
    #[serde(default = "default_related_limit")]
    pub related_limit: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            related_limit: default_related_limit(),
        }
    }
}

fn default_base_path() -> String {
    "/terms".to_string()
}
fn default_related_limit() -> u32 {
    4
}

impl Config {
    /// Config pointing at `base_url` with every other setting defaulted.
    pub fn for_base_url(base_url: &str) -> Self {
        Self {
            store: StoreConfig {
                base_url: base_url.to_string(),
                terms_endpoint: default_terms_endpoint(),
                categories_endpoint: default_categories_endpoint(),
                api_key_env: default_api_key_env(),
                api_key_header: default_api_key_header(),
                timeout_secs: default_timeout_secs(),
                max_retries: default_max_retries(),
                retry_backoff_ms: default_retry_backoff_ms(),
                category_limit: default_category_limit(),
            },
            server: ServerConfig::default(),
            site: SiteConfig::default(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        // Validate store
        let base = self.store.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            anyhow::bail!(
                "store.base_url must start with http:// or https:// (got '{}')",
                self.store.base_url
            );
        }
        if self.store.terms_endpoint.trim().is_empty() {
            anyhow::bail!("store.terms_endpoint must not be empty");
        }
        if self.store.categories_endpoint.trim().is_empty() {
            anyhow::bail!("store.categories_endpoint must not be empty");
        }
        if self.store.timeout_secs == 0 {
            anyhow::bail!("store.timeout_secs must be > 0");
        }
        if self.store.max_retries > 10 {
            anyhow::bail!("store.max_retries must be <= 10");
        }
        if self.store.retry_backoff_ms > MAX_RETRY_BACKOFF_MS {
            anyhow::bail!(
                "store.retry_backoff_ms must be <= {}",
                MAX_RETRY_BACKOFF_MS
            );
        }
        if self.store.category_limit == 0 {
            anyhow::bail!("store.category_limit must be > 0");
        }

        // Validate site
        if !self.site.base_path.starts_with('/') {
            anyhow::bail!("site.base_path must start with '/'");
        }

        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    Config::from_toml_str(&content)
}
