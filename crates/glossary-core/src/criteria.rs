//! Filter criteria derived from page query parameters.
//!
//! A [`FilterCriteria`] is built fresh for every request or render cycle and
//! never persisted. Every optional criterion that is absent means "no
//! constraint", never "match nothing".
//!
//! # Query parameters
//!
//! | Parameter | Meaning | Default |
//! |-----------|---------|---------|
//! | `page` | 1-based page number | `1` |
//! | `category` | category identifier | none |
//! | `difficulty` | `beginner`, `intermediate`, or `advanced` | none |
//! | `q` | free-text query | none |

use serde::Serialize;

use crate::filter::is_wire_safe;
use crate::models::Difficulty;

/// Active narrowing parameters for one request.
///
/// The page number is private so the `page >= 1` invariant cannot be broken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    #[serde(rename = "q")]
    pub query: Option<String>,
    page: u32,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            category: None,
            difficulty: None,
            query: None,
            page: 1,
        }
    }
}

/// Empty and whitespace-only values count as absent.
fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// A non-blank value that is safe to put on the wire; anything else is
/// dropped with a warning.
fn filter_value(name: &str, value: &str) -> Option<String> {
    let value = non_blank(value)?;
    if is_wire_safe(&value) {
        Some(value)
    } else {
        log::warn!("ignoring {} filter with operator syntax: {:?}", name, value);
        None
    }
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl AsRef<str>) -> Self {
        self.category = filter_value("category", category.as_ref());
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_query(mut self, query: impl AsRef<str>) -> Self {
        self.query = filter_value("q", query.as_ref());
        self
    }

    /// Sets the page number; `0` is clamped to `1`.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// True when no narrowing criterion is present (the page is ignored).
    pub fn is_unfiltered(&self) -> bool {
        self.category.is_none() && self.difficulty.is_none() && self.query.is_none()
    }

    /// Builds criteria from raw `(name, value)` query parameters.
    ///
    /// Unknown parameter names are ignored. A malformed `page` falls back to
    /// `1`, and an unrecognised difficulty label is dropped with a warning.
    pub fn from_params<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut criteria = Self::default();
        for (key, value) in params {
            let value = value.as_ref();
            match key.as_ref() {
                "page" => {
                    let page = value.trim().parse::<i64>().unwrap_or(1);
                    criteria.page = u32::try_from(page.max(1)).unwrap_or(u32::MAX);
                }
                "category" => criteria.category = filter_value("category", value),
                "difficulty" => {
                    criteria.difficulty = match non_blank(value) {
                        None => None,
                        Some(label) => match label.parse::<Difficulty>() {
                            Ok(d) => Some(d),
                            Err(e) => {
                                log::warn!("ignoring difficulty filter: {}", e);
                                None
                            }
                        },
                    };
                }
                "q" => criteria.query = filter_value("q", value),
                _ => {}
            }
        }
        criteria
    }

    /// Percent-encoded query string for `page`, preserving every active
    /// filter. Parameter order is fixed: `page`, `category`, `difficulty`, `q`.
    pub fn query_string_for_page(&self, page: u32) -> String {
        let mut parts = vec![format!("page={}", page.max(1))];
        if let Some(ref category) = self.category {
            parts.push(format!("category={}", urlencoding::encode(category)));
        }
        if let Some(difficulty) = self.difficulty {
            parts.push(format!("difficulty={}", difficulty.as_str()));
        }
        if let Some(ref query) = self.query {
            parts.push(format!("q={}", urlencoding::encode(query)));
        }
        parts.join("&")
    }
}
