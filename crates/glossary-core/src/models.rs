//! Core data models shared by the query builder, the refiner, and the stores.
//!
//! Field names follow the content store's JSON (`camelCase`), so the same
//! types deserialize straight from the wire and serialize back out of the
//! JSON server unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A grouping of terms. Loaded once per page view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Icon glyph shown next to the name (usually a single emoji).
    #[serde(default)]
    pub icon: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Difficulty classification of a term.
///
/// Labels are lowercase on the wire and in URL parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a difficulty label is not one of the known labels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty label: '{0}' (expected beginner, intermediate, or advanced)")]
pub struct UnknownDifficulty(pub String);

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}

/// A single glossary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    /// Owning category. The store expands the reference into the full object.
    pub category: Category,
    /// One or more difficulty labels; matching any one is sufficient.
    #[serde(default)]
    pub difficulty: Vec<Difficulty>,
    /// Precomputed, synonym-expanded title used only for substring search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_title: Option<String>,
    pub published_at: DateTime<Utc>,
    /// Explicit display order; listings sort ascending on it.
    #[serde(default)]
    pub order: i64,
}

impl Term {
    pub fn has_difficulty(&self, difficulty: Difficulty) -> bool {
        self.difficulty.contains(&difficulty)
    }
}

/// One page of results plus the match count across the whole collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPage<T> {
    pub items: Vec<T>,
    pub total_count: u64,
}

impl<T> ResultPage<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_count == 0 && self.items.is_empty()
    }
}
