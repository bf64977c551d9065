//! Typed filter expressions.
//!
//! A [`FilterExpr`] is the single representation of "which terms match" used
//! on both execution sites: the HTTP store serializes it to the content API's
//! wire syntax with [`FilterExpr::to_wire`], and the in-memory paths evaluate
//! it directly with [`FilterExpr::matches`].
//!
//! # Wire syntax
//!
//! ```text
//! category[equals]security[and]difficulty[contains]advanced[and]searchTitle[contains]暗号
//! ```
//!
//! Values are written verbatim; percent-encoding is the HTTP client's job.
//! A value holding a bracketed token such as `[and]` would change the clause
//! structure on the wire, so callers check [`is_wire_safe`] before building
//! a clause from user input.

use std::fmt;

use crate::models::{Difficulty, Term};

/// A filterable field of a [`Term`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The owning category's identifier.
    Category,
    /// The difficulty label set.
    Difficulty,
    /// The normalized search title.
    SearchTitle,
    Slug,
}

/// True when `value` contains no bracketed operator token (`[and]`,
/// `[equals]`, `[not_exists]`, ...) and so serializes as exactly one clause
/// value.
pub fn is_wire_safe(value: &str) -> bool {
    let mut rest = value;
    while let Some(open) = rest.find('[') {
        let after = &rest[open + 1..];
        if let Some(close) = after.find(']') {
            let token = &after[..close];
            if !token.is_empty() && token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return false;
            }
        }
        rest = after;
    }
    true
}

impl Field {
    /// Field name as the content API spells it.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Field::Category => "category",
            Field::Difficulty => "difficulty",
            Field::SearchTitle => "searchTitle",
            Field::Slug => "slug",
        }
    }
}

/// A filter expression: equality and substring clauses combined with AND.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterExpr {
    Equals { field: Field, value: String },
    Contains { field: Field, value: String },
    And(Vec<FilterExpr>),
}

impl FilterExpr {
    pub fn equals(field: Field, value: impl Into<String>) -> Self {
        FilterExpr::Equals {
            field,
            value: value.into(),
        }
    }

    pub fn contains(field: Field, value: impl Into<String>) -> Self {
        FilterExpr::Contains {
            field,
            value: value.into(),
        }
    }

    /// Combines clauses with AND.
    ///
    /// Returns `None` for no clauses and the clause itself for exactly one,
    /// so an unfiltered query carries no expression at all.
    pub fn all(mut clauses: Vec<FilterExpr>) -> Option<FilterExpr> {
        match clauses.len() {
            0 => None,
            1 => clauses.pop(),
            _ => Some(FilterExpr::And(clauses)),
        }
    }

    /// Number of leaf clauses (nested `And`s are flattened).
    pub fn clause_count(&self) -> usize {
        match self {
            FilterExpr::And(children) => children.iter().map(|c| c.clause_count()).sum(),
            _ => 1,
        }
    }

    /// Serializes to the content API's `field[operator]value[and]...` syntax.
    pub fn to_wire(&self) -> String {
        match self {
            FilterExpr::Equals { field, value } => {
                format!("{}[equals]{}", field.wire_name(), value)
            }
            FilterExpr::Contains { field, value } => {
                format!("{}[contains]{}", field.wire_name(), value)
            }
            FilterExpr::And(children) => children
                .iter()
                .map(|c| c.to_wire())
                .filter(|w| !w.is_empty())
                .collect::<Vec<_>>()
                .join("[and]"),
        }
    }

    /// Evaluates the expression against an in-memory term.
    ///
    /// `Contains` on the search title is a case-insensitive substring test and
    /// never matches a term without a search title. Both operators on
    /// [`Field::Difficulty`] test set membership.
    pub fn matches(&self, term: &Term) -> bool {
        match self {
            FilterExpr::And(children) => children.iter().all(|c| c.matches(term)),
            FilterExpr::Equals { field, value } => match field {
                Field::Category => term.category.id == *value,
                Field::Slug => term.slug == *value,
                Field::SearchTitle => term.search_title.as_deref() == Some(value.as_str()),
                Field::Difficulty => has_label(term, value),
            },
            FilterExpr::Contains { field, value } => match field {
                Field::Category => contains_folded(&term.category.id, value),
                Field::Slug => contains_folded(&term.slug, value),
                Field::SearchTitle => term
                    .search_title
                    .as_deref()
                    .is_some_and(|title| contains_folded(title, value)),
                Field::Difficulty => has_label(term, value),
            },
        }
    }
}

impl fmt::Display for FilterExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

fn has_label(term: &Term, label: &str) -> bool {
    label
        .parse::<Difficulty>()
        .is_ok_and(|d| term.has_difficulty(d))
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use chrono::{TimeZone, Utc};

    fn term(search_title: Option<&str>) -> Term {
        Term {
            id: "t1".to_string(),
            title: "ファイアウォール".to_string(),
            slug: "firewall".to_string(),
            description: String::new(),
            category: Category {
                id: "security".to_string(),
                name: "セキュリティ".to_string(),
                icon: "🔒".to_string(),
                slug: "security".to_string(),
                description: None,
            },
            difficulty: vec![Difficulty::Beginner, Difficulty::Advanced],
            search_title: search_title.map(str::to_string),
            published_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            order: 1,
        }
    }

    #[test]
    fn test_all_collapses() {
        assert_eq!(FilterExpr::all(vec![]), None);
        let single = FilterExpr::equals(Field::Category, "security");
        assert_eq!(FilterExpr::all(vec![single.clone()]), Some(single));
    }

    #[test]
    fn test_wire_format() {
        let expr = FilterExpr::And(vec![
            FilterExpr::equals(Field::Category, "security"),
            FilterExpr::contains(Field::Difficulty, "advanced"),
            FilterExpr::contains(Field::SearchTitle, "暗号"),
        ]);
        assert_eq!(
            expr.to_wire(),
            "category[equals]security[and]difficulty[contains]advanced[and]searchTitle[contains]暗号"
        );
        assert_eq!(expr.clause_count(), 3);
    }

    #[test]
    fn test_nested_and_flattens_on_wire() {
        let expr = FilterExpr::And(vec![
            FilterExpr::equals(Field::Slug, "dns"),
            FilterExpr::And(vec![FilterExpr::equals(Field::Category, "network")]),
        ]);
        assert_eq!(expr.to_wire(), "slug[equals]dns[and]category[equals]network");
        assert_eq!(expr.clause_count(), 2);
    }

    #[test]
    fn test_search_title_contains_case_insensitive() {
        let t = term(Some("ファイアウォール/Firewall"));
        assert!(FilterExpr::contains(Field::SearchTitle, "fire").matches(&t));
        assert!(FilterExpr::contains(Field::SearchTitle, "FIREWALL").matches(&t));
        assert!(FilterExpr::contains(Field::SearchTitle, "ファイア").matches(&t));
        assert!(!FilterExpr::contains(Field::SearchTitle, "router").matches(&t));
    }

    #[test]
    fn test_missing_search_title_never_matches() {
        let t = term(None);
        assert!(!FilterExpr::contains(Field::SearchTitle, "ファイア").matches(&t));
        assert!(!FilterExpr::contains(Field::SearchTitle, "firewall").matches(&t));
    }

    #[test]
    fn test_difficulty_membership() {
        let t = term(None);
        assert!(FilterExpr::contains(Field::Difficulty, "advanced").matches(&t));
        assert!(!FilterExpr::contains(Field::Difficulty, "intermediate").matches(&t));
        assert!(!FilterExpr::contains(Field::Difficulty, "bogus").matches(&t));
    }

    #[test]
    fn test_wire_safety() {
        assert!(is_wire_safe("暗号"));
        assert!(is_wire_safe("a[b c]"));
        assert!(is_wire_safe("array[]"));
        assert!(is_wire_safe("[unclosed"));
        assert!(!is_wire_safe("x[and]category[equals]network"));
        assert!(!is_wire_safe("[[or]"));
        assert!(!is_wire_safe("dns[not_exists]"));
    }

    #[test]
    fn test_category_equality_is_exact() {
        let t = term(None);
        assert!(FilterExpr::equals(Field::Category, "security").matches(&t));
        assert!(!FilterExpr::equals(Field::Category, "Security").matches(&t));
        assert!(!FilterExpr::equals(Field::Category, "secur").matches(&t));
    }
}
