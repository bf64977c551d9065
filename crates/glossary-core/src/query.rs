//! Query builder: turns [`FilterCriteria`] into a store query.
//!
//! The builder is pure. It never mutates its input, and identical criteria
//! always produce an identical [`TermQuery`], which makes the output usable as
//! a cache key.

use crate::criteria::FilterCriteria;
use crate::filter::{is_wire_safe, Field, FilterExpr};
use crate::models::Term;

/// Listing page size. Fixed.
pub const PAGE_SIZE: u32 = 12;

/// Sort orders the content API understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Explicit display order, ascending.
    #[default]
    DisplayOrder,
    /// Publication timestamp, newest first.
    NewestFirst,
}

impl SortOrder {
    /// Value of the content API's `orders` parameter.
    pub fn wire(&self) -> &'static str {
        match self {
            SortOrder::DisplayOrder => "order",
            SortOrder::NewestFirst => "-publishedAt",
        }
    }
}

/// A fully specified term query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TermQuery {
    pub filter: Option<FilterExpr>,
    pub order: SortOrder,
    pub limit: u32,
    /// Zero-based offset into the whole matching collection.
    pub offset: u64,
}

/// Zero-based offset of the first entry on `page`.
pub fn offset_for_page(page: u32) -> u64 {
    u64::from(page.max(1) - 1) * u64::from(PAGE_SIZE)
}

/// The filter expression for a set of criteria.
///
/// Clause order is fixed (category, difficulty, free text) and absent
/// criteria contribute nothing. Values carrying operator syntax are treated
/// as absent, so the store and the in-memory refiner see the same clauses.
pub fn criteria_filter(criteria: &FilterCriteria) -> Option<FilterExpr> {
    let mut clauses = Vec::with_capacity(3);
    if let Some(category) = criteria.category.as_deref().filter(|v| is_wire_safe(v)) {
        clauses.push(FilterExpr::equals(Field::Category, category));
    }
    if let Some(difficulty) = criteria.difficulty {
        clauses.push(FilterExpr::contains(Field::Difficulty, difficulty.as_str()));
    }
    if let Some(query) = criteria.query.as_deref().filter(|v| is_wire_safe(v)) {
        clauses.push(FilterExpr::contains(Field::SearchTitle, query));
    }
    FilterExpr::all(clauses)
}

/// Query for one listing page.
pub fn build_listing_query(criteria: &FilterCriteria) -> TermQuery {
    TermQuery {
        filter: criteria_filter(criteria),
        order: SortOrder::DisplayOrder,
        limit: PAGE_SIZE,
        offset: offset_for_page(criteria.page()),
    }
}

/// Query for a single term by slug.
pub fn build_detail_query(slug: &str) -> TermQuery {
    TermQuery {
        filter: Some(FilterExpr::equals(Field::Slug, slug)),
        order: SortOrder::DisplayOrder,
        limit: 1,
        offset: 0,
    }
}

/// Query for terms sharing `term`'s category.
///
/// Asks for one extra entry because the term itself is part of the result
/// and is dropped by the caller.
pub fn build_related_query(term: &Term, limit: u32) -> TermQuery {
    TermQuery {
        filter: Some(FilterExpr::equals(Field::Category, term.category.id.clone())),
        order: SortOrder::DisplayOrder,
        limit: limit.saturating_add(1),
        offset: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    #[test]
    fn test_unfiltered_has_no_clauses() {
        let q = build_listing_query(&FilterCriteria::new());
        assert_eq!(q.filter, None);
        assert_eq!(q.limit, PAGE_SIZE);
        assert_eq!(q.offset, 0);
        assert_eq!(q.order, SortOrder::DisplayOrder);
    }

    #[test]
    fn test_offset_from_page() {
        assert_eq!(offset_for_page(1), 0);
        assert_eq!(offset_for_page(2), 12);
        assert_eq!(offset_for_page(9), 96);
        assert_eq!(offset_for_page(0), 0);
        let q = build_listing_query(&FilterCriteria::new().with_page(4));
        assert_eq!(q.offset, 36);
    }

    #[test]
    fn test_offset_does_not_overflow() {
        assert_eq!(
            offset_for_page(u32::MAX),
            u64::from(u32::MAX - 1) * u64::from(PAGE_SIZE)
        );
    }

    #[test]
    fn test_each_criterion_adds_one_clause() {
        let c = FilterCriteria::new().with_category("security");
        assert_eq!(
            criteria_filter(&c),
            Some(FilterExpr::equals(Field::Category, "security"))
        );

        let c = FilterCriteria::new().with_difficulty(Difficulty::Advanced);
        assert_eq!(
            criteria_filter(&c),
            Some(FilterExpr::contains(Field::Difficulty, "advanced"))
        );

        let c = FilterCriteria::new().with_query("暗号");
        assert_eq!(
            criteria_filter(&c),
            Some(FilterExpr::contains(Field::SearchTitle, "暗号"))
        );
    }

    #[test]
    fn test_combined_criteria_and_together() {
        let c = FilterCriteria::new()
            .with_query("暗号")
            .with_difficulty(Difficulty::Advanced)
            .with_category("security");
        let filter = criteria_filter(&c).unwrap();
        assert_eq!(filter.clause_count(), 3);
        assert_eq!(
            filter.to_wire(),
            "category[equals]security[and]difficulty[contains]advanced[and]searchTitle[contains]暗号"
        );
    }

    #[test]
    fn test_operator_syntax_never_adds_wire_clauses() {
        let mut c = FilterCriteria::new().with_category("security");
        c.query = Some("x[and]category[equals]network".to_string());

        let filter = criteria_filter(&c).unwrap();
        assert_eq!(filter.to_wire().split("[and]").count(), filter.clause_count());
        assert_eq!(filter, FilterExpr::equals(Field::Category, "security"));

        c.category = Some("security[or]category[equals]network".to_string());
        assert_eq!(criteria_filter(&c), None);
    }

    #[test]
    fn test_wire_clauses_match_typed_clauses() {
        let c = FilterCriteria::new()
            .with_category("security")
            .with_difficulty(Difficulty::Advanced)
            .with_query("a [b c] & d");
        let filter = criteria_filter(&c).unwrap();
        assert_eq!(filter.clause_count(), 3);
        assert_eq!(filter.to_wire().split("[and]").count(), 3);
    }

    #[test]
    fn test_builder_is_deterministic_and_pure() {
        let c = FilterCriteria::new()
            .with_category("network")
            .with_query("dns")
            .with_page(2);
        let before = c.clone();
        let a = build_listing_query(&c);
        let b = build_listing_query(&c);
        assert_eq!(a, b);
        assert_eq!(c, before);
    }

    #[test]
    fn test_detail_query() {
        let q = build_detail_query("firewall");
        assert_eq!(q.limit, 1);
        assert_eq!(q.filter.unwrap().to_wire(), "slug[equals]firewall");
    }

    #[test]
    fn test_sort_order_wire() {
        assert_eq!(SortOrder::DisplayOrder.wire(), "order");
        assert_eq!(SortOrder::NewestFirst.wire(), "-publishedAt");
    }
}
