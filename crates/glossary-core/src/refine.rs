//! Client refiner: in-memory re-filtering of an already-loaded batch.
//!
//! The refiner narrows a candidate batch without a round trip to the content
//! store, using the same [`FilterExpr`](crate::filter::FilterExpr) the query
//! builder sends over the wire. It only ever sees the loaded batch: a term
//! that exists in the store but not in the batch is never returned, even if
//! a fresh store query would find it.
//!
//! Every call filters the original candidates. Callers that keep state
//! should hold a [`Refiner`], which owns the original batch and cannot be
//! fed its own output.

use crate::criteria::FilterCriteria;
use crate::models::{Category, Term};
use crate::query::criteria_filter;

/// Returns the candidates satisfying every present criterion, in their
/// original relative order. The page number is ignored.
pub fn refine(candidates: &[Term], criteria: &FilterCriteria) -> Vec<Term> {
    match criteria_filter(criteria) {
        None => candidates.to_vec(),
        Some(expr) => candidates
            .iter()
            .filter(|term| expr.matches(term))
            .cloned()
            .collect(),
    }
}

/// Holds the original candidate batch for repeated refinement.
#[derive(Debug, Clone, Default)]
pub struct Refiner {
    candidates: Vec<Term>,
}

impl Refiner {
    pub fn new(candidates: Vec<Term>) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &[Term] {
        &self.candidates
    }

    /// Re-filters the original batch for the current criteria.
    pub fn apply(&self, criteria: &FilterCriteria) -> Vec<Term> {
        refine(&self.candidates, criteria)
    }
}

/// Looks up the selected category in the separately loaded category list.
pub fn selected_category<'a>(
    categories: &'a [Category],
    criteria: &FilterCriteria,
) -> Option<&'a Category> {
    let id = criteria.category.as_deref()?;
    categories.iter().find(|c| c.id == id)
}
