//! Refining an already-loaded batch from the command line.
//!
//! `gls refine --input batch.json` reads a batch of terms (either a bare JSON
//! array or a CMS list envelope with `contents`) and narrows it in memory,
//! exactly as a presentation layer does while the user edits filter
//! controls. No content store is contacted, so terms outside the batch are
//! never found.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use glossary_core::criteria::FilterCriteria;
use glossary_core::models::Term;
use glossary_core::refine::Refiner;

#[derive(Deserialize)]
#[serde(untagged)]
enum Batch {
    Envelope { contents: Vec<Term> },
    Terms(Vec<Term>),
}

/// Parses a candidate batch from JSON.
pub fn parse_batch(json: &str) -> Result<Vec<Term>> {
    let batch: Batch = serde_json::from_str(json).with_context(|| "Failed to parse term batch")?;
    Ok(match batch {
        Batch::Envelope { contents } => contents,
        Batch::Terms(terms) => terms,
    })
}

pub fn load_batch(path: &Path) -> Result<Vec<Term>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read batch file: {}", path.display()))?;
    parse_batch(&content)
}

/// CLI entry point for `gls refine`.
pub fn run_refine(input: &Path, criteria: &FilterCriteria) -> Result<()> {
    let refiner = Refiner::new(load_batch(input)?);
    let refined = refiner.apply(criteria);

    log::debug!(
        "refined {} candidates down to {}",
        refiner.candidates().len(),
        refined.len()
    );

    if refined.is_empty() {
        println!("No terms found in the loaded batch.");
        return Ok(());
    }

    println!(
        "{} of {} loaded terms match",
        refined.len(),
        refiner.candidates().len()
    );
    for term in &refined {
        println!("  {} ({})", term.title, term.slug);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TERM: &str = r#"{
        "id": "t1", "title": "AES", "slug": "aes",
        "category": {"id": "security", "name": "Security", "slug": "security"},
        "difficulty": ["advanced"],
        "searchTitle": "AES/暗号",
        "publishedAt": "2024-01-01T00:00:00Z"
    }"#;

    #[test]
    fn test_parse_bare_array() {
        let terms = parse_batch(&format!("[{}]", TERM)).unwrap();
        assert_eq!(terms.len(), 1);
    }

    #[test]
    fn test_parse_envelope() {
        let json = format!(r#"{{"contents": [{}], "totalCount": 1}}"#, TERM);
        let terms = parse_batch(&json).unwrap();
        assert_eq!(terms[0].slug, "aes");
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(parse_batch("{\"nope\": true}").is_err());
    }

    #[test]
    fn test_run_refine_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("batch.json");
        std::fs::write(&path, format!("[{}]", TERM)).unwrap();
        run_refine(&path, &FilterCriteria::new().with_query("暗号")).unwrap();
        assert!(run_refine(&dir.path().join("missing.json"), &FilterCriteria::new()).is_err());
    }
}
