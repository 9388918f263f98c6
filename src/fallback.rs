//! Substring fallback for queries that tokenized retrieval cannot serve.
//!
//! The boundary-repair heuristic in [`crate::normalize`] only fixes
//! camel-case concatenations; an all-lowercase concatenation is indexed as
//! one opaque token and never matches its constituent words. This scan
//! trades precision for recall: it selects documents whose lowercased RAW
//! text contains every query term as a literal substring.

use crate::index::StoredDoc;

/// Scan stored raw text for literal containment of ALL of the original
/// (non-normalized) query's whitespace-split terms, case-insensitively.
///
/// Survivors come back in document-store order.
pub fn fallback_scan<'a>(docs: &'a [StoredDoc], raw_query: &str) -> Vec<&'a StoredDoc> {
    let terms: Vec<String> = raw_query
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();
    if terms.is_empty() {
        return Vec::new();
    }

    docs.iter()
        .filter(|doc| {
            let raw = doc.raw.to_lowercase();
            terms.iter().all(|term| raw.contains(term.as_str()))
        })
        .collect()
}
