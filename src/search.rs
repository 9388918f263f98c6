//! The search pipeline: normalize the query, retrieve candidates from the
//! index, fall back to a substring scan when retrieval comes up empty, and
//! rank whatever survives.

use crate::{
    error::{Error, Result},
    fallback::fallback_scan,
    index::SearchIndex,
    rank::{self, Candidate, RankingMode, ScoredResult},
};

/// Default number of results returned by a search.
pub const DEFAULT_TOP_K: usize = 5;

/// Parameters for one search call.
#[derive(Debug, Clone)]
pub struct SearchParams {
    pub query: String,
    /// Maximum number of results.
    pub count: usize,
    pub mode: RankingMode,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            count: DEFAULT_TOP_K,
            mode: RankingMode::default(),
        }
    }
}

/// Execute the full search pipeline.
///
/// 1. Fail fast when no usable index exists
/// 2. Normalize the query with the index's own normalizer settings
/// 3. Conjunctive term retrieval over the inverted index
/// 4. Substring fallback over raw text when retrieval finds nothing
/// 5. Cosine ranking, top `count`
///
/// An empty result is a normal outcome, not an error.
pub fn execute_search(params: &SearchParams, index: &SearchIndex) -> Result<Vec<ScoredResult>> {
    if index.is_empty() {
        return Err(Error::IndexAbsent(
            "index contains no documents".to_string(),
        ));
    }

    let normalizer = index.config().normalizer();
    let query_tokens = normalizer.normalize(&params.query);

    let candidate_ids = index.query_terms(&query_tokens);
    let candidates: Vec<Candidate> = if candidate_ids.is_empty() {
        // Tokenized retrieval failed; rescan raw text with the ORIGINAL
        // query terms, since normalization may be exactly what lost the
        // word boundaries.
        let hits = fallback_scan(index.docs(), &params.query);
        if !hits.is_empty() {
            tracing::debug!(hits = hits.len(), "substring fallback engaged");
        }
        hits.into_iter()
            .map(|doc| Candidate {
                id: doc.id.clone(),
                text: doc.text.clone(),
            })
            .collect()
    } else {
        candidate_ids
            .into_iter()
            .filter_map(|internal| index.doc(internal))
            .map(|doc| Candidate {
                id: doc.id.clone(),
                text: doc.text.clone(),
            })
            .collect()
    };

    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    Ok(rank::rank(&candidates, &query_tokens, params.mode, params.count))
}

/// Format results for human-readable terminal output.
pub fn format_human(results: &[ScoredResult]) {
    if results.is_empty() {
        println!("No results found.");
        return;
    }

    for (i, r) in results.iter().enumerate() {
        println!("{:>3}. [{:.4}] {}", i + 1, r.score, r.id);
    }
    println!("\n{} result(s)", results.len());
}

/// Format results as a JSON object on stdout.
pub fn format_json(results: &[ScoredResult], query: &str) -> Result<()> {
    let payload = serde_json::json!({
        "query": query,
        "result_count": results.len(),
        "results": results,
    });
    println!("{}", serde_json::to_string(&payload)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        index::IndexConfig,
        normalize::Language,
        table::{FieldValue, SourceTable},
    };

    fn news_table(rows: &[&str]) -> SourceTable {
        SourceTable {
            path: "berita.csv".to_string(),
            columns: vec!["judul".to_string()],
            rows: rows
                .iter()
                .map(|text| vec![FieldValue::parse(text)])
                .collect(),
        }
    }

    fn build(rows: &[&str]) -> SearchIndex {
        let (index, _) = SearchIndex::build(&[news_table(rows)], IndexConfig::default());
        index
    }

    #[test]
    fn relevant_document_ranks_above_unrelated() {
        let index = build(&[
            "Harga BBM naik menjelang akhir tahun",
            "Pesawat United mendarat darurat",
        ]);
        let results =
            execute_search(&SearchParams::new("pesawat darurat"), &index).unwrap();

        assert_eq!(results[0].id, "berita.csv_row_1");
        if let Some(second) = results.get(1) {
            assert!(results[0].score > second.score);
        }
    }

    #[test]
    fn retrieval_is_conjunctive_across_terms() {
        let index = build(&["Pesawat baru tiba", "Pesawat United mendarat darurat"]);
        let results =
            execute_search(&SearchParams::new("pesawat darurat"), &index).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "berita.csv_row_1");
    }

    #[test]
    fn lost_boundary_recovered_by_fallback() {
        // "pesawatunited" survives normalization as one opaque token, so
        // tokenized retrieval for "pesawat" finds nothing; the substring
        // scan over raw text does.
        let index = build(&["pesawatunited mendarat", "Harga BBM naik"]);
        let results = execute_search(&SearchParams::new("pesawat"), &index).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "berita.csv_row_0");
    }

    #[test]
    fn fallback_requires_all_terms() {
        let index = build(&["pesawatunited mendarat"]);
        let results =
            execute_search(&SearchParams::new("pesawat darurat"), &index).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn empty_index_is_absent_not_empty_result() {
        let (index, _) = SearchIndex::build(&[], IndexConfig::default());
        let err = execute_search(&SearchParams::new("pesawat"), &index).unwrap_err();
        assert!(err.is_index_absent());
    }

    #[test]
    fn no_match_is_an_empty_result_not_an_error() {
        let index = build(&["Harga BBM naik"]);
        let results = execute_search(&SearchParams::new("zeppelin"), &index).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn count_limits_results() {
        let index = build(&[
            "Pesawat satu mendarat",
            "Pesawat dua mendarat",
            "Pesawat tiga mendarat",
        ]);
        let mut params = SearchParams::new("pesawat");
        params.count = 2;

        let results = execute_search(&params, &index).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn scores_are_descending() {
        let index = build(&[
            "Pesawat",
            "Pesawat mendarat",
            "Pesawat mendarat darurat",
        ]);
        let results = execute_search(&SearchParams::new("pesawat"), &index).unwrap();

        assert_eq!(results.len(), 3);
        for window in results.windows(2) {
            assert!(window[0].score >= window[1].score);
        }
    }

    #[test]
    fn query_normalization_follows_index_config() {
        // "akan" is an Indonesian stopword; the whitelist stored with the
        // index must keep it alive at query time too.
        let config = IndexConfig {
            language: Language::Indonesian,
            whitelist: vec!["akan".to_string()],
        };
        let (index, _) =
            SearchIndex::build(&[news_table(&["Harga akan naik", "Harga turun"])], config);

        let results = execute_search(&SearchParams::new("akan"), &index).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "berita.csv_row_0");
    }

    #[test]
    fn tfidf_mode_runs_end_to_end() {
        let index = build(&[
            "Pesawat United mendarat darurat",
            "Pesawat berangkat pagi",
        ]);
        let mut params = SearchParams::new("pesawat darurat");
        params.mode = RankingMode::TfIdf;

        let results = execute_search(&params, &index).unwrap();
        assert_eq!(results[0].id, "berita.csv_row_0");
    }
}
