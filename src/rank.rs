//! Vector-space ranking of candidate documents against a query.
//!
//! Documents and the query are embedded as frequency vectors over a shared
//! vocabulary built from the candidate set plus the query, then scored by
//! cosine similarity. A zero-magnitude vector scores 0.0, never a fault.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Term weighting applied to both document and query vectors.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum RankingMode {
    /// Raw term counts.
    #[default]
    TermFrequency,
    /// Term counts weighted by smoothed inverse document frequency,
    /// `ln((1 + N) / (1 + df)) + 1` over the candidate set.
    TfIdf,
}

/// A candidate document entering the ranker, in retrieval order.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub id: String,
    /// Space-joined normalized tokens.
    pub text: String,
}

/// A ranked search hit.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredResult {
    pub id: String,
    pub score: f32,
}

/// Score `candidates` against the normalized query and return the top `k`.
///
/// The sort is stable and descending, so ties keep their retrieval order.
/// Returns exactly `min(k, candidates.len())` results; zero-overlap
/// candidates survive with a score of 0.0.
pub fn rank(
    candidates: &[Candidate],
    query_tokens: &[String],
    mode: RankingMode,
    top_k: usize,
) -> Vec<ScoredResult> {
    let doc_tokens: Vec<Vec<&str>> = candidates
        .iter()
        .map(|c| c.text.split_whitespace().collect())
        .collect();

    // Shared vocabulary over candidates + query.
    let mut vocab: HashMap<&str, usize> = HashMap::new();
    for tokens in doc_tokens.iter() {
        for &token in tokens {
            let next = vocab.len();
            vocab.entry(token).or_insert(next);
        }
    }
    for token in query_tokens {
        let next = vocab.len();
        vocab.entry(token.as_str()).or_insert(next);
    }

    let weights = term_weights(&vocab, &doc_tokens, mode);
    let query_refs: Vec<&str> = query_tokens.iter().map(String::as_str).collect();
    let query_vec = vectorize(&vocab, &query_refs, &weights);

    let mut results: Vec<ScoredResult> = candidates
        .iter()
        .zip(doc_tokens.iter())
        .map(|(candidate, tokens)| ScoredResult {
            id: candidate.id.clone(),
            score: cosine(&query_vec, &vectorize(&vocab, tokens, &weights)),
        })
        .collect();

    // Stable sort: equal scores preserve retrieval order.
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    results.truncate(top_k);
    results
}

fn term_weights(
    vocab: &HashMap<&str, usize>,
    doc_tokens: &[Vec<&str>],
    mode: RankingMode,
) -> Vec<f32> {
    match mode {
        RankingMode::TermFrequency => vec![1.0; vocab.len()],
        RankingMode::TfIdf => {
            let n = doc_tokens.len() as f32;
            let mut df = vec![0u32; vocab.len()];
            for tokens in doc_tokens {
                let mut seen = vec![false; vocab.len()];
                for &token in tokens {
                    let slot = vocab[token];
                    if !seen[slot] {
                        seen[slot] = true;
                        df[slot] += 1;
                    }
                }
            }
            df.iter()
                .map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
                .collect()
        }
    }
}

fn vectorize(vocab: &HashMap<&str, usize>, tokens: &[&str], weights: &[f32]) -> Vec<f32> {
    let mut vec = vec![0.0f32; vocab.len()];
    for &token in tokens {
        vec[vocab[token]] += 1.0;
    }
    for (slot, value) in vec.iter_mut().enumerate() {
        *value *= weights[slot];
    }
    vec
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let mag_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    dot / (mag_a * mag_b)
}
