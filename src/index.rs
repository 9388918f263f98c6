//! The inverted index and its document store.
//!
//! A build always produces a whole new [`SearchIndex`] value; swapping it in
//! for the previous one is the caller's one-line job. Nothing here mutates
//! an existing index in place.

use std::{
    collections::{HashMap, HashSet},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    normalize::{Language, Normalizer},
    table::SourceTable,
};

/// The normalizer settings an index was built with.
///
/// Persisted inside the index artifact so query-time normalization always
/// matches build-time normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexConfig {
    pub language: Language,
    pub whitelist: Vec<String>,
}

impl IndexConfig {
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.language, self.whitelist.iter().cloned())
    }
}

/// One indexed record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDoc {
    /// `"{source_path}_row_{row_index}"`; stable while the source file and
    /// its row order are stable.
    pub id: String,
    pub source_path: String,
    /// Space-joined normalized tokens, the form used for vectorization.
    pub text: String,
    /// The original field value, retained for the substring fallback.
    pub raw: String,
}

/// Outcome of a build: counts plus non-fatal per-source warnings.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub documents_indexed: usize,
    pub rows_skipped: usize,
    pub warnings: Vec<String>,
}

/// Inverted index over the text column of every source table.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchIndex {
    config: IndexConfig,
    docs: Vec<StoredDoc>,
    /// term -> internal doc ids, ascending. Ids index into `docs`.
    postings: HashMap<String, Vec<u32>>,
}

impl SearchIndex {
    /// Build a fresh index over `tables`.
    ///
    /// Sources without a detectable text column are skipped with a warning;
    /// rows whose normalization yields no tokens are skipped and counted.
    /// Neither aborts the build.
    pub fn build(tables: &[SourceTable], config: IndexConfig) -> (Self, BuildReport) {
        let normalizer = config.normalizer();
        let mut index = Self {
            config,
            docs: Vec::new(),
            postings: HashMap::new(),
        };
        let mut report = BuildReport::default();

        for table in tables {
            let Some(col) = table.select_text_column() else {
                tracing::warn!(source = %table.path, "no text column found, skipping source");
                report
                    .warnings
                    .push(format!("no text column found in {}", table.path));
                continue;
            };

            let before = index.docs.len();
            for (row_index, row) in table.rows.iter().enumerate() {
                let raw = row.get(col).map(|v| v.as_text()).unwrap_or_default();
                let tokens = normalizer.normalize(&raw);
                if tokens.is_empty() {
                    report.rows_skipped += 1;
                    continue;
                }
                index.add_document(&table.path, row_index, raw, &tokens);
            }

            tracing::info!(
                source = %table.path,
                column = %table.columns[col],
                rows = table.rows.len(),
                indexed = index.docs.len() - before,
                "indexed source"
            );
        }

        report.documents_indexed = index.docs.len();
        (index, report)
    }

    fn add_document(&mut self, source_path: &str, row_index: usize, raw: String, tokens: &[String]) {
        let internal = self.docs.len() as u32;
        self.docs.push(StoredDoc {
            id: format!("{source_path}_row_{row_index}"),
            source_path: source_path.to_string(),
            text: tokens.join(" "),
            raw,
        });

        // One posting per distinct term; ids stay ascending because each
        // document is added exactly once.
        let unique: HashSet<&String> = tokens.iter().collect();
        for term in unique {
            self.postings.entry(term.clone()).or_default().push(internal);
        }
    }

    /// Boolean retrieval: documents containing ALL of `terms`.
    ///
    /// Returns internal ids in ascending (index-internal) order; relevance
    /// ordering is the ranker's job. An unknown term empties the result.
    pub fn query_terms(&self, terms: &[String]) -> Vec<u32> {
        let Some((first, rest)) = terms.split_first() else {
            return Vec::new();
        };
        let Some(base) = self.postings.get(first) else {
            return Vec::new();
        };

        let mut candidates: Vec<u32> = base.clone();
        for term in rest {
            let Some(postings) = self.postings.get(term) else {
                return Vec::new();
            };
            let set: HashSet<u32> = postings.iter().copied().collect();
            candidates.retain(|id| set.contains(id));
            if candidates.is_empty() {
                return Vec::new();
            }
        }
        candidates
    }

    pub fn doc(&self, internal: u32) -> Option<&StoredDoc> {
        self.docs.get(internal as usize)
    }

    pub fn docs(&self) -> &[StoredDoc] {
        &self.docs
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Persist as JSON, fully replacing any previous artifact.
    pub fn save(&self, path: &Path) -> Result<()> {
        let tmp = path.with_extension("json.tmp");
        let file = std::fs::File::create(&tmp)?;
        serde_json::to_writer(std::io::BufWriter::new(file), self)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Load a persisted index. A missing file is the index-absent
    /// condition, distinct from a built index with no matches.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::IndexAbsent(format!(
                "no index file at {} - run the index command first",
                path.display()
            )));
        }
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }
}
