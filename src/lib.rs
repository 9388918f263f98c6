//! rowsearch - relevance-ranked text search for tabular datasets.
//!
//! rowsearch ingests directories of CSV files, auto-detects the column most
//! likely to carry free text, normalizes it (case folding, punctuation
//! removal, word-boundary repair, stopword filtering), and builds an
//! inverted index. Queries are answered with cosine-ranked top-K results
//! over a shared term vocabulary, with a raw substring scan as a recall
//! fallback when tokenized retrieval finds nothing.
//!
//! # Quick start
//!
//! ```no_run
//! use rowsearch::{IndexConfig, SearchIndex, dataset};
//! use rowsearch::search::{self, SearchParams};
//!
//! let loaded = dataset::load_dataset(std::path::Path::new("dataset")).unwrap();
//! let (index, report) = SearchIndex::build(&loaded.tables, IndexConfig::default());
//! println!("indexed {} documents", report.documents_indexed);
//!
//! let results = search::execute_search(&SearchParams::new("pesawat darurat"), &index)
//!     .unwrap();
//! for r in &results {
//!     println!("{} (score: {:.3})", r.id, r.score);
//! }
//! ```

pub mod cli;
pub mod config;
pub mod data_dir;
pub mod dataset;
pub mod error;
pub mod fallback;
pub mod index;
pub mod normalize;
pub mod rank;
pub mod search;
pub mod table;

pub use config::SearchConfig;
pub use data_dir::DataDir;
pub use error::{Error, Result};
pub use index::{BuildReport, IndexConfig, SearchIndex, StoredDoc};
pub use normalize::{Language, Normalizer};
pub use rank::{RankingMode, ScoredResult};
pub use search::{DEFAULT_TOP_K, SearchParams, execute_search};
pub use table::{FieldValue, SourceTable};
