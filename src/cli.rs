use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::{normalize::Language, rank::RankingMode};

#[derive(Debug, Parser)]
#[command(
    name = "rowsearch",
    about = "Relevance-ranked text search for tabular datasets"
)]
pub struct Cli {
    /// Override the XDG data directory
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the search index from a dataset of CSV files (full rebuild)
    Index(IndexArgs),
    /// Search the index
    Search(SearchArgs),
    /// Show index status and statistics
    Status(StatusArgs),
    /// Generate shell completions
    #[command(hide = true)]
    Completions(CompletionsArgs),
}

// -- Index --

#[derive(Debug, Parser)]
pub struct IndexArgs {
    /// Directory containing the CSV dataset
    pub dataset_dir: PathBuf,

    /// Stopword language (defaults to the configured one)
    #[arg(long, value_enum)]
    pub language: Option<Language>,

    /// Term that must never be treated as a stopword (repeatable)
    #[arg(long = "whitelist", value_name = "TERM")]
    pub whitelist: Vec<String>,
}

// -- Search --

#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// The search query
    pub query: String,

    /// Number of results to return (defaults to the configured top-k)
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Term weighting mode (defaults to the configured one)
    #[arg(long, value_enum)]
    pub ranking_mode: Option<RankingMode>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Status --

#[derive(Debug, Parser)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Completions --

#[derive(Debug, Parser)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsArgs {
    /// Generate shell completions and print to stdout.
    pub fn generate(&self) {
        let mut cmd = Cli::command();
        clap_complete::generate(
            self.shell,
            &mut cmd,
            "rowsearch",
            &mut std::io::stdout(),
        );
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn parse_search_defaults() {
        let cli = Cli::parse_from(["rowsearch", "search", "pesawat darurat"]);
        match cli.command {
            Command::Search(args) => {
                assert_eq!(args.query, "pesawat darurat");
                assert!(args.count.is_none());
                assert!(args.ranking_mode.is_none());
                assert!(!args.json);
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn parse_index_with_whitelist() {
        let cli = Cli::parse_from([
            "rowsearch",
            "index",
            "dataset",
            "--language",
            "indonesian",
            "--whitelist",
            "hukum",
            "--whitelist",
            "ekonomi",
        ]);
        match cli.command {
            Command::Index(args) => {
                assert_eq!(args.dataset_dir, PathBuf::from("dataset"));
                assert_eq!(args.language, Some(Language::Indonesian));
                assert_eq!(args.whitelist, vec!["hukum", "ekonomi"]);
            }
            _ => panic!("expected index command"),
        }
    }

    #[test]
    fn parse_search_overrides() {
        let cli = Cli::parse_from([
            "rowsearch",
            "search",
            "banjir",
            "-n",
            "3",
            "--ranking-mode",
            "tf-idf",
            "--json",
        ]);
        match cli.command {
            Command::Search(args) => {
                assert_eq!(args.count, Some(3));
                assert_eq!(args.ranking_mode, Some(RankingMode::TfIdf));
                assert!(args.json);
            }
            _ => panic!("expected search command"),
        }
    }
}
