use clap::Parser;
use tracing_subscriber::EnvFilter;

use rowsearch::{
    cli::{Cli, Command, IndexArgs, SearchArgs},
    config::SearchConfig,
    data_dir::DataDir,
    dataset,
    error::{self, Error},
    index::SearchIndex,
    search::{self, SearchParams},
};

fn init_tracing(verbose: u8) {
    let filter = if let Ok(env) = std::env::var("ROWSEARCH_LOG") {
        EnvFilter::new(env)
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> error::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let data_dir = DataDir::resolve(cli.data_dir.as_deref())?;
    let config = SearchConfig::load_or_default(&data_dir.config_file())?;

    match cli.command {
        Command::Index(args) => cmd_index(&data_dir, &config, &args),
        Command::Search(args) => cmd_search(&data_dir, &config, &args),
        Command::Status(args) => cmd_status(&data_dir, args.json),
        Command::Completions(args) => {
            args.generate();
            Ok(())
        }
    }
}

fn cmd_index(
    data_dir: &DataDir,
    config: &SearchConfig,
    args: &IndexArgs,
) -> error::Result<()> {
    if !args.dataset_dir.exists() {
        return Err(Error::Config(format!(
            "dataset directory does not exist: {}",
            args.dataset_dir.display()
        )));
    }
    if !args.dataset_dir.is_dir() {
        return Err(Error::Config(format!(
            "dataset path is not a directory: {}",
            args.dataset_dir.display()
        )));
    }

    let loaded = dataset::load_dataset(&args.dataset_dir)?;

    let mut index_config = config.index_config();
    if let Some(language) = args.language {
        index_config.language = language;
    }
    index_config.whitelist.extend(args.whitelist.iter().cloned());

    let (index, report) = SearchIndex::build(&loaded.tables, index_config);
    index.save(&data_dir.index_file())?;

    println!(
        "Indexed {} document(s) from {} source(s), {} row(s) skipped",
        report.documents_indexed,
        loaded.tables.len(),
        report.rows_skipped
    );
    let warnings = loaded.warnings.len() + report.warnings.len();
    if warnings > 0 {
        println!("{warnings} warning(s), see log output");
    }
    println!("Index written to {}", data_dir.index_file().display());
    Ok(())
}

fn cmd_search(
    data_dir: &DataDir,
    config: &SearchConfig,
    args: &SearchArgs,
) -> error::Result<()> {
    let index = SearchIndex::load(&data_dir.index_file())?;

    let params = SearchParams {
        query: args.query.clone(),
        count: args.count.unwrap_or(config.top_k),
        mode: args.ranking_mode.unwrap_or(config.ranking_mode),
    };
    let results = search::execute_search(&params, &index)?;

    if args.json {
        search::format_json(&results, &args.query)?;
    } else {
        search::format_human(&results);
    }
    Ok(())
}

fn cmd_status(data_dir: &DataDir, json: bool) -> error::Result<()> {
    let index_file = data_dir.index_file();
    match SearchIndex::load(&index_file) {
        Ok(index) => {
            if json {
                let payload = serde_json::json!({
                    "index_file": index_file.display().to_string(),
                    "documents": index.len(),
                    "terms": index.term_count(),
                    "language": index.config().language,
                });
                println!("{}", serde_json::to_string(&payload)?);
            } else {
                println!("Index file: {}", index_file.display());
                println!("Documents:  {}", index.len());
                println!("Terms:      {}", index.term_count());
            }
            Ok(())
        }
        Err(e) if e.is_index_absent() => {
            if json {
                let payload = serde_json::json!({
                    "index_file": index_file.display().to_string(),
                    "documents": 0,
                    "absent": true,
                });
                println!("{}", serde_json::to_string(&payload)?);
            } else {
                println!("No index built yet ({})", index_file.display());
            }
            Ok(())
        }
        Err(e) => Err(e),
    }
}
