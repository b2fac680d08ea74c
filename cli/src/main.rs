use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use docrank_core::persist::{load_config, load_engine, load_stopwords, write_results, IndexPaths};
use docrank_core::{Field, MatchPolicy, RankingConfig, RankingEngine, Stopwords};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "docrank")]
#[command(about = "Rank documents against title and content inverted indexes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct IndexArgs {
    /// JSON file with the document catalog (id, title, url)
    documents: PathBuf,
    /// JSON file with the token index for titles
    index_title: PathBuf,
    /// JSON file with the token index for content
    #[arg(long)]
    index_content: Option<PathBuf>,
    /// Stopword list, one word per line (defaults to the bundled French list)
    #[arg(long)]
    stopwords: Option<PathBuf>,
    /// JSON ranking configuration
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank documents for a query and write the title -> url mapping
    Search {
        /// The query you are looking for
        query: String,
        #[command(flatten)]
        index: IndexArgs,
        /// "and" keeps documents with every query token, "or" with at least one
        #[arg(long)]
        type_of_search: Option<String>,
        /// Where to write the results
        #[arg(long, default_value = "results.json")]
        output: PathBuf,
    },
    /// Print every candidate's sub-scores as JSON
    Explain {
        query: String,
        #[command(flatten)]
        index: IndexArgs,
        #[arg(long)]
        type_of_search: Option<String>,
    },
    /// Print per-field index statistics
    Stats {
        #[command(flatten)]
        index: IndexArgs,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { query, index, type_of_search, output } => {
            let engine = open_engine(&index)?;
            let policy = policy_or_default(&engine, type_of_search.as_deref())?;
            let start = Instant::now();
            let results = engine.search(&query, policy);
            let took = start.elapsed();
            write_results(&output, &results).with_context(|| format!("writing {}", output.display()))?;
            tracing::info!(%policy, hits = results.len(), took_s = took.as_secs_f64(), "search complete");
            if results.is_empty() {
                println!("No results.");
            } else {
                println!("The results are in {}", output.display());
            }
            println!("Time taken to search: {}", took.as_secs_f64());
            Ok(())
        }
        Commands::Explain { query, index, type_of_search } => {
            let engine = open_engine(&index)?;
            let policy = policy_or_default(&engine, type_of_search.as_deref())?;
            let ranked = engine.rank(&query, policy);
            println!("{}", serde_json::to_string_pretty(&ranked)?);
            Ok(())
        }
        Commands::Stats { index } => {
            let engine = open_engine(&index)?;
            print_stats(&engine);
            Ok(())
        }
    }
}

fn open_engine(args: &IndexArgs) -> Result<RankingEngine> {
    let config = match &args.config {
        Some(p) => load_config(p)?,
        None => RankingConfig::default(),
    };
    let stopwords = match &args.stopwords {
        Some(p) => load_stopwords(p)?,
        None => Stopwords::french(),
    };
    let paths = IndexPaths::new(&args.documents, &args.index_title).with_content(args.index_content.as_ref());
    let engine = load_engine(&paths, stopwords, config).context("failed to load indexes")?;
    Ok(engine)
}

fn policy_or_default(engine: &RankingEngine, raw: Option<&str>) -> Result<MatchPolicy> {
    match raw {
        Some(s) => Ok(s.parse()?),
        None => Ok(engine.config().default_policy),
    }
}

fn print_stats(engine: &RankingEngine) {
    let snapshot = engine.snapshot();
    println!("documents: {}", snapshot.corpus_size());
    println!("stopwords: {}", engine.stopwords().len());
    for field in Field::ALL {
        match snapshot.field(field) {
            Some(store) => println!(
                "{field}: tokens={} postings={} avg_doc_len={:.4}",
                store.vocabulary_size(),
                store.posting_count(),
                store.average_document_length()
            ),
            None => println!("{field}: not loaded"),
        }
    }
}
