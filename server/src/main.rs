use anyhow::{Context, Result};
use clap::Parser;
use docrank_core::persist::{load_config, load_engine, load_stopwords, IndexPaths};
use docrank_core::{RankingConfig, Stopwords};
use docrank_server::build_app;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Document catalog (JSON array of id, title, url)
    #[arg(long, default_value = "./documents.json")]
    documents: PathBuf,
    /// Title token index
    #[arg(long, default_value = "./title_pos_index.json")]
    index_title: PathBuf,
    /// Content token index
    #[arg(long)]
    index_content: Option<PathBuf>,
    /// Stopword list, one word per line
    #[arg(long)]
    stopwords: Option<PathBuf>,
    /// JSON ranking configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

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
    let app = build_app(Arc::new(engine));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
