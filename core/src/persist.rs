use crate::config::RankingConfig;
use crate::engine::{RankedResults, RankingEngine};
use crate::store::IndexSnapshot;
use crate::tokenizer::Stopwords;
use crate::{Document, Error, Field, FieldIndex, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Locations of the files a snapshot is loaded from.
#[derive(Debug, Clone)]
pub struct IndexPaths {
    pub documents: PathBuf,
    pub title: PathBuf,
    pub content: Option<PathBuf>,
}

impl IndexPaths {
    pub fn new(documents: impl AsRef<Path>, title: impl AsRef<Path>) -> Self {
        Self { documents: documents.as_ref().to_path_buf(), title: title.as_ref().to_path_buf(), content: None }
    }

    pub fn with_content<P: AsRef<Path>>(mut self, content: Option<P>) -> Self {
        self.content = content.map(|p| p.as_ref().to_path_buf());
        self
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Io { path: path.to_path_buf(), source }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let f = File::open(path).map_err(io_err(path))?;
    serde_json::from_reader(BufReader::new(f)).map_err(|source| Error::Json { path: path.to_path_buf(), source })
}

pub fn load_catalog(path: &Path) -> Result<Vec<Document>> { load_json(path) }

pub fn load_field_index(path: &Path) -> Result<FieldIndex> { load_json(path) }

pub fn load_config(path: &Path) -> Result<RankingConfig> {
    let config: RankingConfig = load_json(path)?;
    config.validate()?;
    Ok(config)
}

pub fn load_stopwords(path: &Path) -> Result<Stopwords> {
    let text = fs::read_to_string(path).map_err(io_err(path))?;
    Ok(Stopwords::parse(&text))
}

pub fn load_snapshot(paths: &IndexPaths) -> Result<IndexSnapshot> {
    let catalog = load_catalog(&paths.documents)?;
    let title = load_field_index(&paths.title)?;
    let content = paths.content.as_deref().map(load_field_index).transpose()?;
    let snapshot = IndexSnapshot::new(catalog, title, content)?;
    for field in Field::ALL {
        if let Some(store) = snapshot.field(field) {
            tracing::info!(
                %field,
                tokens = store.vocabulary_size(),
                postings = store.posting_count(),
                avg_doc_len = store.average_document_length(),
                "loaded field index"
            );
        }
    }
    tracing::info!(documents = snapshot.corpus_size(), "loaded document catalog");
    Ok(snapshot)
}

/// Load every configured file and build the engine. Any failure here is fatal.
pub fn load_engine(paths: &IndexPaths, stopwords: Stopwords, config: RankingConfig) -> Result<RankingEngine> {
    RankingEngine::new(load_snapshot(paths)?, stopwords, config)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(io_err(dir))?;
    }
    let f = File::create(path).map_err(io_err(path))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer(&mut w, value).map_err(|source| Error::Json { path: path.to_path_buf(), source })?;
    w.flush().map_err(io_err(path))?;
    Ok(())
}

/// Write the title -> url artifact; no results produce `{}`.
pub fn write_results(path: &Path, results: &RankedResults) -> Result<()> {
    write_json(path, results)
}
