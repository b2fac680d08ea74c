#![allow(dead_code)]

use docrank_core::persist::{load_engine, IndexPaths};
use docrank_core::{RankingConfig, RankingEngine, Stopwords};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub fn write(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let p = dir.join(name);
    fs::write(&p, serde_json::to_vec(value).unwrap()).unwrap();
    p
}

pub fn two_doc_catalog() -> Value {
    json!([
        {"id": "1", "title": "Alpha Report", "url": "u1"},
        {"id": "2", "title": "Beta Notes", "url": "u2"}
    ])
}

pub fn two_doc_title_index() -> Value {
    json!({
        "alpha": {"1": {"count": 1, "positions": [0]}},
        "beta": {"2": {"count": 1, "positions": [0]}}
    })
}

/// Writes the given files into `dir` and loads an engine over them.
pub fn engine_from(dir: &Path, catalog: &Value, title: &Value, content: Option<&Value>) -> RankingEngine {
    let documents = write(dir, "documents.json", catalog);
    let title = write(dir, "title_pos_index.json", title);
    let content = content.map(|c| write(dir, "content_pos_index.json", c));
    let paths = IndexPaths::new(documents, title).with_content(content);
    load_engine(&paths, Stopwords::french(), RankingConfig::default()).unwrap()
}
