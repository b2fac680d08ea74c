//! Boolean retrieval and blended ranking over precomputed title and content
//! inverted indexes.
//!
//! A query is lowercased and split on whitespace, resolved to candidate sets per
//! field with an AND/OR policy, then every candidate is scored with a positional
//! order heuristic and BM25 per field. The per-field scores are blended into one
//! final score and candidates are ordered by it, ties falling back to catalog
//! order.

pub mod bm25;
pub mod config;
pub mod engine;
mod error;
mod index;
pub mod persist;
pub mod positional;
pub mod resolve;
pub mod store;
pub mod tokenizer;

pub use config::RankingConfig;
pub use engine::{Candidates, RankedResults, RankingEngine, ScoreRecord};
pub use error::{Error, Result};
pub use index::{DocId, Document, Field, FieldIndex, Posting};
pub use resolve::MatchPolicy;
pub use store::{IndexSnapshot, PostingStore};
pub use tokenizer::Stopwords;
