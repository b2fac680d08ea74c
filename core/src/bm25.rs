//! Okapi BM25 over a field's postings.
//!
//! The length term is the token's total occurrence count in the field
//! (`PostingStore::field_length`), not the length of the scored document.
//! That keeps scores identical to the indexes this engine was tuned on.

use crate::config::Bm25Params;
use crate::store::IndexSnapshot;
use crate::{Field, Result};

/// Corpus statistics for one (token, document, field) triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermStats {
    pub tf: f64,
    pub df: f64,
    pub field_length: f64,
    pub avg_doc_len: f64,
    pub corpus_size: f64,
}

#[inline]
pub fn idf(df: f64, corpus_size: f64) -> f64 {
    ((corpus_size - df + 0.5) / (df + 0.5) + 1.0).ln()
}

#[inline]
pub fn bm25(stats: TermStats, params: Bm25Params) -> f64 {
    let Bm25Params { k1, b } = params;
    // an index whose counts are all zero has no meaningful average
    let ratio = if stats.avg_doc_len > 0.0 { stats.field_length / stats.avg_doc_len } else { 0.0 };
    let denom = k1 * (1.0 - b + b * ratio) + stats.tf;
    if denom == 0.0 {
        return 0.0;
    }
    idf(stats.df, stats.corpus_size) * ((k1 + 1.0) * stats.tf) / denom
}

#[derive(Debug, Clone, Copy)]
pub struct Bm25Scorer<'s> {
    snapshot: &'s IndexSnapshot,
    params: Bm25Params,
}

impl<'s> Bm25Scorer<'s> {
    pub fn new(snapshot: &'s IndexSnapshot, params: Bm25Params) -> Self { Self { snapshot, params } }

    /// Score of one token for one document. Tokens unknown to the field score 0.
    pub fn score(&self, token: &str, doc_id: &str, field: Field) -> Result<f64> {
        let store = self.snapshot.store(field)?;
        let postings = store.postings(token);
        if postings.is_empty() {
            return Ok(0.0);
        }
        let tf = postings.get(doc_id).map_or(0, |p| p.count);
        let stats = TermStats {
            tf: f64::from(tf),
            df: postings.len() as f64,
            field_length: store.field_length(token) as f64,
            avg_doc_len: store.average_document_length(),
            corpus_size: self.snapshot.corpus_size() as f64,
        };
        Ok(bm25(stats, self.params))
    }

    /// Sum over the query tokens that have a posting for `doc_id` in `field`.
    pub fn document_score<S: AsRef<str>>(&self, tokens: &[S], doc_id: &str, field: Field) -> Result<f64> {
        let store = self.snapshot.store(field)?;
        let mut total = 0.0;
        for token in tokens {
            let token = token.as_ref();
            if store.posting(token, doc_id).is_some() {
                total += self.score(token, doc_id, field)?;
            }
        }
        Ok(total)
    }
}
