use crate::config::{PositionalParams, StopwordWeighting};
use crate::store::PostingStore;
use crate::tokenizer::Stopwords;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionalScore {
    /// 1 when the matched tokens can be read in query order, else 0.
    pub order_score: f64,
    pub count_component: f64,
    pub score: f64,
}

/// Greedy forward scan: each sequence must offer a position strictly after the
/// one picked for the previous sequence. Picking the smallest such position is
/// optimal, so this finds an increasing choice whenever one exists.
pub fn in_query_order<S: AsRef<[u32]>>(sequences: &[S]) -> bool {
    let mut min_pos: i64 = -1;
    for seq in sequences {
        match seq.as_ref().iter().map(|&p| i64::from(p)).filter(|&p| p > min_pos).min() {
            Some(p) => min_pos = p,
            None => return false,
        }
    }
    true
}

pub fn order_score<S: AsRef<[u32]>>(sequences: &[S]) -> f64 {
    if in_query_order(sequences) { 1.0 } else { 0.0 }
}

#[derive(Debug, Clone, Copy)]
pub struct PositionalScorer<'a> {
    stopwords: &'a Stopwords,
    params: PositionalParams,
}

impl<'a> PositionalScorer<'a> {
    pub fn new(stopwords: &'a Stopwords, params: PositionalParams) -> Self { Self { stopwords, params } }

    fn multiplier(&self, token: &str) -> f64 {
        if self.stopwords.contains(token) { self.params.stopword_multiplier } else { self.params.content_word_multiplier }
    }

    /// Scores `doc_id` against the query tokens in `store`. Tokens without a
    /// posting for the document are skipped; a document matching none scores 0.
    pub fn score<S: AsRef<str>>(&self, store: &PostingStore, tokens: &[S], doc_id: &str) -> PositionalScore {
        let mut sequences: Vec<&[u32]> = Vec::with_capacity(tokens.len());
        let mut raw_count = 0.0;
        let mut weighted_count = 0.0;
        for token in tokens {
            let token = token.as_ref();
            let Some(posting) = store.posting(token, doc_id) else { continue };
            let count = f64::from(posting.count);
            raw_count += count;
            weighted_count += count * self.multiplier(token);
            sequences.push(&posting.positions);
        }
        if sequences.is_empty() {
            return PositionalScore::default();
        }

        let count_component = match self.params.stopword_weighting {
            StopwordWeighting::PerToken => weighted_count,
            StopwordWeighting::LastToken => {
                let last = tokens.last().map_or("", |t| t.as_ref());
                raw_count * self.multiplier(last)
            }
        };
        let order = order_score(&sequences);
        let score = self.params.count_weight * (count_component / tokens.len() as f64)
            + self.params.order_weight * (1.0 - order);
        PositionalScore { order_score: order, count_component, score }
    }
}
