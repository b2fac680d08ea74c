use crate::bm25::Bm25Scorer;
use crate::config::RankingConfig;
use crate::positional::PositionalScorer;
use crate::resolve::{resolve, MatchPolicy};
use crate::store::IndexSnapshot;
use crate::tokenizer::{tokenize_query, Stopwords};
use crate::{DocId, Field, Result};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Per-candidate scores for a single ranking call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRecord {
    pub doc_id: DocId,
    pub title_score: f64,
    pub content_score: f64,
    pub bm25_title: f64,
    pub bm25_content: f64,
    pub final_score: f64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Candidates {
    pub title: HashSet<DocId>,
    pub content: HashSet<DocId>,
}

impl Candidates {
    pub fn is_empty(&self) -> bool { self.title.is_empty() && self.content.is_empty() }

    pub fn get(&self, field: Field) -> &HashSet<DocId> {
        match field {
            Field::Title => &self.title,
            Field::Content => &self.content,
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut HashSet<DocId> {
        match field {
            Field::Title => &mut self.title,
            Field::Content => &mut self.content,
        }
    }
}

/// Ordered title -> url mapping. Serializes as a JSON object in rank order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RankedResults {
    entries: Vec<(String, String)>,
    slots: HashMap<String, usize>,
}

impl RankedResults {
    pub fn new() -> Self { Self::default() }

    /// A repeated title keeps its first rank and takes the later url.
    pub fn insert(&mut self, title: String, url: String) {
        match self.slots.get(&title) {
            Some(&i) => self.entries[i].1 = url,
            None => {
                self.slots.insert(title.clone(), self.entries.len());
                self.entries.push((title, url));
            }
        }
    }

    pub fn get(&self, title: &str) -> Option<&str> {
        self.slots.get(title).map(|&i| self.entries[i].1.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, u)| (t.as_str(), u.as_str()))
    }

    pub fn titles(&self) -> Vec<&str> { self.entries.iter().map(|(t, _)| t.as_str()).collect() }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl Serialize for RankedResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (title, url) in &self.entries {
            map.serialize_entry(title, url)?;
        }
        map.end()
    }
}

/// Ranks catalog documents for free-text queries against a loaded snapshot.
///
/// The engine holds no mutable state, so one instance can be shared behind an
/// `Arc` by any number of concurrent callers.
#[derive(Debug)]
pub struct RankingEngine {
    snapshot: IndexSnapshot,
    stopwords: Stopwords,
    config: RankingConfig,
}

impl RankingEngine {
    pub fn new(snapshot: IndexSnapshot, stopwords: Stopwords, config: RankingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { snapshot, stopwords, config })
    }

    pub fn snapshot(&self) -> &IndexSnapshot { &self.snapshot }

    pub fn config(&self) -> &RankingConfig { &self.config }

    pub fn stopwords(&self) -> &Stopwords { &self.stopwords }

    /// Boolean candidate sets per loaded field. Tokens unknown to a field are
    /// left out of that field's combination.
    pub fn candidates<S: AsRef<str>>(&self, tokens: &[S], policy: MatchPolicy) -> Candidates {
        let mut out = Candidates::default();
        for field in Field::ALL {
            let Some(store) = self.snapshot.field(field) else { continue };
            let sets = tokens
                .iter()
                .map(|t| t.as_ref())
                .filter(|t| store.contains_token(t))
                .map(|t| store.postings(t).keys());
            *out.get_mut(field) = resolve(sets, policy);
        }
        out
    }

    /// Score every candidate and order by final score, then catalog order.
    pub fn rank(&self, query: &str, policy: MatchPolicy) -> Vec<ScoreRecord> {
        let tokens = tokenize_query(query);
        if tokens.is_empty() {
            tracing::debug!(query, "empty query");
            return Vec::new();
        }
        let candidates = self.candidates(&tokens, policy);
        if candidates.is_empty() {
            tracing::debug!(query, %policy, "no matching documents");
            return Vec::new();
        }
        tracing::debug!(
            query,
            %policy,
            title_candidates = candidates.title.len(),
            content_candidates = candidates.content.len(),
            "resolved candidates"
        );

        let positional = PositionalScorer::new(&self.stopwords, self.config.positional);
        let bm25 = Bm25Scorer::new(&self.snapshot, self.config.bm25);
        let mut records: HashMap<&DocId, ScoreRecord> = HashMap::new();
        for field in Field::ALL {
            let Some(store) = self.snapshot.field(field) else { continue };
            for doc_id in candidates.get(field) {
                let pos = positional.score(store, &tokens, doc_id);
                // the field is loaded, so the lookup cannot be unavailable
                let bm = bm25.document_score(&tokens, doc_id, field).unwrap_or(0.0);
                let rec = records.entry(doc_id).or_insert_with(|| ScoreRecord {
                    doc_id: doc_id.clone(),
                    title_score: 0.0,
                    content_score: 0.0,
                    bm25_title: 0.0,
                    bm25_content: 0.0,
                    final_score: 0.0,
                });
                match field {
                    Field::Title => {
                        rec.title_score = pos.score;
                        rec.bm25_title = bm;
                    }
                    Field::Content => {
                        rec.content_score = pos.score;
                        rec.bm25_content = bm;
                    }
                }
            }
        }

        let w = self.config.blend;
        let mut ranked: Vec<(usize, ScoreRecord)> = records
            .into_values()
            .map(|mut rec| {
                rec.final_score = w.positional_scale
                    * (w.title_positional * rec.title_score + w.content_positional * rec.content_score)
                    + w.title_bm25 * rec.bm25_title
                    + w.content_bm25 * rec.bm25_content;
                let order = self.snapshot.catalog_position(&rec.doc_id).unwrap_or(usize::MAX);
                (order, rec)
            })
            .collect();
        ranked.sort_by(|(oa, a), (ob, b)| {
            b.final_score
                .total_cmp(&a.final_score)
                .then(oa.cmp(ob))
                .then_with(|| a.doc_id.cmp(&b.doc_id))
        });
        ranked.into_iter().map(|(_, rec)| rec).collect()
    }

    /// Rank and join against the catalog. Ids missing from the catalog are dropped.
    pub fn search(&self, query: &str, policy: MatchPolicy) -> RankedResults {
        self.join(&self.rank(query, policy))
    }

    pub fn join(&self, records: &[ScoreRecord]) -> RankedResults {
        let mut results = RankedResults::new();
        for rec in records {
            if let Some(doc) = self.snapshot.document(&rec.doc_id) {
                results.insert(doc.title.clone(), doc.url.clone());
            }
        }
        results
    }
}
