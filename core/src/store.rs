use crate::{DocId, Document, Error, Field, FieldIndex, Posting, Result};
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Read-only view over one field's inverted index.
#[derive(Debug)]
pub struct PostingStore {
    index: FieldIndex,
    average_document_length: f64,
}

lazy_static! {
    static ref NO_POSTINGS: HashMap<DocId, Posting> = HashMap::new();
}

impl PostingStore {
    /// `catalog_len` is the number of documents in the catalog, which may exceed
    /// the number of documents this field covers.
    pub fn new(index: FieldIndex, catalog_len: usize) -> Result<Self> {
        if catalog_len == 0 {
            return Err(Error::EmptyCatalog);
        }
        let total: u64 = index.values().flat_map(|docs| docs.values()).map(|p| u64::from(p.count)).sum();
        let average_document_length = total as f64 / catalog_len as f64;
        Ok(Self { index, average_document_length })
    }

    pub fn postings(&self, token: &str) -> &HashMap<DocId, Posting> {
        self.index.get(token).unwrap_or(&*NO_POSTINGS)
    }

    pub fn posting(&self, token: &str, doc_id: &str) -> Option<&Posting> {
        self.index.get(token).and_then(|docs| docs.get(doc_id))
    }

    pub fn contains_token(&self, token: &str) -> bool { self.index.contains_key(token) }

    /// Total occurrences of `token` across the corpus, used as the BM25 length term.
    pub fn field_length(&self, token: &str) -> u64 {
        self.postings(token).values().map(|p| u64::from(p.count)).sum()
    }

    pub fn document_frequency(&self, token: &str) -> usize { self.postings(token).len() }

    pub fn average_document_length(&self) -> f64 { self.average_document_length }

    pub fn vocabulary_size(&self) -> usize { self.index.len() }

    pub fn posting_count(&self) -> usize { self.index.values().map(HashMap::len).sum() }
}

/// The immutable data a ranking call runs against: catalog plus one store per loaded field.
#[derive(Debug)]
pub struct IndexSnapshot {
    catalog: Vec<Document>,
    positions: HashMap<DocId, usize>,
    title: PostingStore,
    content: Option<PostingStore>,
}

impl IndexSnapshot {
    pub fn new(catalog: Vec<Document>, title: FieldIndex, content: Option<FieldIndex>) -> Result<Self> {
        let title = PostingStore::new(title, catalog.len())?;
        let content = content.map(|c| PostingStore::new(c, catalog.len())).transpose()?;
        let mut positions = HashMap::with_capacity(catalog.len());
        for (i, doc) in catalog.iter().enumerate() {
            // first occurrence wins for duplicated ids
            positions.entry(doc.id.clone()).or_insert(i);
        }
        Ok(Self { catalog, positions, title, content })
    }

    pub fn catalog(&self) -> &[Document] { &self.catalog }

    pub fn corpus_size(&self) -> usize { self.catalog.len() }

    pub fn document(&self, doc_id: &str) -> Option<&Document> {
        self.positions.get(doc_id).map(|&i| &self.catalog[i])
    }

    /// Position of the document in the catalog, used to break score ties.
    pub fn catalog_position(&self, doc_id: &str) -> Option<usize> { self.positions.get(doc_id).copied() }

    pub fn is_enabled(&self, field: Field) -> bool { self.field(field).is_some() }

    pub fn field(&self, field: Field) -> Option<&PostingStore> {
        match field {
            Field::Title => Some(&self.title),
            Field::Content => self.content.as_ref(),
        }
    }

    pub fn store(&self, field: Field) -> Result<&PostingStore> {
        self.field(field).ok_or(Error::FieldUnavailable(field))
    }

    pub fn postings(&self, token: &str, field: Field) -> Result<&HashMap<DocId, Posting>> {
        Ok(self.store(field)?.postings(token))
    }

    pub fn field_length(&self, token: &str, field: Field) -> Result<u64> {
        Ok(self.store(field)?.field_length(token))
    }

    pub fn document_frequency(&self, token: &str, field: Field) -> Result<usize> {
        Ok(self.store(field)?.document_frequency(token))
    }

    pub fn average_document_length(&self, field: Field) -> Option<f64> {
        self.field(field).map(PostingStore::average_document_length)
    }
}
