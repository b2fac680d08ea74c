use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Catalog document ids are kept in the string form used as posting keys.
pub type DocId = String;

/// token -> doc_id -> posting, for one field.
pub type FieldIndex = HashMap<String, HashMap<DocId, Posting>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Content,
}

impl Field {
    pub const ALL: [Field; 2] = [Field::Title, Field::Content];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Content => "content",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    #[serde(default)]
    pub count: u32,
    /// Ascending token offsets within the field.
    #[serde(default)]
    pub positions: Vec<u32>,
}

impl Posting {
    pub fn new(count: u32, positions: Vec<u32>) -> Self { Self { count, positions } }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(deserialize_with = "id_as_string")]
    pub id: DocId,
    pub title: String,
    pub url: String,
}

impl Document {
    pub fn new(id: impl Into<DocId>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self { id: id.into(), title: title.into(), url: url.into() }
    }
}

/// Catalog files written by other tools carry numeric ids; index keys are always strings.
fn id_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DocId, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Uint(u64),
    }
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Uint(n) => n.to_string(),
    })
}
