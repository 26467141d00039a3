//! Search result value objects

use serde::{Deserialize, Serialize};

use crate::value_objects::ScoredPoint;

/// One semantic search hit
///
/// Serialized with the field names of the public search API
/// (`id`, `score`, `num`, `code_parent`, `highlight`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Id of the document owning the matched chunk
    #[serde(rename = "id")]
    pub document_id: String,
    /// Raw cosine similarity in `[-1, 1]`
    pub score: f32,
    /// Document number or title
    #[serde(rename = "num")]
    pub title: Option<String>,
    /// Partition key of the matched document
    #[serde(rename = "code_parent")]
    pub matched_partition: Option<String>,
    /// Text of the chunk that matched
    pub highlight: String,
}

impl From<ScoredPoint> for SearchHit {
    fn from(hit: ScoredPoint) -> Self {
        Self {
            document_id: hit.payload.original_id,
            score: hit.score,
            title: hit.payload.title,
            matched_partition: hit.payload.code_parent,
            highlight: hit.payload.chunk_text,
        }
    }
}
