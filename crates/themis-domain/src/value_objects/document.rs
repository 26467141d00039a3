//! Source documents and the chunks cut from them

use serde::{Deserialize, Serialize};

/// A legal-text document as delivered by the document source
///
/// Immutable for the duration of a pipeline run. `partition_key` groups
/// documents into families (a legal code) for filtered search and clustering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Stable identifier from the source
    pub id: String,
    /// Full text content
    pub text: String,
    /// Family the document belongs to
    pub partition_key: Option<String>,
    /// Human-readable number or title
    pub title: Option<String>,
}

impl Document {
    /// Create a document with only an id and text
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            partition_key: None,
            title: None,
        }
    }

    /// Set the partition key
    pub fn with_partition_key(mut self, partition_key: impl Into<String>) -> Self {
        self.partition_key = Some(partition_key.into());
        self
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Whether the document carries any indexable text
    pub fn has_content(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// A bounded slice of a document, the unit that gets embedded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Id of the owning document
    pub document_id: String,
    /// 0-based position within the document
    pub index: usize,
    /// Chunk text
    pub text: String,
    /// Partition key inherited from the document
    pub partition_key: Option<String>,
    /// Title inherited from the document
    pub title: Option<String>,
}

impl Chunk {
    /// Build the ordered chunks of `document` from already-split texts
    pub fn from_texts(document: &Document, texts: Vec<String>) -> Vec<Self> {
        texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| Self {
                document_id: document.id.clone(),
                index,
                text,
                partition_key: document.partition_key.clone(),
                title: document.title.clone(),
            })
            .collect()
    }
}
