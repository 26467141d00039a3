//! Vector store points and their payload schema
//!
//! Stores hand back loosely typed JSON payloads. Everything that crosses the
//! store boundary is converted through [`ChunkPayload::from_json`] so the rest
//! of the system only ever sees the explicit schema.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{
    FIELD_CHUNK_INDEX, FIELD_CHUNK_TEXT, FIELD_CLUSTER_ID, FIELD_CODE_PARENT, FIELD_ORIGINAL_ID,
    FIELD_TITLE, NOISE_LABEL,
};
use crate::value_objects::Chunk;

/// Dense embedding vector
pub type Vector = Vec<f32>;

/// Payload stored alongside every chunk vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkPayload {
    /// Text of the chunk
    #[serde(default)]
    pub chunk_text: String,
    /// Position of the chunk in its document
    #[serde(default)]
    pub chunk_index: u64,
    /// Document number or title
    #[serde(default)]
    pub title: Option<String>,
    /// Id of the source document
    pub original_id: String,
    /// Partition key of the source document
    #[serde(default)]
    pub code_parent: Option<String>,
    /// Density cluster label, absent until a clustering run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<i64>,
}

impl ChunkPayload {
    /// Cluster label, with a missing label read as noise
    pub fn cluster_or_noise(&self) -> i64 {
        self.cluster_id.unwrap_or(NOISE_LABEL)
    }

    /// Read a payload from a store-provided JSON object
    ///
    /// Identifiers and titles may arrive as strings or numbers and are
    /// normalised to strings. Returns `None` when `original_id` is missing,
    /// which makes the point unusable for every read path.
    pub fn from_json(map: &Map<String, Value>) -> Option<Self> {
        let original_id = map.get(FIELD_ORIGINAL_ID).and_then(scalar_to_string)?;
        Some(Self {
            chunk_text: map
                .get(FIELD_CHUNK_TEXT)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            chunk_index: map
                .get(FIELD_CHUNK_INDEX)
                .and_then(|v| v.as_u64().or_else(|| v.as_f64().map(|f| f as u64)))
                .unwrap_or(0),
            title: map.get(FIELD_TITLE).and_then(scalar_to_string),
            original_id,
            code_parent: map.get(FIELD_CODE_PARENT).and_then(scalar_to_string),
            cluster_id: map
                .get(FIELD_CLUSTER_ID)
                .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))),
        })
    }

    /// Convert to the JSON object written to the store
    pub fn to_json(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(FIELD_CHUNK_TEXT.into(), Value::from(self.chunk_text.clone()));
        map.insert(FIELD_CHUNK_INDEX.into(), Value::from(self.chunk_index));
        map.insert(FIELD_TITLE.into(), option_to_value(self.title.as_deref()));
        map.insert(FIELD_ORIGINAL_ID.into(), Value::from(self.original_id.clone()));
        map.insert(
            FIELD_CODE_PARENT.into(),
            option_to_value(self.code_parent.as_deref()),
        );
        if let Some(cluster_id) = self.cluster_id {
            map.insert(FIELD_CLUSTER_ID.into(), Value::from(cluster_id));
        }
        map
    }
}

impl From<&Chunk> for ChunkPayload {
    fn from(chunk: &Chunk) -> Self {
        Self {
            chunk_text: chunk.text.clone(),
            chunk_index: chunk.index as u64,
            title: chunk.title.clone(),
            original_id: chunk.document_id.clone(),
            code_parent: chunk.partition_key.clone(),
            cluster_id: None,
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn option_to_value(value: Option<&str>) -> Value {
    value.map_or(Value::Null, Value::from)
}

/// A stored chunk: opaque id, vector and payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Opaque id assigned at write time
    pub id: String,
    /// Embedding; empty when read without vectors
    pub vector: Vector,
    /// Chunk payload
    pub payload: ChunkPayload,
}

impl Point {
    /// Create a point with a fresh random id
    pub fn new(vector: Vector, payload: ChunkPayload) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            vector,
            payload,
        }
    }
}

/// A search hit as returned by a vector store
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPoint {
    /// Point id
    pub id: String,
    /// Raw cosine similarity in `[-1, 1]`
    pub score: f32,
    /// Chunk payload
    pub payload: ChunkPayload,
}

/// Predicate over one payload field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadFilter {
    /// Field equals the value
    Equals {
        /// Payload field name
        field: String,
        /// Expected value
        value: String,
    },
    /// Field equals any of the values
    AnyOf {
        /// Payload field name
        field: String,
        /// Accepted values
        values: Vec<String>,
    },
}

impl PayloadFilter {
    /// Equality predicate
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Membership predicate
    pub fn any_of(field: impl Into<String>, values: Vec<String>) -> Self {
        Self::AnyOf {
            field: field.into(),
            values,
        }
    }

    /// Name of the filtered field
    pub fn field(&self) -> &str {
        match self {
            Self::Equals { field, .. } | Self::AnyOf { field, .. } => field,
        }
    }

    /// Evaluate against a raw JSON payload
    pub fn matches(&self, payload: &Map<String, Value>) -> bool {
        let Some(actual) = payload.get(self.field()).and_then(scalar_to_string) else {
            return false;
        };
        match self {
            Self::Equals { value, .. } => actual == *value,
            Self::AnyOf { values, .. } => values.iter().any(|v| *v == actual),
        }
    }
}

/// Parameters of a full-cursor export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollQuery {
    /// Optional predicate
    pub filter: Option<PayloadFilter>,
    /// Whether vectors are returned
    pub with_vectors: bool,
    /// Restrict returned payload fields; `None` returns all of them
    pub payload_fields: Option<Vec<String>>,
}

impl ScrollQuery {
    /// Export every point, payload only
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to points matching `filter`
    pub fn filtered(filter: PayloadFilter) -> Self {
        Self {
            filter: Some(filter),
            ..Self::default()
        }
    }

    /// Also return vectors
    #[must_use]
    pub fn with_vectors(mut self) -> Self {
        self.with_vectors = true;
        self
    }

    /// Return only the named payload fields
    #[must_use]
    pub fn only_fields(mut self, fields: &[&str]) -> Self {
        self.payload_fields = Some(fields.iter().map(|f| (*f).to_string()).collect());
        self
    }
}

/// Points returned by a scroll, plus what had to be discarded
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollResult {
    /// Valid points in store order
    pub points: Vec<Point>,
    /// Points dropped because their vector had the wrong length or non-finite values
    pub invalid_vectors: usize,
    /// Points dropped because their payload did not match the schema
    pub invalid_payloads: usize,
}

/// Check a vector against the collection dimension
pub fn is_valid_vector(vector: &[f32], dimension: usize) -> bool {
    vector.len() == dimension && vector.iter().all(|v| v.is_finite())
}
