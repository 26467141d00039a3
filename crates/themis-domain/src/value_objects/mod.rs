//! Domain value objects
//!
//! Immutable data carried between the pipeline stages.

pub mod clustering;
pub mod document;
pub mod indexing;
pub mod point;
pub mod search;

pub use clustering::{
    ClusterLabels, ClusteringJob, ClusteringParams, ClusteringReport, ReductionParams,
};
pub use document::{Chunk, Document};
pub use indexing::IndexingReport;
pub use point::{
    ChunkPayload, PayloadFilter, Point, ScoredPoint, ScrollQuery, ScrollResult, Vector,
    is_valid_vector,
};
pub use search::SearchHit;
