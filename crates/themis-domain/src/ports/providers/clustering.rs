use crate::error::Result;
use crate::value_objects::{ClusterLabels, ClusteringParams, ReductionParams, Vector};

/// Neighborhood-graph dimensionality reduction
///
/// CPU-bound and synchronous; async callers run it on a blocking thread.
pub trait DimensionReducer: Send + Sync {
    /// Embed `vectors` (cosine geometry) into `params.n_components` dimensions
    ///
    /// Deterministic for a fixed `params.seed`. Returns one row per input.
    fn reduce(&self, vectors: &[Vector], params: &ReductionParams) -> Result<Vec<Vector>>;
}

/// Noise-aware density clustering
pub trait DensityClusterer: Send + Sync {
    /// Label each point (Euclidean geometry), `-1` for noise
    fn cluster(&self, points: &[Vector], params: &ClusteringParams) -> Result<ClusterLabels>;
}
