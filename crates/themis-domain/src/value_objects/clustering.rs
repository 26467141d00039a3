//! Clustering parameters and outcomes

use serde::{Deserialize, Serialize};

use crate::constants::{CLUSTERING_SEED_DEFAULT, NOISE_LABEL, REDUCTION_MIN_DIST_DEFAULT};

/// Settings of the neighborhood-graph dimensionality reduction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReductionParams {
    /// Size of the local neighborhood
    pub n_neighbors: usize,
    /// Target dimensionality
    pub n_components: usize,
    /// Minimum spacing of embedded points
    #[serde(default = "default_min_dist")]
    pub min_dist: f32,
    /// Random seed, fixed for reproducible runs
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_min_dist() -> f32 {
    REDUCTION_MIN_DIST_DEFAULT
}

fn default_seed() -> u64 {
    CLUSTERING_SEED_DEFAULT
}

impl ReductionParams {
    /// Create with default spacing and seed
    pub fn new(n_neighbors: usize, n_components: usize) -> Self {
        Self {
            n_neighbors,
            n_components,
            min_dist: REDUCTION_MIN_DIST_DEFAULT,
            seed: CLUSTERING_SEED_DEFAULT,
        }
    }

    /// Override the seed
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Override the minimum spacing
    #[must_use]
    pub fn with_min_dist(mut self, min_dist: f32) -> Self {
        self.min_dist = min_dist;
        self
    }
}

/// Settings of the density clustering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusteringParams {
    /// Smallest group reported as a cluster
    pub min_cluster_size: usize,
    /// Neighborhood size used for core distances; defaults to `min_cluster_size`
    pub min_samples: Option<usize>,
}

impl ClusteringParams {
    /// Create with explicit `min_samples`
    pub fn new(min_cluster_size: usize, min_samples: Option<usize>) -> Self {
        Self {
            min_cluster_size,
            min_samples,
        }
    }

    /// Effective `min_samples`
    pub fn effective_min_samples(&self) -> usize {
        self.min_samples.unwrap_or(self.min_cluster_size).max(1)
    }
}

/// Labels produced by the density clusterer
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterLabels {
    /// One label per input point, `-1` for noise
    pub labels: Vec<i64>,
    /// Relative validity of the hierarchy, when at least one cluster exists
    pub relative_validity: Option<f64>,
}

impl ClusterLabels {
    /// Number of distinct non-noise labels
    pub fn cluster_count(&self) -> usize {
        let mut seen: Vec<i64> = self
            .labels
            .iter()
            .copied()
            .filter(|&l| l != NOISE_LABEL)
            .collect();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }

    /// Fraction of points labelled as noise
    pub fn noise_ratio(&self) -> f64 {
        if self.labels.is_empty() {
            return 0.0;
        }
        let noise = self.labels.iter().filter(|&&l| l == NOISE_LABEL).count();
        noise as f64 / self.labels.len() as f64
    }
}

/// One per-partition clustering job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringJob {
    /// Partition key to cluster
    pub partition_key: String,
    /// Reduction settings
    pub reduction: ReductionParams,
    /// Clustering settings
    pub clustering: ClusteringParams,
}

/// Summary of one clustering run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringReport {
    /// Partition key that was processed
    pub partition_key: String,
    /// Points that received a label
    pub points: usize,
    /// Points skipped because their vector was invalid
    pub invalid_vectors: usize,
    /// Distinct clusters, noise excluded
    pub n_clusters: usize,
    /// Fraction of labelled points that are noise
    pub noise_ratio: f64,
    /// Relative validity score of the density hierarchy
    pub relative_validity: Option<f64>,
}

impl ClusteringReport {
    /// Report for a partition without points
    pub fn empty(partition_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            points: 0,
            invalid_vectors: 0,
            n_clusters: 0,
            noise_ratio: 0.0,
            relative_validity: None,
        }
    }
}
