//! Clustering job configuration
//!
//! Each partition carries parameters tuned for its code. The defaults are
//! the two codes the service ships with.

use serde::{Deserialize, Serialize};
use themis_domain::constants::{
    CLUSTERING_SEED_DEFAULT, CLUSTERING_UPDATE_BATCH_SIZE, REDUCTION_MIN_DIST_DEFAULT,
};
use themis_domain::value_objects::{ClusteringJob, ClusteringParams, ReductionParams};

/// Parameters for one partition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionConfig {
    /// Partition key (`code_parent` value)
    pub code_parent: String,
    /// Reducer neighborhood size
    pub n_neighbors: usize,
    /// Reducer output dimensionality
    pub n_components: usize,
    /// Smallest reported cluster
    pub min_cluster_size: usize,
    /// Core distance neighborhood, defaults to `min_cluster_size`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_samples: Option<usize>,
}

impl PartitionConfig {
    /// Build the job for this partition
    pub fn to_job(&self, seed: u64, min_dist: f32) -> ClusteringJob {
        ClusteringJob {
            partition_key: self.code_parent.clone(),
            reduction: ReductionParams::new(self.n_neighbors, self.n_components)
                .with_seed(seed)
                .with_min_dist(min_dist),
            clustering: ClusteringParams::new(self.min_cluster_size, self.min_samples),
        }
    }
}

/// Clustering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Point ids per payload update request
    pub update_batch_size: usize,

    /// Reducer seed shared by every partition
    pub seed: u64,

    /// Reducer minimum spacing shared by every partition
    pub min_dist: f32,

    /// Partitions processed by a full run, in order
    pub partitions: Vec<PartitionConfig>,
}

impl ClusteringConfig {
    /// Jobs for every configured partition
    pub fn jobs(&self) -> Vec<ClusteringJob> {
        self.partitions
            .iter()
            .map(|p| p.to_job(self.seed, self.min_dist))
            .collect()
    }
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            update_batch_size: CLUSTERING_UPDATE_BATCH_SIZE,
            seed: CLUSTERING_SEED_DEFAULT,
            min_dist: REDUCTION_MIN_DIST_DEFAULT,
            partitions: vec![
                PartitionConfig {
                    code_parent: "LEGITEXT000006071307".to_string(),
                    n_neighbors: 15,
                    n_components: 30,
                    min_cluster_size: 82,
                    min_samples: Some(13),
                },
                PartitionConfig {
                    code_parent: "LEGITEXT000044416551".to_string(),
                    n_neighbors: 15,
                    n_components: 30,
                    min_cluster_size: 34,
                    min_samples: Some(29),
                },
            ],
        }
    }
}
