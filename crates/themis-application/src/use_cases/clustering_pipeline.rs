//! Clustering Pipeline Use Case
//!
//! Offline job, one partition at a time: export the partition's vectors,
//! reduce them, cluster the reduced points and write `cluster_id` back onto
//! every point. Only `cluster_id` is touched.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::Value;
use themis_domain::constants::{CLUSTERING_UPDATE_BATCH_SIZE, FIELD_CLUSTER_ID, FIELD_CODE_PARENT};
use themis_domain::error::{Error, Result};
use themis_domain::ports::providers::{DensityClusterer, DimensionReducer, VectorStore};
use themis_domain::value_objects::{
    ClusterLabels, ClusteringJob, ClusteringReport, PayloadFilter, Point, ScrollQuery,
    is_valid_vector,
};
use tracing::{error, info, warn};

/// Reduce-then-cluster job runner
pub struct ClusteringPipeline {
    vector_store: Arc<dyn VectorStore>,
    reducer: Arc<dyn DimensionReducer>,
    clusterer: Arc<dyn DensityClusterer>,
    collection: String,
    update_batch_size: usize,
}

impl ClusteringPipeline {
    /// Create a pipeline over `collection`
    pub fn new(
        vector_store: Arc<dyn VectorStore>,
        reducer: Arc<dyn DimensionReducer>,
        clusterer: Arc<dyn DensityClusterer>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            vector_store,
            reducer,
            clusterer,
            collection: collection.into(),
            update_batch_size: CLUSTERING_UPDATE_BATCH_SIZE,
        }
    }

    /// Override how many point ids go into one payload update
    #[must_use]
    pub fn with_update_batch_size(mut self, size: usize) -> Self {
        self.update_batch_size = size;
        self
    }

    /// Cluster one partition and persist its labels
    pub async fn cluster(&self, job: &ClusteringJob) -> Result<ClusteringReport> {
        if self.update_batch_size == 0 {
            return Err(Error::configuration("Cluster update batch size must be positive"));
        }
        let partition = job.partition_key.as_str();
        info!(partition, collection = %self.collection, "Starting clustering");

        let query = ScrollQuery::filtered(PayloadFilter::equals(FIELD_CODE_PARENT, partition))
            .with_vectors();
        let exported = self.vector_store.scroll(&self.collection, &query).await?;
        let (points, rejected) = retain_valid_vectors(exported.points);
        let invalid_vectors = exported.invalid_vectors + rejected;
        if invalid_vectors > 0 {
            warn!(
                partition,
                invalid = invalid_vectors,
                "Skipped points with invalid vectors"
            );
        }
        if points.is_empty() {
            warn!(partition, "No points found for partition");
            return Ok(ClusteringReport {
                invalid_vectors,
                ..ClusteringReport::empty(partition)
            });
        }

        let (ids, vectors): (Vec<String>, Vec<_>) = points
            .into_iter()
            .map(|p| (p.id, p.vector))
            .unzip();
        info!(partition, points = ids.len(), "Vectors exported");

        let labels = self.reduce_and_cluster(vectors, job).await?;
        if labels.labels.len() != ids.len() {
            return Err(Error::clustering(format!(
                "Clusterer returned {} labels for {} points",
                labels.labels.len(),
                ids.len()
            )));
        }

        let n_clusters = labels.cluster_count();
        match labels.relative_validity {
            Some(score) => info!(partition, n_clusters, score, "Clusters found"),
            None => info!(partition, n_clusters, "Clusters found, no validity score"),
        }

        self.write_labels(&ids, &labels.labels).await?;

        let report = ClusteringReport {
            partition_key: partition.to_string(),
            points: ids.len(),
            invalid_vectors,
            n_clusters,
            noise_ratio: labels.noise_ratio(),
            relative_validity: labels.relative_validity,
        };
        info!(partition, points = report.points, "Cluster labels written");
        Ok(report)
    }

    /// Run `jobs` in order; a failing partition is logged and skipped
    pub async fn cluster_all(&self, jobs: &[ClusteringJob]) -> Vec<ClusteringReport> {
        let mut reports = Vec::with_capacity(jobs.len());
        for job in jobs {
            match self.cluster(job).await {
                Ok(report) => reports.push(report),
                Err(e) => error!(partition = %job.partition_key, error = %e, "Clustering failed"),
            }
        }
        reports
    }

    async fn reduce_and_cluster(
        &self,
        vectors: Vec<Vec<f32>>,
        job: &ClusteringJob,
    ) -> Result<ClusterLabels> {
        let reducer = Arc::clone(&self.reducer);
        let clusterer = Arc::clone(&self.clusterer);
        let reduction = job.reduction;
        let clustering = job.clustering;

        tokio::task::spawn_blocking(move || {
            let reduced = reducer.reduce(&vectors, &reduction)?;
            clusterer.cluster(&reduced, &clustering)
        })
        .await
        .map_err(|e| Error::internal(format!("Clustering task failed: {e}")))?
    }

    async fn write_labels(&self, ids: &[String], labels: &[i64]) -> Result<()> {
        let mut by_label: BTreeMap<i64, Vec<String>> = BTreeMap::new();
        for (id, &label) in ids.iter().zip(labels) {
            by_label.entry(label).or_default().push(id.clone());
        }
        for (label, members) in &by_label {
            for batch in members.chunks(self.update_batch_size) {
                self.vector_store
                    .set_payload_field(&self.collection, batch, FIELD_CLUSTER_ID, Value::from(*label))
                    .await?;
            }
        }
        Ok(())
    }
}

/// Drop points whose vector has non-finite values or a length other than
/// the partition's dominant one; returns the kept points and the drop count
fn retain_valid_vectors(points: Vec<Point>) -> (Vec<Point>, usize) {
    let mut lengths: HashMap<usize, usize> = HashMap::new();
    for point in &points {
        if !point.vector.is_empty() && point.vector.iter().all(|v| v.is_finite()) {
            *lengths.entry(point.vector.len()).or_insert(0) += 1;
        }
    }
    let Some(dimension) = lengths
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
        .map(|(len, _)| len)
    else {
        let dropped = points.len();
        return (Vec::new(), dropped);
    };

    let total = points.len();
    let kept: Vec<Point> = points
        .into_iter()
        .filter(|p| is_valid_vector(&p.vector, dimension))
        .collect();
    let dropped = total - kept.len();
    (kept, dropped)
}
