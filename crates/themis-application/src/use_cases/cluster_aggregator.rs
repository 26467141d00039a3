//! Cluster Aggregator Use Case
//!
//! Maps documents to the cluster most of their chunks fell into.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use themis_domain::constants::{FIELD_CLUSTER_ID, FIELD_ORIGINAL_ID, NOISE_LABEL};
use themis_domain::error::{Error, Result};
use themis_domain::ports::providers::VectorStore;
use themis_domain::value_objects::{PayloadFilter, ScrollQuery};

/// Majority vote over chunk-level cluster labels
pub struct ClusterAggregator {
    vector_store: Arc<dyn VectorStore>,
    collection: String,
}

impl ClusterAggregator {
    /// Create an aggregator over `collection`
    pub fn new(vector_store: Arc<dyn VectorStore>, collection: impl Into<String>) -> Self {
        Self {
            vector_store,
            collection: collection.into(),
        }
    }

    /// Dominant cluster per requested document
    ///
    /// Only documents with at least one chunk appear in the result. Chunks
    /// without a label vote for noise.
    pub async fn dominant_clusters(&self, document_ids: &[String]) -> Result<BTreeMap<String, i64>> {
        if document_ids.is_empty() {
            return Err(Error::client_input("article_ids must not be empty"));
        }

        let query = ScrollQuery::filtered(PayloadFilter::any_of(
            FIELD_ORIGINAL_ID,
            document_ids.to_vec(),
        ))
        .only_fields(&[FIELD_ORIGINAL_ID, FIELD_CLUSTER_ID]);
        let exported = self.vector_store.scroll(&self.collection, &query).await?;
        if exported.points.is_empty() {
            return Err(Error::not_found("No chunks found for this code"));
        }

        let mut labels_by_document: HashMap<String, Vec<i64>> = HashMap::new();
        for point in exported.points {
            labels_by_document
                .entry(point.payload.original_id.clone())
                .or_default()
                .push(point.payload.cluster_or_noise());
        }

        Ok(labels_by_document
            .into_iter()
            .map(|(document, labels)| (document, majority_label(&labels)))
            .collect())
    }
}

/// Most frequent label; on a tie the label that reached the top count first
pub fn majority_label(labels: &[i64]) -> i64 {
    let mut counts: HashMap<i64, usize> = HashMap::new();
    let mut best = NOISE_LABEL;
    let mut best_count = 0;
    for &label in labels {
        let count = counts.entry(label).or_insert(0);
        *count += 1;
        if *count > best_count {
            best = label;
            best_count = *count;
        }
    }
    best
}
