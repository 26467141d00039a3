//! Use cases: the pipeline operations exposed to delivery surfaces

pub mod cluster_aggregator;
pub mod clustering_pipeline;
pub mod index_builder;
pub mod search_service;

pub use cluster_aggregator::{ClusterAggregator, majority_label};
pub use clustering_pipeline::ClusteringPipeline;
pub use index_builder::{IndexBuilder, IndexingSettings};
pub use search_service::SearchService;
