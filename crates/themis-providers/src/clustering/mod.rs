//! Dimensionality reduction and density clustering
//!
//! Both are CPU-bound and synchronous; the clustering pipeline runs them on
//! the blocking thread pool.

pub mod hdbscan;
pub mod umap;

pub use hdbscan::HdbscanClusterer;
pub use umap::UmapReducer;
