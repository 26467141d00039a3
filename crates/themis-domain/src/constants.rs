//! Domain layer constants
//!
//! Values that are part of the pipeline contract and shared by the
//! application and provider layers.

// ============================================================================
// CHUNKING CONSTANTS
// ============================================================================

/// Default maximum chunk length, in characters
pub const CHUNK_SIZE_DEFAULT: usize = 1000;

/// Default overlap between consecutive windows of a long paragraph
pub const CHUNK_OVERLAP_DEFAULT: usize = 200;

/// Paragraph separator applied before windowing
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

// ============================================================================
// EMBEDDING CONSTANTS
// ============================================================================

/// Prefix prepended to query-type text before encoding
pub const QUERY_PREFIX: &str = "query: ";

// ============================================================================
// INDEXING CONSTANTS
// ============================================================================

/// Points per acknowledged upsert batch during a rebuild
pub const INDEXING_UPSERT_BATCH_SIZE: usize = 256;

/// Point ids per acknowledged payload update during clustering
pub const CLUSTERING_UPDATE_BATCH_SIZE: usize = 512;

/// Default number of search hits
pub const SEARCH_DEFAULT_LIMIT: usize = 10;

/// Largest number of hits a single search returns; larger limits are clamped
pub const SEARCH_MAX_LIMIT: usize = 1000;

// ============================================================================
// PAYLOAD SCHEMA
// ============================================================================

/// Payload field holding the chunk text
pub const FIELD_CHUNK_TEXT: &str = "chunk_text";

/// Payload field holding the chunk position within its document
pub const FIELD_CHUNK_INDEX: &str = "chunk_index";

/// Payload field holding the document title
pub const FIELD_TITLE: &str = "title";

/// Payload field holding the source document id
pub const FIELD_ORIGINAL_ID: &str = "original_id";

/// Payload field holding the partition key
pub const FIELD_CODE_PARENT: &str = "code_parent";

/// Payload field holding the density cluster label
pub const FIELD_CLUSTER_ID: &str = "cluster_id";

/// Cluster label for points not assigned to any cluster
pub const NOISE_LABEL: i64 = -1;

// ============================================================================
// CLUSTERING CONSTANTS
// ============================================================================

/// Seed used by the reducer when none is configured
pub const CLUSTERING_SEED_DEFAULT: u64 = 42;

/// Minimum distance between embedded points in the reduced space
pub const REDUCTION_MIN_DIST_DEFAULT: f32 = 0.1;
