//! Provider Constants
//!
//! Constants specific to provider implementations. Domain constants live in
//! `themis-domain`.

// ============================================================================
// EMBEDDING PROVIDER CONSTANTS
// ============================================================================

/// Null model dimension
pub const EMBEDDING_DIMENSION_NULL: usize = 384;

/// Queue depth of the FastEmbed actor
pub const FASTEMBED_CHANNEL_CAPACITY: usize = 100;

/// Directory under the user cache dir holding downloaded ONNX models
pub const FASTEMBED_CACHE_SUBDIR: &str = "themis/models";

// ============================================================================
// VECTOR STORE CONSTANTS
// ============================================================================

/// Points requested per Qdrant scroll page
pub const QDRANT_SCROLL_PAGE_SIZE_DEFAULT: usize = 256;

/// Qdrant request timeout in seconds
pub const QDRANT_TIMEOUT_SECS_DEFAULT: u64 = 60;

/// Attempts per Qdrant request (first try included)
pub const QDRANT_MAX_ATTEMPTS: usize = 3;

/// Header carrying the Qdrant API key
pub const QDRANT_API_KEY_HEADER: &str = "api-key";

// ============================================================================
// DOCUMENT SOURCE CONSTANTS
// ============================================================================

/// Header carrying the document source API key
pub const SOURCE_API_KEY_HEADER: &str = "x-api-key";

// ============================================================================
// REDUCER CONSTANTS
// ============================================================================

/// Optimisation epochs for small inputs
pub const UMAP_EPOCHS_SMALL: usize = 500;

/// Optimisation epochs above `UMAP_SMALL_INPUT_LIMIT` points
pub const UMAP_EPOCHS_LARGE: usize = 200;

/// Largest input still optimised with `UMAP_EPOCHS_SMALL`
pub const UMAP_SMALL_INPUT_LIMIT: usize = 10_000;

/// Negative samples drawn per positive edge update
pub const UMAP_NEGATIVE_SAMPLE_RATE: usize = 5;

/// Initial SGD learning rate
pub const UMAP_LEARNING_RATE: f32 = 1.0;

/// Per-coordinate gradient clip
pub const UMAP_GRADIENT_CLIP: f32 = 4.0;

/// Half-width of the random initial layout
pub const UMAP_INIT_RANGE: f32 = 10.0;

/// Binary-search iterations for the per-point bandwidth
pub const UMAP_BANDWIDTH_ITERATIONS: usize = 64;

/// Tolerance of the per-point bandwidth search
pub const UMAP_BANDWIDTH_TOLERANCE: f32 = 1e-5;

// ============================================================================
// CLUSTERER CONSTANTS
// ============================================================================

/// Cap on lambda (1 / distance) for zero-distance merges
pub const HDBSCAN_LAMBDA_MAX: f64 = 1e10;
