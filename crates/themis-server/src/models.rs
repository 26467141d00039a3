//! Request and response bodies

use serde::{Deserialize, Serialize};

/// `POST /search` body
///
/// Every field is optional at the JSON level so that a missing `query`
/// is reported as a 400 with a message rather than a schema error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    /// Free-text query
    pub query: Option<String>,
    /// Maximum number of hits
    pub limit: Option<i64>,
    /// Restrict to one code (`code_parent`)
    pub code_id: Option<String>,
}

/// `POST /clusters_for_articles` body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClustersRequest {
    /// Article ids to look up
    pub article_ids: Option<Vec<String>>,
}

/// `GET /health` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`
    pub status: String,
    /// Collection served
    pub collection: String,
    /// Points in the collection, absent when unknown
    pub points: Option<u64>,
}

/// Error body shared by every failure response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable reason
    pub error: String,
}

impl ErrorBody {
    /// Create a body
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
