//! Route handlers

use std::collections::BTreeMap;
use std::sync::Arc;

use rocket::serde::json::Json;
use rocket::{State, get, post};
use themis_application::use_cases::{ClusterAggregator, SearchService};
use themis_domain::constants::SEARCH_DEFAULT_LIMIT;
use themis_domain::ports::providers::VectorStore;
use themis_domain::value_objects::SearchHit;
use themis_infrastructure::AppContext;
use tracing::{info, warn};

use crate::auth::ApiKey;
use crate::constants::{HEALTH_DEGRADED, HEALTH_OK};
use crate::error::ApiError;
use crate::models::{ClustersRequest, HealthResponse, SearchRequest};

/// Services shared by every request
#[derive(Clone)]
pub struct ApiState {
    /// Query use case
    pub search: Arc<SearchService>,
    /// Document-to-cluster use case
    pub aggregator: Arc<ClusterAggregator>,
    /// Store queried by the health route
    pub vector_store: Arc<dyn VectorStore>,
    /// Collection served
    pub collection: String,
}

impl ApiState {
    /// Take the services out of an application context
    pub fn from_context(context: &AppContext) -> Self {
        Self {
            search: context.search_service(),
            aggregator: context.cluster_aggregator(),
            vector_store: context.vector_store(),
            collection: context.collection().to_string(),
        }
    }
}

/// Semantic search over the chunk index
#[post("/search", data = "<request>")]
pub async fn search(
    _auth: ApiKey,
    state: &State<ApiState>,
    request: Json<SearchRequest>,
) -> Result<Json<Vec<SearchHit>>, ApiError> {
    let request = request.into_inner();
    let query = request
        .query
        .ok_or_else(|| ApiError::bad_request("Missing 'query' field"))?;
    let limit = request
        .limit
        .unwrap_or(SEARCH_DEFAULT_LIMIT as i64);

    let hits = state
        .search
        .search(&query, limit, request.code_id.as_deref())
        .await?;
    info!(limit, code = ?request.code_id, hits = hits.len(), "Search served");
    Ok(Json(hits))
}

/// Dominant cluster of each requested article
#[post("/clusters_for_articles", data = "<request>")]
pub async fn clusters_for_articles(
    _auth: ApiKey,
    state: &State<ApiState>,
    request: Json<ClustersRequest>,
) -> Result<Json<BTreeMap<String, i64>>, ApiError> {
    let article_ids = request
        .into_inner()
        .article_ids
        .ok_or_else(|| ApiError::bad_request("Missing 'article_ids' field"))?;

    let clusters = state.aggregator.dominant_clusters(&article_ids).await?;
    info!(
        requested = article_ids.len(),
        found = clusters.len(),
        "Cluster lookup served"
    );
    Ok(Json(clusters))
}

/// Unauthenticated liveness check reporting the collection size
#[get("/health")]
pub async fn health(state: &State<ApiState>) -> Json<HealthResponse> {
    let (status, points) = match state.vector_store.count(&state.collection).await {
        Ok(points) => (HEALTH_OK, points),
        Err(e) => {
            warn!(error = %e, collection = %state.collection, "Health check failed");
            (HEALTH_DEGRADED, None)
        }
    };
    Json(HealthResponse {
        status: status.to_string(),
        collection: state.collection.clone(),
        points,
    })
}
