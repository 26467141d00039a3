//! # Themis HTTP API
//!
//! | Route | Auth | Description |
//! |-------|------|-------------|
//! | `POST /search` | API key | Semantic search, optionally within one code |
//! | `POST /clusters_for_articles` | API key | Dominant cluster per article |
//! | `GET /health` | none | Collection size check |
//!
//! Errors are JSON bodies `{"error": "..."}` for every status, including
//! the ones Rocket produces itself (malformed bodies, unknown routes).

pub mod auth;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;

pub use auth::{ApiKey, ApiKeyConfig};
pub use error::ApiError;
pub use handlers::ApiState;
pub use routes::api_rocket;
pub use server::run_server;
