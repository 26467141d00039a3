//! Server entry point

use std::sync::Arc;

use themis_domain::error::{Error, Result};
use themis_infrastructure::AppContext;
use tracing::info;

use crate::auth::ApiKeyConfig;
use crate::handlers::ApiState;
use crate::routes::api_rocket;

/// Serve the API until Rocket shuts down (Ctrl+C or SIGTERM)
///
/// Refuses to start without `server.api_key`.
pub async fn run_server(context: &AppContext) -> Result<()> {
    let server = &context.config.server;
    let auth = Arc::new(ApiKeyConfig::from_server_config(server)?);

    let figment = rocket::Config::figment()
        .merge(("address", server.address.clone()))
        .merge(("port", server.port));
    let rocket = api_rocket(ApiState::from_context(context), auth).configure(figment);

    info!(address = %server.address, port = server.port, "HTTP API listening");
    rocket
        .launch()
        .await
        .map_err(|e| Error::internal(format!("Rocket launch failed: {e}")))?;
    Ok(())
}
