//! Main HTTP gateway server.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use tracing::info;

use voxnote_config::VoxConfig;
use voxnote_pipeline::MemoPipeline;

use crate::upload;

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub pipeline: Arc<MemoPipeline>,
    pub upload_dir: PathBuf,
    pub allowed_extensions: Vec<String>,
}

impl GatewayState {
    pub fn new(config: &VoxConfig, pipeline: Arc<MemoPipeline>) -> Self {
        Self {
            pipeline,
            upload_dir: PathBuf::from(&config.server.upload_dir),
            allowed_extensions: config.server.allowed_extensions.clone(),
        }
    }
}

/// Starts the Axum HTTP server for the gateway.
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = Router::new()
        .route("/", post(upload::receive_memo))
        .route("/api/health", get(health))
        .with_state(state);

    info!("Gateway HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
