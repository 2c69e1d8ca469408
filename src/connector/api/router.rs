use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use tracing::{info, warn};

use crate::application::UpstreamForwarder;

use super::static_files::serve_static;

/// Message body of the synthesized 500 envelope. Upstream error detail is
/// logged server-side, never relayed to the widget.
const PROXY_ERROR_MESSAGE: &str = "Failed to get response from AI service";

#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<dyn UpstreamForwarder>,
    pub static_root: PathBuf,
}

impl AppState {
    pub fn new(forwarder: Arc<dyn UpstreamForwarder>, static_root: impl Into<PathBuf>) -> Self {
        Self {
            forwarder,
            static_root: static_root.into(),
        }
    }
}

/// `POST /api/chat` handles the proxy round trip; every other path falls
/// through to the static file handler.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(proxy_chat))
        .fallback(serve_static)
        .with_state(state)
}

/// Forward the client payload to the upstream API and relay the raw JSON
/// body. The payload shape is not validated here — the extraction contract
/// belongs to the client side of the proxy.
async fn proxy_chat(State(state): State<AppState>, Json(payload): Json<serde_json::Value>) -> Response {
    match state.forwarder.forward(&payload).await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => {
            warn!("Proxying chat request failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": PROXY_ERROR_MESSAGE })),
            )
                .into_response()
        }
    }
}

/// Bind `addr` and serve the router until the process ends.
pub async fn start_server(addr: SocketAddr, state: AppState) -> Result<()> {
    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    info!("Customer support chat server running at http://{local_addr}");
    axum::serve(listener, router).await?;
    Ok(())
}
