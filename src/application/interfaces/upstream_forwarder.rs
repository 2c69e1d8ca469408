use async_trait::async_trait;

use crate::domain::ChatError;

/// Outbound seam of the proxy endpoint: forwards a client payload to the
/// generation backend and relays the raw JSON response.
///
/// The payload is deliberately opaque — the forwarder performs no schema
/// validation and holds no per-caller state; every call is independent.
#[async_trait]
pub trait UpstreamForwarder: Send + Sync {
    async fn forward(&self, payload: &serde_json::Value)
        -> Result<serde_json::Value, ChatError>;
}
