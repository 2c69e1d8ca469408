use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::application::UpstreamForwarder;
use crate::domain::ChatError;

pub const DEFAULT_UPSTREAM_URL: &str = "https://generativelanguage.googleapis.com";
const GENERATE_PATH_PREFIX: &str = "/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Stateless forwarder to the Gemini `generateContent` endpoint.
///
/// Forwards each payload unmodified and relays the raw JSON body back.
/// The API key is injected via configuration and appended as a query
/// parameter the way the endpoint expects; it is kept out of every log line.
pub struct GeminiForwarder {
    client: reqwest::Client,
    /// Full endpoint URL including the key query parameter.
    url: String,
    /// Key-free rendition of the URL, safe for logs and errors.
    display_url: String,
}

impl GeminiForwarder {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        let model: String = model.into();
        let endpoint = format!(
            "{}{GENERATE_PATH_PREFIX}/{model}:generateContent",
            base.trim_end_matches('/')
        );
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            url: format!("{endpoint}?key={}", api_key.into()),
            display_url: endpoint,
        }
    }

    /// Construct from environment variables:
    ///
    /// | Variable          | Default                                      |
    /// |-------------------|----------------------------------------------|
    /// | `GEMINI_API_KEY`  | required                                     |
    /// | `GEMINI_MODEL`    | `gemini-2.0-flash`                           |
    /// | `GEMINI_BASE_URL` | `https://generativelanguage.googleapis.com`  |
    pub fn from_env() -> Result<Self, ChatError> {
        let key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| ChatError::invalid_input("GEMINI_API_KEY is not set"))?;
        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base = std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string());
        Ok(Self::new(key, model, base))
    }

    /// Endpoint without the key, for logging.
    pub fn display_url(&self) -> &str {
        &self.display_url
    }
}

#[async_trait]
impl UpstreamForwarder for GeminiForwarder {
    async fn forward(&self, payload: &serde_json::Value) -> Result<serde_json::Value, ChatError> {
        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                ChatError::transport(format!("request to {} failed: {e}", self.display_url))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Upstream API returned {status}: {body}");
            return Err(ChatError::transport(format!(
                "upstream API returned {status}"
            )));
        }

        response.json().await.map_err(|e| {
            ChatError::transport(format!("upstream response body is not JSON: {e}"))
        })
    }
}
