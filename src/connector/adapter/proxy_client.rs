use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::application::CompletionClient;
use crate::domain::{ChatError, GenerationConfig};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";
const CHAT_PATH: &str = "/api/chat";

/// `generateContent`-style request payload, built fresh per turn from the
/// latest prompt only — no accumulated history.
#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    contents: Vec<ApiContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: ApiGenerationConfig,
}

#[derive(serde::Serialize)]
struct ApiContent<'a> {
    parts: Vec<ApiPart<'a>>,
}

#[derive(serde::Serialize)]
struct ApiPart<'a> {
    text: &'a str,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiGenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

impl From<&GenerationConfig> for ApiGenerationConfig {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            temperature: config.temperature(),
            top_k: config.top_k(),
            top_p: config.top_p(),
            max_output_tokens: config.max_output_tokens(),
        }
    }
}

/// Minimal subset of the `generateContent` response we care about. Every
/// level is optional so a shape mismatch surfaces as a typed error rather
/// than a deserialization failure.
#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<ApiCandidate>,
}

#[derive(Deserialize)]
struct ApiCandidate {
    content: Option<ApiResponseContent>,
}

#[derive(Deserialize)]
struct ApiResponseContent {
    #[serde(default)]
    parts: Vec<ApiResponsePart>,
}

#[derive(Deserialize)]
struct ApiResponsePart {
    text: Option<String>,
}

/// HTTP implementation of [`CompletionClient`] targeting the local proxy
/// endpoint (`POST /api/chat`).
///
/// The proxy relays the upstream response body unmodified, so this client
/// owns the structural contract with the external API: the reply lives at
/// `candidates[0].content.parts[0].text`.  Any missing step of that path is
/// reported as [`ChatError::UnexpectedShape`]; non-success status, network
/// errors, and non-JSON bodies are [`ChatError::Transport`].
pub struct ProxyCompletionClient {
    client: reqwest::Client,
    url: String,
}

impl ProxyCompletionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{CHAT_PATH}", base.trim_end_matches('/'));
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            url,
        }
    }

    /// Extract the reply text from a relayed `generateContent` response.
    ///
    /// Expects `candidates[0].content.parts[0].text`; returns the text
    /// trimmed of surrounding whitespace.
    fn extract_reply(value: serde_json::Value) -> Result<String, ChatError> {
        let response: ApiResponse = serde_json::from_value(value)
            .map_err(|e| ChatError::unexpected_shape(format!("response is not an object: {e}")))?;

        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .map(|t| t.trim().to_string())
            .ok_or_else(|| {
                ChatError::unexpected_shape("response missing candidates[0].content.parts[0].text")
            })
    }
}

#[async_trait]
impl CompletionClient for ProxyCompletionClient {
    async fn complete(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, ChatError> {
        let request = ApiRequest {
            contents: vec![ApiContent {
                parts: vec![ApiPart { text: prompt }],
            }],
            generation_config: config.into(),
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatError::transport(format!("request to {} failed: {e}", self.url)))?;

        if !response.status().is_success() {
            return Err(ChatError::transport(format!(
                "proxy returned {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ChatError::transport(format!("response body is not JSON: {e}")))?;

        debug!("Proxy response: {body}");
        Self::extract_reply(body)
    }
}
