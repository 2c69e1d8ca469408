use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use crate::application::{CompletionClient, UpstreamForwarder};
use crate::domain::{ChatError, GenerationConfig};

/// [`CompletionClient`] that answers with a canned reply (or a forced
/// transport failure) without any network activity. Records call count and
/// the most recent prompt for assertions.
pub struct MockCompletionClient {
    reply: String,
    fail: bool,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl MockCompletionClient {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            fail: false,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// A client whose every call fails at the transport level.
    pub fn failing() -> Self {
        Self {
            reply: String::new(),
            fail: true,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok().and_then(|p| p.clone())
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(
        &self,
        prompt: &str,
        _config: &GenerationConfig,
    ) -> Result<String, ChatError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }
        if self.fail {
            return Err(ChatError::transport("mock transport failure"));
        }
        Ok(self.reply.clone())
    }
}

/// [`UpstreamForwarder`] that relays a canned `generateContent`-shaped body
/// (or fails), so the proxy endpoint can be exercised without an API key.
pub struct MockForwarder {
    reply: String,
    fail: bool,
    calls: AtomicUsize,
}

impl MockForwarder {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: String::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UpstreamForwarder for MockForwarder {
    async fn forward(&self, _payload: &serde_json::Value) -> Result<serde_json::Value, ChatError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ChatError::transport("mock upstream failure"));
        }
        Ok(json!({
            "candidates": [{"content": {"parts": [{"text": self.reply}]}}]
        }))
    }
}
