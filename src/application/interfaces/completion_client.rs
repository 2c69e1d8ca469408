use async_trait::async_trait;

use crate::domain::{ChatError, GenerationConfig};

/// An interface for sending a prompt to a completion backend and receiving
/// the reply text.
///
/// Implementors encapsulate transport, serialization, and response
/// extraction.  Consumers (e.g. [`crate::application::ChatSession`]) remain
/// decoupled from any particular API or HTTP client library.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send `prompt` with the given sampling parameters and return the
    /// reply text, trimmed of surrounding whitespace.
    async fn complete(&self, prompt: &str, config: &GenerationConfig)
        -> Result<String, ChatError>;
}
