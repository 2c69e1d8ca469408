pub mod application;
pub mod connector;
pub mod domain;

pub use application::{
    build_support_prompt, ChatSession, CompletionClient, UpstreamForwarder, FALLBACK_REPLY,
};

pub use connector::{
    create_router, start_server, AppState, GeminiForwarder, MockCompletionClient, MockForwarder,
    ProxyCompletionClient, DEFAULT_SERVER_URL, DEFAULT_UPSTREAM_URL,
};

pub use domain::{
    ChatError, ChatMessage, GenerationConfig, Sender, Transcript, TurnOutcome, TurnState,
};
