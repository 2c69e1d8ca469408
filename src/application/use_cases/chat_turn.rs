use std::sync::Arc;

use tracing::{info, warn};

use crate::application::interfaces::CompletionClient;
use crate::application::use_cases::prompt::build_support_prompt;
use crate::domain::{
    ChatError, ChatMessage, GenerationConfig, Sender, Transcript, TurnOutcome, TurnState,
};

/// Fixed reply shown for any failed turn. Error detail never reaches the
/// transcript; it is logged at this boundary instead.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Drives one request/response cycle per user-initiated turn.
///
/// The session owns the transcript exclusively and appends to it only here,
/// so transcript order always reflects send order: the user message is
/// appended before the request is issued, the bot message after the reply
/// (or failure) arrives.
///
/// At most one turn is in flight at a time. [`ChatSession::submit`] takes
/// `&mut self`, so a second submission cannot interleave with one being
/// awaited; on top of that, submission is a no-op unless the session is
/// [`TurnState::Idle`] and the trimmed input is non-empty. Callers that
/// expose a send affordance should consult [`ChatSession::can_submit`] and
/// disable it while a reply is pending.
pub struct ChatSession {
    client: Arc<dyn CompletionClient>,
    config: GenerationConfig,
    transcript: Transcript,
    state: TurnState,
    last_outcome: Option<TurnOutcome>,
}

impl ChatSession {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            config: GenerationConfig::default(),
            transcript: Transcript::new(),
            state: TurnState::Idle,
            last_outcome: None,
        }
    }

    pub fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn last_outcome(&self) -> Option<TurnOutcome> {
        self.last_outcome
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Whether `submit` would start a turn for this input.
    pub fn can_submit(&self, user_text: &str) -> bool {
        self.state.accepts_submission() && !user_text.trim().is_empty()
    }

    /// Run one full turn: append the user message, request a completion,
    /// and append the bot reply (or the fixed fallback on failure).
    ///
    /// Returns the appended bot message, or `None` when the submission was
    /// rejected by the gating contract (empty input or a turn already in
    /// flight) — in that case nothing is appended and no request is issued.
    pub async fn submit(&mut self, user_text: &str) -> Option<&ChatMessage> {
        if !self.can_submit(user_text) {
            return None;
        }

        let text = user_text.trim().to_string();
        self.transcript.push(ChatMessage::new(&text, Sender::User));
        self.state = TurnState::Sending;

        let prompt = build_support_prompt(&text);
        self.state = TurnState::AwaitingReply;
        let result = self.client.complete(&prompt, &self.config).await;

        self.complete_turn(result);
        self.transcript.last()
    }

    /// Record the turn result and return the session to `Idle`.
    fn complete_turn(&mut self, result: Result<String, ChatError>) {
        match result {
            Ok(reply) => {
                info!("Turn completed ({} chars)", reply.len());
                self.transcript
                    .push(ChatMessage::new(reply.trim(), Sender::Bot));
                self.state = TurnState::Done;
                self.last_outcome = Some(TurnOutcome::Replied);
            }
            Err(e) => {
                warn!("Turn failed: {e}");
                self.transcript
                    .push(ChatMessage::new(FALLBACK_REPLY, Sender::Bot));
                self.state = TurnState::Failed;
                self.last_outcome = Some(TurnOutcome::Failed);
            }
        }
        // Completed states are transient; submission re-opens immediately.
        self.state = TurnState::Idle;
    }
}
