use serde::{Deserialize, Serialize};

/// Phase of the single in-flight chat turn.
///
/// Exactly one turn may be in flight per session. `Done` and `Failed` are
/// transient: a completed turn returns the session to `Idle` immediately,
/// so the resting state is always `Idle` and the result of the most recent
/// turn is reported separately as a [`TurnOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    Idle,
    Sending,
    AwaitingReply,
    Done,
    Failed,
}

impl TurnState {
    /// Whether a new turn may begin from this state.
    pub fn accepts_submission(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Result of the most recently completed turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    Replied,
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_idle_accepts_submission() {
        assert!(TurnState::Idle.accepts_submission());
        assert!(!TurnState::Sending.accepts_submission());
        assert!(!TurnState::AwaitingReply.accepts_submission());
        assert!(!TurnState::Done.accepts_submission());
        assert!(!TurnState::Failed.accepts_submission());
    }
}
