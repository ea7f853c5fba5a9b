//! Pure session/UI state machine
//!
//! [`CoachState`] is the single state container behind the client: session
//! lifecycle, conversation log, argument board, and score. All mutation goes
//! through [`CoachState::apply`] — one named transition per external event,
//! a pure function from `(state, event)` to the next state — so the ordering
//! and reset guarantees are testable without any I/O.
//!
//! Discarding stale responses from superseded session-affecting calls is the
//! caller's job (the application-layer generation guard); by the time an
//! event reaches `apply`, it is authoritative.

use crate::board::Board;
use crate::conversation::{Conversation, Turn};
use crate::score::{Fallacy, Score};
use crate::session::{Session, SessionPhase};
use serde::{Deserialize, Serialize};

/// Everything the presentation layer renders, in one place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoachState {
    pub phase: SessionPhase,
    pub session: Option<Session>,
    pub conversation: Conversation,
    pub board: Board,
    pub score: Option<Score>,
    pub fallacies: Vec<Fallacy>,
}

/// One external event, one named transition.
#[derive(Debug, Clone, PartialEq)]
pub enum StateEvent {
    /// A session-creation call was issued.
    SessionStarting,
    /// A session-creation call succeeded. Resets conversation, board, score,
    /// and fallacies to their initial empty state.
    SessionCreated(Session),
    /// Every candidate of a session-creation call failed. Falls back to the
    /// previous session if one exists, otherwise to `NoSession`.
    SessionFailed,
    /// The user submitted a (non-empty) message; appended optimistically
    /// before the network answers it.
    UserTurnSent(String),
    /// The chat call resolved — with the server reply on success, with a
    /// visible error indicator on total failure. Either way the conversation
    /// stays consistent: every user turn gets exactly one answer.
    AssistantTurnReceived(String),
    /// A board refresh completed; the mapping is replaced wholesale.
    /// A failed refresh arrives as `Board::empty()`, never as a stale
    /// snapshot.
    BoardRefreshed(Board),
    /// The chat response carried a numeric score.
    ScoreUpdated(Score),
    /// The chat response flagged fallacies.
    FallaciesObserved(Vec<Fallacy>),
}

impl CoachState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a chat or board operation may be attempted at all.
    pub fn has_active_session(&self) -> bool {
        self.phase == SessionPhase::Active && self.session.is_some()
    }

    /// Apply one event, producing the next state.
    pub fn apply(self, event: StateEvent) -> Self {
        match event {
            StateEvent::SessionStarting => Self {
                phase: SessionPhase::Starting,
                ..self
            },
            StateEvent::SessionCreated(session) => Self {
                phase: SessionPhase::Active,
                session: Some(session),
                conversation: Conversation::new(),
                board: Board::empty(),
                score: None,
                fallacies: Vec::new(),
            },
            StateEvent::SessionFailed => {
                let phase = if self.session.is_some() {
                    SessionPhase::Active
                } else {
                    SessionPhase::NoSession
                };
                Self { phase, ..self }
            }
            StateEvent::UserTurnSent(text) => self.with_turn(Turn::user(text)),
            StateEvent::AssistantTurnReceived(text) => self.with_turn(Turn::assistant(text)),
            StateEvent::BoardRefreshed(board) => Self { board, ..self },
            StateEvent::ScoreUpdated(score) => Self {
                score: Some(score),
                ..self
            },
            StateEvent::FallaciesObserved(fallacies) => Self { fallacies, ..self },
        }
    }

    fn with_turn(mut self, turn: Turn) -> Self {
        self.conversation.push(turn);
        self
    }
}
