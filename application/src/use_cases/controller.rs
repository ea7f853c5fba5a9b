//! Session controller use case
//!
//! [`CoachController`] owns the single active-session slot and drives every
//! user action through the pure [`CoachState`] reducer: ensure a session,
//! append the user turn optimistically, resolve the chat call, fold the
//! reply / score / fallacies back in, then refresh the argument board.
//!
//! # Generation guard
//!
//! Session-affecting calls are stamped with a monotonically increasing
//! generation counter *before* their first await. A response whose stamp is
//! no longer current — because a newer session-affecting call was issued in
//! the meantime — is discarded wholesale, so an out-of-order mode switch can
//! never clobber a later one, and a chat reply addressed to an abandoned
//! session never reaches the conversation.

use crate::ports::backend_gateway::{BackendGateway, GatewayError};
use coach_domain::{Board, CoachState, Mode, Session, SessionId, StateEvent};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// What happened to one `send` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Empty input or no active session: no turn appended, no request issued.
    Ignored,
    /// The backend answered; an assistant turn with the reply was appended.
    Replied,
    /// Every chat candidate failed; an assistant turn with a visible error
    /// indicator was appended instead.
    Failed,
    /// A mode switch superseded this call while it was in flight; the
    /// response was discarded.
    Superseded,
}

/// Drives sessions, conversation, score, and board against a gateway.
pub struct CoachController<G: BackendGateway> {
    gateway: Arc<G>,
    state: Mutex<CoachState>,
    generation: AtomicU64,
}

impl<G: BackendGateway> CoachController<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            state: Mutex::new(CoachState::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state for rendering.
    pub fn state(&self) -> CoachState {
        self.state.lock().unwrap().clone()
    }

    /// Create a fresh session in `mode`, resetting conversation, board, and
    /// score on success.
    ///
    /// On total failure the previous session (if any) stays intact and the
    /// error is returned to the caller — creation failures are user-visible
    /// and blocking, never retried automatically.
    pub async fn new_session(&self, mode: Mode) -> Result<(), GatewayError> {
        // Bump before the first await: this call now owns the session slot.
        let stamp = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.apply(StateEvent::SessionStarting);

        let result = self.gateway.create_session(mode).await;

        if !self.is_current(stamp) {
            debug!(generation = stamp, "discarding stale session response");
            return Ok(());
        }

        match result {
            Ok(id) => {
                debug!(session = %id, %mode, "session created");
                self.apply(StateEvent::SessionCreated(Session {
                    id,
                    mode,
                }));
                Ok(())
            }
            Err(e) => {
                warn!(%mode, error = %e, "session creation failed");
                self.apply(StateEvent::SessionFailed);
                Err(e)
            }
        }
    }

    /// Switch conversational mode: a clean session plus a board refresh.
    /// Nothing carries over from the previous mode.
    pub async fn switch_mode(&self, mode: Mode) -> Result<(), GatewayError> {
        self.new_session(mode).await?;
        self.refresh_board().await;
        Ok(())
    }

    /// Submit one user message.
    ///
    /// The user turn is appended synchronously before any await, so the
    /// conversation order reflects invocation order, not response arrival
    /// order. Every accepted user turn gets exactly one assistant turn in
    /// response — the server reply on success, a visible error indicator on
    /// total failure. Errors never escape this boundary.
    pub async fn send(&self, text: &str) -> SendOutcome {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return SendOutcome::Ignored;
        }

        let Some(session_id) = self.active_session_id() else {
            warn!("send ignored: no active session");
            return SendOutcome::Ignored;
        };

        let stamp = self.generation.load(Ordering::SeqCst);
        self.apply(StateEvent::UserTurnSent(trimmed.to_string()));

        let result = self.gateway.send_chat(&session_id, trimmed).await;

        if !self.is_current(stamp) {
            debug!(generation = stamp, "discarding chat response for abandoned session");
            return SendOutcome::Superseded;
        }

        let outcome = match result {
            Ok(reply) => {
                self.apply(StateEvent::AssistantTurnReceived(reply.text));
                if let Some(score) = reply.score {
                    self.apply(StateEvent::ScoreUpdated(score));
                }
                if !reply.fallacies.is_empty() {
                    self.apply(StateEvent::FallaciesObserved(reply.fallacies));
                }
                SendOutcome::Replied
            }
            Err(e) => {
                debug!(error = %e, "chat turn failed");
                self.apply(StateEvent::AssistantTurnReceived(format!(
                    "⚠️ Chat failed: {e}"
                )));
                SendOutcome::Failed
            }
        };

        // Board refresh runs after every resolved turn, success or failure.
        self.refresh_board().await;
        outcome
    }

    /// Refresh the argument board for the active session.
    ///
    /// Success replaces the whole mapping; total failure degrades to the
    /// explicit empty board (logged at debug, never surfaced) — a failed
    /// refresh must not leave a stale snapshot displayed as current.
    pub async fn refresh_board(&self) {
        let Some(session_id) = self.active_session_id() else {
            return;
        };

        let stamp = self.generation.load(Ordering::SeqCst);
        let result = self.gateway.fetch_board(&session_id).await;

        if !self.is_current(stamp) {
            debug!(generation = stamp, "discarding board response for abandoned session");
            return;
        }

        let board = match result {
            Ok(board) => board,
            Err(e) => {
                debug!(session = %session_id, error = %e, "board refresh failed, degrading to empty");
                Board::empty()
            }
        };
        self.apply(StateEvent::BoardRefreshed(board));
    }

    fn active_session_id(&self) -> Option<SessionId> {
        let state = self.state.lock().unwrap();
        if state.has_active_session() {
            state.session.as_ref().map(|s| s.id.clone())
        } else {
            None
        }
    }

    fn is_current(&self, stamp: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == stamp
    }

    fn apply(&self, event: StateEvent) {
        let mut state = self.state.lock().unwrap();
        let next = std::mem::take(&mut *state).apply(event);
        *state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::backend_gateway::ChatReply;
    use async_trait::async_trait;
    use coach_domain::{BoardItem, Score, SessionPhase};
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::Notify;

    /// Mock gateway returning scripted results in order, recording every call
    struct ScriptedGateway {
        sessions: StdMutex<VecDeque<Result<SessionId, GatewayError>>>,
        chats: StdMutex<VecDeque<Result<ChatReply, GatewayError>>>,
        boards: StdMutex<VecDeque<Result<Board, GatewayError>>>,
        calls: StdMutex<Vec<String>>,
    }

    impl ScriptedGateway {
        fn new() -> Self {
            Self {
                sessions: StdMutex::new(VecDeque::new()),
                chats: StdMutex::new(VecDeque::new()),
                boards: StdMutex::new(VecDeque::new()),
                calls: StdMutex::new(Vec::new()),
            }
        }

        fn script_session(&self, result: Result<&str, GatewayError>) {
            self.sessions
                .lock()
                .unwrap()
                .push_back(result.map(SessionId::new));
        }

        fn script_chat(&self, result: Result<ChatReply, GatewayError>) {
            self.chats.lock().unwrap().push_back(result);
        }

        fn script_board(&self, result: Result<Board, GatewayError>) {
            self.boards.lock().unwrap().push_back(result);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }
    }

    fn exhausted() -> GatewayError {
        GatewayError::Exhausted("POST /chat -> 404 Not Found".to_string())
    }

    #[async_trait]
    impl BackendGateway for ScriptedGateway {
        async fn create_session(&self, mode: Mode) -> Result<SessionId, GatewayError> {
            self.record(format!("session:{mode}"));
            self.sessions
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::Network("script exhausted".into())))
        }

        async fn send_chat(
            &self,
            session: &SessionId,
            _text: &str,
        ) -> Result<ChatReply, GatewayError> {
            self.record(format!("chat:{session}"));
            self.chats
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::Network("script exhausted".into())))
        }

        async fn fetch_board(&self, session: &SessionId) -> Result<Board, GatewayError> {
            self.record(format!("board:{session}"));
            self.boards
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Board::empty()))
        }
    }

    fn reply(text: &str) -> ChatReply {
        ChatReply {
            text: text.to_string(),
            score: None,
            fallacies: vec![],
        }
    }

    async fn active_controller(gateway: Arc<ScriptedGateway>) -> CoachController<ScriptedGateway> {
        gateway.script_session(Ok("abc123"));
        let controller = CoachController::new(gateway);
        controller.new_session(Mode::DebateCounter).await.unwrap();
        controller
    }

    #[tokio::test]
    async fn test_new_session_starts_clean() {
        let gateway = Arc::new(ScriptedGateway::new());
        let controller = active_controller(gateway).await;

        let state = controller.state();
        assert_eq!(state.phase, SessionPhase::Active);
        assert_eq!(state.session.as_ref().unwrap().id.as_str(), "abc123");
        assert!(state.conversation.is_empty());
        assert!(state.board.is_empty());
        assert!(state.score.is_none());
    }

    #[tokio::test]
    async fn test_switch_mode_resets_and_refreshes_board() {
        let gateway = Arc::new(ScriptedGateway::new());
        let controller = active_controller(gateway.clone()).await;

        gateway.script_chat(Ok(reply("counter one")));
        controller.send("claim").await;
        gateway.script_chat(Ok(ChatReply {
            text: "counter two".into(),
            score: Some(Score::new(40.0, vec![])),
            fallacies: vec![],
        }));
        controller.send("rebuttal").await;
        assert_eq!(controller.state().conversation.len(), 4);

        gateway.script_session(Ok("def456"));
        controller.switch_mode(Mode::PitchObjections).await.unwrap();

        let state = controller.state();
        assert_eq!(state.session.as_ref().unwrap().id.as_str(), "def456");
        assert_eq!(state.session.as_ref().unwrap().mode, Mode::PitchObjections);
        assert_eq!(state.conversation.len(), 0);
        assert!(state.board.is_empty());
        assert!(state.score.is_none());
        // The switch triggered a refresh against the new session.
        assert!(gateway.calls().contains(&"board:def456".to_string()));
    }

    #[tokio::test]
    async fn test_blank_input_is_a_noop() {
        let gateway = Arc::new(ScriptedGateway::new());
        let controller = active_controller(gateway.clone()).await;
        let calls_before = gateway.calls().len();

        assert_eq!(controller.send("").await, SendOutcome::Ignored);
        assert_eq!(controller.send("   ").await, SendOutcome::Ignored);

        assert_eq!(controller.state().conversation.len(), 0);
        assert_eq!(gateway.calls().len(), calls_before);
    }

    #[tokio::test]
    async fn test_send_without_session_is_a_noop() {
        let gateway = Arc::new(ScriptedGateway::new());
        let controller = CoachController::new(gateway.clone());

        assert_eq!(controller.send("hello").await, SendOutcome::Ignored);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_reply_with_score_updates_turn_and_score() {
        let gateway = Arc::new(ScriptedGateway::new());
        let controller = active_controller(gateway.clone()).await;

        gateway.script_chat(Ok(ChatReply {
            text: "Rebuttal: consider base rates.".into(),
            score: Some(Score::new(72.0, vec!["strong evidence".into()])),
            fallacies: vec![],
        }));

        assert_eq!(controller.send("my claim").await, SendOutcome::Replied);

        let state = controller.state();
        let turns = state.conversation.turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].text, "my claim");
        assert_eq!(turns[1].text, "Rebuttal: consider base rates.");

        let score = state.score.as_ref().unwrap();
        assert_eq!(score.value(), 72.0);
        assert_eq!(score.primary_reason(), Some("strong evidence"));
    }

    #[tokio::test]
    async fn test_chat_failure_yields_error_turn_and_still_refreshes_board() {
        let gateway = Arc::new(ScriptedGateway::new());
        let controller = active_controller(gateway.clone()).await;

        // Give the score a value first so we can assert it survives.
        gateway.script_chat(Ok(ChatReply {
            text: "ok".into(),
            score: Some(Score::new(50.0, vec![])),
            fallacies: vec![],
        }));
        controller.send("warmup").await;

        gateway.script_chat(Err(exhausted()));
        assert_eq!(controller.send("doomed").await, SendOutcome::Failed);

        let state = controller.state();
        let last = state.conversation.last().unwrap();
        assert!(last.text.contains("⚠️"));
        assert_eq!(state.conversation.len(), 4);
        // Score untouched by the failed turn.
        assert_eq!(state.score.as_ref().unwrap().value(), 50.0);
        // A board refresh was still attempted after the failure.
        let boards = gateway
            .calls()
            .iter()
            .filter(|c| c.starts_with("board:"))
            .count();
        assert!(boards >= 2);
    }

    #[tokio::test]
    async fn test_score_is_sticky_across_scoreless_turns() {
        let gateway = Arc::new(ScriptedGateway::new());
        let controller = active_controller(gateway.clone()).await;

        gateway.script_chat(Ok(ChatReply {
            text: "scored".into(),
            score: Some(Score::new(64.0, vec!["tight logic".into()])),
            fallacies: vec![],
        }));
        controller.send("first").await;

        gateway.script_chat(Ok(reply("no score this time")));
        controller.send("second").await;

        let score = controller.state().score.unwrap();
        assert_eq!(score.value(), 64.0);
        assert_eq!(score.primary_reason(), Some("tight logic"));
    }

    #[tokio::test]
    async fn test_board_failure_degrades_to_empty() {
        let gateway = Arc::new(ScriptedGateway::new());
        let controller = active_controller(gateway.clone()).await;

        gateway.script_board(Ok(Board {
            pro: vec![BoardItem::from_value(json!("a pro point"))],
            ..Board::empty()
        }));
        controller.refresh_board().await;
        assert!(!controller.state().board.is_empty());

        gateway.script_board(Err(exhausted()));
        controller.refresh_board().await;
        // Explicit emptiness, not a stale snapshot.
        assert!(controller.state().board.is_empty());
    }

    #[tokio::test]
    async fn test_board_refresh_is_idempotent() {
        let gateway = Arc::new(ScriptedGateway::new());
        let controller = active_controller(gateway.clone()).await;

        let board = Board {
            con: vec![BoardItem::from_value(json!({"payload": {"text": "weak premise"}}))],
            ..Board::empty()
        };
        gateway.script_board(Ok(board.clone()));
        controller.refresh_board().await;
        let first = controller.state().board;

        gateway.script_board(Ok(board));
        controller.refresh_board().await;
        assert_eq!(controller.state().board, first);
    }

    #[tokio::test]
    async fn test_creation_failure_without_previous_session() {
        let gateway = Arc::new(ScriptedGateway::new());
        gateway.script_session(Err(exhausted()));
        let controller = CoachController::new(gateway);

        let result = controller.new_session(Mode::DebateCounter).await;
        assert!(result.is_err());
        let state = controller.state();
        assert_eq!(state.phase, SessionPhase::NoSession);
        assert!(state.session.is_none());
    }

    #[tokio::test]
    async fn test_creation_failure_keeps_previous_session() {
        let gateway = Arc::new(ScriptedGateway::new());
        let controller = active_controller(gateway.clone()).await;

        gateway.script_session(Err(exhausted()));
        let result = controller.new_session(Mode::PitchObjections).await;

        assert!(result.is_err());
        let state = controller.state();
        assert_eq!(state.phase, SessionPhase::Active);
        assert_eq!(state.session.as_ref().unwrap().id.as_str(), "abc123");
    }

    /// Gateway whose first session call blocks until released, so two
    /// overlapping session-affecting calls can be interleaved on purpose.
    struct GatedGateway {
        release: Notify,
        issued: StdMutex<u32>,
    }

    impl GatedGateway {
        fn new() -> Self {
            Self {
                release: Notify::new(),
                issued: StdMutex::new(0),
            }
        }
    }

    #[async_trait]
    impl BackendGateway for GatedGateway {
        async fn create_session(&self, _mode: Mode) -> Result<SessionId, GatewayError> {
            let call = {
                let mut issued = self.issued.lock().unwrap();
                *issued += 1;
                *issued
            };
            if call == 1 {
                // First call parks until the test releases it.
                self.release.notified().await;
                Ok(SessionId::new("stale-session"))
            } else {
                Ok(SessionId::new("fresh-session"))
            }
        }

        async fn send_chat(
            &self,
            _session: &SessionId,
            _text: &str,
        ) -> Result<ChatReply, GatewayError> {
            Err(GatewayError::Network("unused".into()))
        }

        async fn fetch_board(&self, _session: &SessionId) -> Result<Board, GatewayError> {
            Ok(Board::empty())
        }
    }

    #[tokio::test]
    async fn test_stale_session_response_is_discarded() {
        let gateway = Arc::new(GatedGateway::new());
        let controller = Arc::new(CoachController::new(gateway.clone()));

        let slow = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.new_session(Mode::DebateCounter).await })
        };
        // Let the slow call reach the gateway and park.
        tokio::task::yield_now().await;

        // A newer call wins the session slot immediately.
        controller.new_session(Mode::PitchObjections).await.unwrap();
        assert_eq!(
            controller.state().session.as_ref().unwrap().id.as_str(),
            "fresh-session"
        );

        // Release the stale call; its response must be discarded.
        gateway.release.notify_one();
        slow.await.unwrap().unwrap();

        let state = controller.state();
        assert_eq!(state.session.as_ref().unwrap().id.as_str(), "fresh-session");
        assert_eq!(state.session.as_ref().unwrap().mode, Mode::PitchObjections);
    }
}
