//! Backend gateway port
//!
//! Defines the interface for talking to the coach backend. The contract is
//! deliberately narrow: three logical operations, each of which the
//! infrastructure adapter resolves against an uncertain endpoint surface.

use async_trait::async_trait;
use coach_domain::{Board, Fallacy, Mode, Score, SessionId};
use thiserror::Error;

/// Errors that can occur during backend gateway operations
///
/// The variants mirror the failure taxonomy the controller cares about:
/// the request never made it (`Network`), the backend said no (`Protocol`),
/// the backend said yes but the payload was unusable (`Shape`), or every
/// candidate of an operation was tried and failed (`Exhausted`, with the
/// per-attempt diagnostics already formatted in order).
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Network failure: {0}")]
    Network(String),

    #[error("Backend returned {status}: {body}")]
    Protocol { status: u16, body: String },

    #[error("Unusable response shape: {0}")]
    Shape(String),

    #[error("All endpoint candidates failed:\n{0}")]
    Exhausted(String),
}

/// Result of one resolved chat turn
///
/// `score` and `fallacies` are opportunistic: the backend includes them when
/// it has something to say, and their absence means "no update".
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub text: String,
    pub score: Option<Score>,
    pub fallacies: Vec<Fallacy>,
}

/// Gateway to the coach backend
///
/// This port defines how the application layer reaches the backend.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// Create a new session in the given mode.
    async fn create_session(&self, mode: Mode) -> Result<SessionId, GatewayError>;

    /// Send one user message and get the assistant reply.
    async fn send_chat(&self, session: &SessionId, text: &str)
    -> Result<ChatReply, GatewayError>;

    /// Fetch the full PRO/CON/SOURCES board for a session.
    async fn fetch_board(&self, session: &SessionId) -> Result<Board, GatewayError>;
}
