//! Session domain entities

use crate::session::mode::Mode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque backend-issued session identifier (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An active session with the coach backend (Entity)
///
/// Sessions are replaced, never mutated: a mode switch creates a new
/// session and the old one is simply abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub mode: Mode,
}

impl Session {
    pub fn new(id: impl Into<String>, mode: Mode) -> Self {
        Self {
            id: SessionId::new(id),
            mode,
        }
    }
}

/// Session lifecycle phase
///
/// `NoSession → Starting → Active`; `Active → Starting` on a mode switch;
/// `Starting → NoSession` when creation fails with no previous session to
/// fall back to. Failure transitions never auto-retry; the next
/// user-triggered action re-enters `Starting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    NoSession,
    Starting,
    Active,
}

impl Default for SessionPhase {
    fn default() -> Self {
        SessionPhase::NoSession
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_is_opaque_string() {
        let id = SessionId::new("abc123");
        assert_eq!(id.as_str(), "abc123");
        assert_eq!(id.to_string(), "abc123");
    }

    #[test]
    fn test_session_construction() {
        let session = Session::new("abc123", Mode::DebateCounter);
        assert_eq!(session.id, SessionId::new("abc123"));
        assert_eq!(session.mode, Mode::DebateCounter);
    }
}
