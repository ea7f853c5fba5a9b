//! Conversational mode value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Conversational style selector (Value Object)
///
/// The backend recognizes exactly two modes. The wire identifiers are part
/// of the external contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Stress-test a claim: the coach generates counters, pros/cons, sources.
    DebateCounter,
    /// Test a pitch: the coach produces objections and an overall score.
    PitchObjections,
}

impl Mode {
    /// Wire identifier used in requests and config files
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::DebateCounter => "debate_counter",
            Mode::PitchObjections => "pitch_objections",
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::DebateCounter
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = DomainError;

    /// Accepts the wire identifiers plus short CLI aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debate_counter" | "debate" => Ok(Mode::DebateCounter),
            "pitch_objections" | "pitch" => Ok(Mode::PitchObjections),
            other => Err(DomainError::UnknownMode(other.to_string())),
        }
    }
}
