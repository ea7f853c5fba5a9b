//! Argument strength score and detected fallacies
//!
//! Both are sticky: a chat turn that carries no score (or fallacy list)
//! leaves the previously stored one unchanged.

use serde::{Deserialize, Serialize};

/// Strength score in `[0, 100]` with ordered textual justifications
/// (Value Object)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    value: f64,
    reasons: Vec<String>,
}

impl Score {
    /// Build a score, clamping the value to the closed range `[0, 100]`.
    ///
    /// The backend is not trusted to stay in range; re-validation happens
    /// here so every stored score is displayable as-is.
    pub fn new(value: f64, reasons: Vec<String>) -> Self {
        Self {
            value: value.clamp(0.0, 100.0),
            reasons,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// First justification, if the backend provided any.
    pub fn primary_reason(&self) -> Option<&str> {
        self.reasons.first().map(String::as_str)
    }
}

/// A rhetorical fallacy flagged by the backend (Value Object)
///
/// Only `label` is guaranteed; the remaining fields are optional decoration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fallacy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why: Option<String>,
}

impl Fallacy {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            code: None,
            label: label.into(),
            emoji: None,
            why: None,
        }
    }
}
