//! Error types for the backend adapter

use std::fmt;
use thiserror::Error;

/// Result type alias for backend operations
pub type Result<T> = std::result::Result<T, BackendError>;

/// How one endpoint candidate failed.
#[derive(Debug, Clone)]
pub enum AttemptOutcome {
    /// The request could not be sent or the response never arrived.
    Network(String),
    /// The backend answered with a non-2xx status; `body` is the raw
    /// response text, kept verbatim for diagnostics.
    Status { status: u16, body: String },
    /// 2xx, but the body was not valid JSON.
    InvalidJson(String),
    /// 2xx and valid JSON, but not the shape this operation expects; the
    /// raw body is kept for diagnostics.
    Shape { raw: String },
}

/// One recorded candidate attempt, in the order it was made.
#[derive(Debug, Clone)]
pub struct Attempt {
    pub path: String,
    pub outcome: AttemptOutcome,
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            AttemptOutcome::Network(err) => write!(f, "{} -> network error: {}", self.path, err),
            AttemptOutcome::Status { status, body } => {
                write!(f, "{} -> HTTP {}: {}", self.path, status, body)
            }
            AttemptOutcome::InvalidJson(err) => {
                write!(f, "{} -> invalid JSON: {}", self.path, err)
            }
            AttemptOutcome::Shape { raw } => {
                write!(f, "{} -> unexpected shape: {}", self.path, raw)
            }
        }
    }
}

/// Errors that can occur when talking to the coach backend
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Invalid backend base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Every candidate for an operation was attempted and failed. The
    /// attempts are kept in order so the diagnostics show exactly what was
    /// tried, with what status and body.
    #[error("all {} endpoint candidate(s) failed:\n{}", .attempts.len(), format_attempts(.attempts))]
    Exhausted { attempts: Vec<Attempt> },
}

fn format_attempts(attempts: &[Attempt]) -> String {
    attempts
        .iter()
        .map(|a| format!("  {a}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_lists_attempts_in_order() {
        let error = BackendError::Exhausted {
            attempts: vec![
                Attempt {
                    path: "POST /chat".to_string(),
                    outcome: AttemptOutcome::Status {
                        status: 404,
                        body: "Not Found".to_string(),
                    },
                },
                Attempt {
                    path: "POST /message".to_string(),
                    outcome: AttemptOutcome::Network("connection refused".to_string()),
                },
                Attempt {
                    path: "POST /chat {text}".to_string(),
                    outcome: AttemptOutcome::Shape {
                        raw: "{\"ok\":true}".to_string(),
                    },
                },
            ],
        };

        let text = error.to_string();
        let first = text.find("POST /chat ->").unwrap();
        let second = text.find("POST /message").unwrap();
        let third = text.find("unexpected shape").unwrap();
        assert!(first < second && second < third);
        assert!(text.contains("HTTP 404"));
        assert!(text.contains("connection refused"));
    }
}
