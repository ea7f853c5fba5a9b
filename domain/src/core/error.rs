//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown mode: {0} (expected 'debate_counter' or 'pitch_objections')")]
    UnknownMode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_mode_display() {
        let error = DomainError::UnknownMode("karaoke".to_string());
        assert!(error.to_string().contains("karaoke"));
        assert!(error.to_string().contains("debate_counter"));
    }
}
