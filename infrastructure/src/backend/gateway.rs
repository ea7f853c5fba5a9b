//! HTTP implementation of the backend gateway port

use super::candidates::{board_candidates, chat_candidates, session_candidates};
use super::error::{AttemptOutcome, BackendError};
use super::protocol;
use super::resolver::EndpointResolver;
use async_trait::async_trait;
use coach_application::ports::backend_gateway::{BackendGateway, ChatReply, GatewayError};
use coach_domain::{Board, Mode, SessionId};

/// Gateway adapter resolving each operation against its candidate family.
pub struct HttpCoachGateway {
    resolver: EndpointResolver,
}

impl HttpCoachGateway {
    /// Build a gateway against `base_url`. The URL is validated up front so
    /// a typo in config fails at startup, not on the first user action.
    pub fn new(client: reqwest::Client, base_url: &str) -> Result<Self, BackendError> {
        reqwest::Url::parse(base_url).map_err(|e| BackendError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            resolver: EndpointResolver::new(client, base_url),
        })
    }
}

#[async_trait]
impl BackendGateway for HttpCoachGateway {
    async fn create_session(&self, mode: Mode) -> Result<SessionId, GatewayError> {
        self.resolver
            .post_json(&session_candidates(mode), protocol::extract_session_id)
            .await
            .map(SessionId::new)
            .map_err(map_error)
    }

    async fn send_chat(
        &self,
        session: &SessionId,
        text: &str,
    ) -> Result<ChatReply, GatewayError> {
        self.resolver
            .post_json(&chat_candidates(session, text), |data| {
                protocol::extract_reply(data).map(|reply| ChatReply {
                    text: reply,
                    score: protocol::extract_score(data),
                    fallacies: protocol::extract_fallacies(data),
                })
            })
            .await
            .map_err(map_error)
    }

    async fn fetch_board(&self, session: &SessionId) -> Result<Board, GatewayError> {
        self.resolver
            .get_json(&board_candidates(session), protocol::extract_board)
            .await
            .map_err(map_error)
    }
}

/// Map the adapter error into the port taxonomy.
///
/// A family that failed on its single attempt collapses to the specific
/// failure kind; anything longer stays an aggregate with the ordered
/// attempt diagnostics already formatted.
fn map_error(err: BackendError) -> GatewayError {
    match err {
        BackendError::InvalidBaseUrl { .. } => GatewayError::Network(err.to_string()),
        BackendError::Exhausted { mut attempts } if attempts.len() == 1 => {
            let attempt = attempts.remove(0);
            match attempt.outcome {
                AttemptOutcome::Network(e) => {
                    GatewayError::Network(format!("{}: {}", attempt.path, e))
                }
                AttemptOutcome::Status { status, body } => {
                    GatewayError::Protocol { status, body }
                }
                AttemptOutcome::InvalidJson(e) => {
                    GatewayError::Shape(format!("{}: invalid JSON: {}", attempt.path, e))
                }
                AttemptOutcome::Shape { raw } => {
                    GatewayError::Shape(format!("{}: {}", attempt.path, raw))
                }
            }
        }
        aggregate @ BackendError::Exhausted { .. } => {
            GatewayError::Exhausted(aggregate.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::error::Attempt;

    #[test]
    fn test_invalid_base_url_rejected_at_construction() {
        let result = HttpCoachGateway::new(reqwest::Client::new(), "not a url");
        assert!(matches!(result, Err(BackendError::InvalidBaseUrl { .. })));

        assert!(HttpCoachGateway::new(reqwest::Client::new(), "http://localhost:8000/api").is_ok());
    }

    #[test]
    fn test_single_attempt_collapses_to_specific_kind() {
        let err = BackendError::Exhausted {
            attempts: vec![Attempt {
                path: "POST /chat {session_id,user_text}".to_string(),
                outcome: AttemptOutcome::Status {
                    status: 404,
                    body: "Session not found".to_string(),
                },
            }],
        };
        match map_error(err) {
            GatewayError::Protocol { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "Session not found");
            }
            other => panic!("expected Protocol, got {other:?}"),
        }
    }

    #[test]
    fn test_multi_attempt_stays_aggregate() {
        let err = BackendError::Exhausted {
            attempts: vec![
                Attempt {
                    path: "POST /chat".to_string(),
                    outcome: AttemptOutcome::Network("refused".to_string()),
                },
                Attempt {
                    path: "POST /message".to_string(),
                    outcome: AttemptOutcome::Status {
                        status: 404,
                        body: "nope".to_string(),
                    },
                },
            ],
        };
        match map_error(err) {
            GatewayError::Exhausted(text) => {
                assert!(text.contains("POST /chat"));
                assert!(text.contains("POST /message"));
            }
            other => panic!("expected Exhausted, got {other:?}"),
        }
    }
}
