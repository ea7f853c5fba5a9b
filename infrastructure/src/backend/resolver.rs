//! Endpoint resolver: ordered candidate probing
//!
//! The resolver tries the candidates of one logical operation strictly in
//! caller-declared order, one request per candidate, and accepts the first
//! response that is transport-successful, 2xx, valid JSON, and decodes as
//! the shape the operation expects. It returns on first acceptance — later
//! candidates are never tried — and makes exactly one pass: no retry or
//! backoff within a candidate. On exhaustion it returns
//! [`BackendError::Exhausted`] carrying every attempt in order.

use super::candidates::{GetCandidate, PostCandidate};
use super::error::{Attempt, AttemptOutcome, BackendError, Result};
use serde_json::Value;
use tracing::{debug, trace};

/// Probes endpoint candidates against one backend base origin.
#[derive(Debug, Clone)]
pub struct EndpointResolver {
    client: reqwest::Client,
    base_url: String,
}

impl EndpointResolver {
    /// `base_url` is the resolved backend origin, e.g.
    /// `http://localhost:8000/api`. A trailing slash is tolerated.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Resolve a POST operation against its candidate family.
    ///
    /// `decode` is the operation's shape check: `None` means "2xx JSON but
    /// not what this operation expects", which is recorded and the next
    /// candidate tried.
    pub async fn post_json<T>(
        &self,
        candidates: &[PostCandidate],
        decode: impl Fn(&Value) -> Option<T>,
    ) -> Result<T> {
        let mut attempts = Vec::new();

        for candidate in candidates {
            let label = candidate.describe();
            trace!(candidate = %label, "attempting candidate");

            let mut request = self.client.post(self.url(candidate.path));
            if !candidate.query.is_empty() {
                request = request.query(&candidate.query);
            }
            if let Some(body) = &candidate.body {
                request = request.json(body);
            }

            match self.accept(label, request.send().await, &decode).await {
                Ok(value) => return Ok(value),
                Err(attempt) => attempts.push(attempt),
            }
        }

        Err(BackendError::Exhausted { attempts })
    }

    /// Resolve a GET operation against its candidate family.
    pub async fn get_json<T>(
        &self,
        candidates: &[GetCandidate],
        decode: impl Fn(&Value) -> Option<T>,
    ) -> Result<T> {
        let mut attempts = Vec::new();

        for candidate in candidates {
            let label = candidate.describe();
            trace!(candidate = %label, "attempting candidate");

            let mut request = self.client.get(self.url(&candidate.path));
            if !candidate.query.is_empty() {
                request = request.query(&candidate.query);
            }

            match self.accept(label, request.send().await, &decode).await {
                Ok(value) => return Ok(value),
                Err(attempt) => attempts.push(attempt),
            }
        }

        Err(BackendError::Exhausted { attempts })
    }

    /// Accept or record one candidate's outcome.
    async fn accept<T>(
        &self,
        label: String,
        sent: std::result::Result<reqwest::Response, reqwest::Error>,
        decode: &impl Fn(&Value) -> Option<T>,
    ) -> std::result::Result<T, Attempt> {
        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                return Err(Attempt {
                    path: label,
                    outcome: AttemptOutcome::Network(e.to_string()),
                });
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                return Err(Attempt {
                    path: label,
                    outcome: AttemptOutcome::Network(e.to_string()),
                });
            }
        };

        if !status.is_success() {
            return Err(Attempt {
                path: label,
                outcome: AttemptOutcome::Status {
                    status: status.as_u16(),
                    body: text,
                },
            });
        }

        let data = match serde_json::from_str::<Value>(&text) {
            Ok(data) => data,
            Err(e) => {
                return Err(Attempt {
                    path: label,
                    outcome: AttemptOutcome::InvalidJson(e.to_string()),
                });
            }
        };

        match decode(&data) {
            Some(value) => {
                debug!(candidate = %label, "candidate accepted");
                Ok(value)
            }
            None => Err(Attempt {
                path: label,
                outcome: AttemptOutcome::Shape { raw: text },
            }),
        }
    }
}
