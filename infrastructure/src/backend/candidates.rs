//! Endpoint candidate families
//!
//! One logical operation maps to an ordered list of (path, query, body)
//! candidates. Order matters: the first entry of each family is the shape
//! the reference backend actually serves, so a conforming deployment is hit
//! on the first attempt and never sees probe noise. The remaining entries
//! cover the route/payload variants observed across historical deployments.
//! Candidates exist only inside the resolver; they are never persisted.

use coach_domain::{Mode, SessionId};
use serde_json::{Value, json};

/// One POST (path, query, body-shape) candidate.
#[derive(Debug, Clone)]
pub struct PostCandidate {
    pub path: &'static str,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl PostCandidate {
    /// Diagnostic label: method, path, and the body's top-level keys.
    pub fn describe(&self) -> String {
        let mut label = format!("POST {}", self.path);
        if !self.query.is_empty() {
            let params: Vec<&str> = self.query.iter().map(|(k, _)| *k).collect();
            label.push_str(&format!("?{}", params.join("&")));
        }
        if let Some(Value::Object(map)) = &self.body {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            label.push_str(&format!(" {{{}}}", keys.join(",")));
        }
        label
    }
}

/// One GET (path, query) candidate.
#[derive(Debug, Clone)]
pub struct GetCandidate {
    pub path: String,
    pub query: Vec<(&'static str, String)>,
}

impl GetCandidate {
    pub fn describe(&self) -> String {
        if self.query.is_empty() {
            format!("GET {}", self.path)
        } else {
            let params: Vec<&str> = self.query.iter().map(|(k, _)| *k).collect();
            format!("GET {}?{}", self.path, params.join("&"))
        }
    }
}

/// Session creation: mode as query parameter first, then JSON-body variants.
pub fn session_candidates(mode: Mode) -> Vec<PostCandidate> {
    vec![
        PostCandidate {
            path: "/session",
            query: vec![("mode", mode.as_str().to_string())],
            body: None,
        },
        PostCandidate {
            path: "/session",
            query: vec![],
            body: Some(json!({ "mode": mode.as_str() })),
        },
        PostCandidate {
            path: "/sessions",
            query: vec![],
            body: Some(json!({ "mode": mode.as_str() })),
        },
    ]
}

/// Chat turn: `{session_id, user_text}` is the reference shape.
pub fn chat_candidates(session: &SessionId, text: &str) -> Vec<PostCandidate> {
    vec![
        PostCandidate {
            path: "/chat",
            query: vec![],
            body: Some(json!({ "session_id": session.as_str(), "user_text": text })),
        },
        PostCandidate {
            path: "/chat",
            query: vec![],
            body: Some(json!({ "session": session.as_str(), "text": text })),
        },
        PostCandidate {
            path: "/chat",
            query: vec![],
            body: Some(json!({ "text": text })),
        },
        PostCandidate {
            path: "/message",
            query: vec![],
            body: Some(json!({ "session_id": session.as_str(), "user_text": text })),
        },
    ]
}

/// Argument board fetch, keyed by session id.
pub fn board_candidates(session: &SessionId) -> Vec<GetCandidate> {
    vec![
        GetCandidate {
            path: "/columns".to_string(),
            query: vec![("session_id", session.as_str().to_string())],
        },
        GetCandidate {
            path: format!("/columns/{}", session.as_str()),
            query: vec![],
        },
        GetCandidate {
            path: "/board".to_string(),
            query: vec![("session", session.as_str().to_string())],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_family_leads_with_query_shape() {
        let candidates = session_candidates(Mode::DebateCounter);
        assert_eq!(candidates[0].path, "/session");
        assert_eq!(
            candidates[0].query,
            vec![("mode", "debate_counter".to_string())]
        );
        assert!(candidates[0].body.is_none());

        // JSON-body fallbacks follow, in order.
        assert_eq!(
            candidates[1].body.as_ref().unwrap()["mode"],
            "debate_counter"
        );
        assert_eq!(candidates[2].path, "/sessions");
    }

    #[test]
    fn test_chat_family_leads_with_reference_shape() {
        let session = SessionId::new("abc123");
        let candidates = chat_candidates(&session, "my claim");

        let first = candidates[0].body.as_ref().unwrap();
        assert_eq!(first["session_id"], "abc123");
        assert_eq!(first["user_text"], "my claim");

        let second = candidates[1].body.as_ref().unwrap();
        assert_eq!(second["session"], "abc123");
        assert_eq!(second["text"], "my claim");

        // Last resort carries the text alone.
        assert_eq!(candidates[2].body.as_ref().unwrap(), &json!({"text": "my claim"}));
    }

    #[test]
    fn test_board_family_leads_with_query_shape() {
        let session = SessionId::new("abc123");
        let candidates = board_candidates(&session);
        assert_eq!(candidates[0].path, "/columns");
        assert_eq!(
            candidates[0].query,
            vec![("session_id", "abc123".to_string())]
        );
        assert_eq!(candidates[1].path, "/columns/abc123");
    }

    #[test]
    fn test_describe_labels() {
        let candidates = session_candidates(Mode::PitchObjections);
        assert_eq!(candidates[0].describe(), "POST /session?mode");
        assert_eq!(candidates[1].describe(), "POST /session {mode}");

        let session = SessionId::new("s1");
        assert_eq!(
            chat_candidates(&session, "x")[0].describe(),
            "POST /chat {session_id,user_text}"
        );
        assert_eq!(
            board_candidates(&session)[0].describe(),
            "GET /columns?session_id"
        );
    }
}
