//! Wire-shape normalization for backend responses
//!
//! Historical variants of the backend disagree on field names
//! (`chat_reply` vs `message` vs `reply`, `session_id` vs `id`), so every
//! response body goes through exactly one shape-tolerant extraction step
//! here. These are pure functions over `serde_json::Value`; downstream code
//! only ever sees domain types.

use coach_domain::{Board, BoardItem, Fallacy, Score};
use serde_json::Value;

/// Session-id field names, in preference order.
const SESSION_ID_FIELDS: [&str; 3] = ["session_id", "id", "session"];

/// Reply-text field names, in preference order. `chat_reply` is what the
/// reference backend emits.
const REPLY_FIELDS: [&str; 4] = ["chat_reply", "message", "reply", "text"];

/// Extract the opaque session identifier from a session-creation response.
pub fn extract_session_id(data: &Value) -> Option<String> {
    SESSION_ID_FIELDS
        .iter()
        .find_map(|field| data.get(field).and_then(Value::as_str))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Extract the assistant reply text from a chat response. Blank replies are
/// treated as absent.
pub fn extract_reply(data: &Value) -> Option<String> {
    REPLY_FIELDS
        .iter()
        .find_map(|field| data.get(field).and_then(Value::as_str))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Extract the optional strength score. Requires a numeric `score.value`;
/// the value is clamped to `[0, 100]` by the domain constructor. Reasons
/// that are not strings are skipped, not fatal.
pub fn extract_score(data: &Value) -> Option<Score> {
    let score = data.get("score")?;
    let value = score.get("value")?.as_f64()?;
    let reasons = score
        .get("reasons")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    Some(Score::new(value, reasons))
}

/// Extract the optional fallacy list. Entries without a usable label are
/// dropped; `name`/`explanation` are accepted as aliases for
/// `label`/`why`.
pub fn extract_fallacies(data: &Value) -> Vec<Fallacy> {
    let Some(items) = data.get("fallacies").and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let label = item
                .get("label")
                .or_else(|| item.get("name"))
                .and_then(Value::as_str)?;
            Some(Fallacy {
                code: field_str(item, "code"),
                label: label.to_string(),
                emoji: field_str(item, "emoji"),
                why: field_str(item, "why").or_else(|| field_str(item, "explanation")),
            })
        })
        .collect()
}

/// Extract the full board mapping from a columns response.
///
/// Returns `None` when none of the three category keys is present (a 2xx
/// body of the wrong shape). Missing individual categories default to
/// empty; items are normalized through [`BoardItem::from_value`].
pub fn extract_board(data: &Value) -> Option<Board> {
    let has_any_category = ["PRO", "CON", "SOURCES"]
        .iter()
        .any(|key| data.get(key).is_some());
    if !has_any_category {
        return None;
    }

    Some(Board {
        pro: extract_items(data, "PRO"),
        con: extract_items(data, "CON"),
        sources: extract_items(data, "SOURCES"),
    })
}

fn extract_items(data: &Value, key: &str) -> Vec<BoardItem> {
    data.get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().cloned().map(BoardItem::from_value).collect())
        .unwrap_or_default()
}

fn field_str(value: &Value, field: &str) -> Option<String> {
    value.get(field).and_then(Value::as_str).map(str::to_string)
}
