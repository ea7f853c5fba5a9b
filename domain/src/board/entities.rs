//! Argument board domain entities
//!
//! The board is a mapping from category (PRO / CON / SOURCES) to an ordered
//! item sequence. Every refresh replaces the whole mapping atomically; there
//! is no incremental merge. Items arrive from the backend as plain strings or
//! structured objects with no stable schema, so they are normalized into a
//! tagged union at ingestion and rendering never branches on raw shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Board category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "PRO")]
    Pro,
    #[serde(rename = "CON")]
    Con,
    #[serde(rename = "SOURCES")]
    Sources,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Pro, Category::Con, Category::Sources];

    /// Wire/header name of this category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Pro => "PRO",
            Category::Con => "CON",
            Category::Sources => "SOURCES",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One board item, normalized at ingestion (Value Object)
///
/// Downstream consumers only ever see this tagged union; the duck-typed wire
/// shapes are decided here, once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoardItem {
    /// A bare string item.
    Text { text: String },
    /// A structured object item; `fields` is kept verbatim for display.
    Structured { fields: Value },
}

/// Structured-item fields checked for display text, in preference order.
const TEXT_FIELDS: [&str; 6] = ["text", "claim", "title", "url", "body", "note"];

impl BoardItem {
    /// Normalize one raw backend value into a board item.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(text) => BoardItem::Text { text },
            other => BoardItem::Structured { fields: other },
        }
    }

    /// Best-effort human-readable text for this item.
    ///
    /// For structured items: a known text-carrying field, then the same
    /// fields under a nested `payload` object, then the canonical JSON
    /// string. Never panics, whatever the shape.
    pub fn display_text(&self) -> String {
        match self {
            BoardItem::Text { text } => text.clone(),
            BoardItem::Structured { fields } => {
                if let Some(text) = extract_text_field(fields) {
                    return text;
                }
                if let Some(payload) = fields.get("payload") {
                    if let Some(text) = payload.as_str() {
                        return text.to_string();
                    }
                    if let Some(text) = extract_text_field(payload) {
                        return text;
                    }
                }
                fields.to_string()
            }
        }
    }
}

fn extract_text_field(value: &Value) -> Option<String> {
    TEXT_FIELDS
        .iter()
        .find_map(|field| value.get(field).and_then(Value::as_str))
        .map(|s| s.to_string())
}

/// The full PRO/CON/SOURCES mapping (Entity)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub pro: Vec<BoardItem>,
    pub con: Vec<BoardItem>,
    pub sources: Vec<BoardItem>,
}

impl Board {
    /// The explicit empty state every session starts from and every failed
    /// refresh degrades to.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn items(&self, category: Category) -> &[BoardItem] {
        match category {
            Category::Pro => &self.pro,
            Category::Con => &self.con,
            Category::Sources => &self.sources,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pro.is_empty() && self.con.is_empty() && self.sources.is_empty()
    }
}
