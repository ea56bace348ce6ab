use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RecordError;

/// A motivational quote with attribution. The upstream model is asked to
/// attribute unknown quotes to "Anonymous"; the client never fills that in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

/// The daily motivation payload: quote, positive thought, productivity tip.
/// Replaced wholesale on every successful fetch — never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotivationRecord {
    pub quote: Quote,
    pub thought: String,
    pub tip: String,
}

impl MotivationRecord {
    /// Parse and structurally validate a raw model response.
    ///
    /// The raw text is trimmed, parsed as JSON, and checked field by field:
    /// `quote` must be an object with string `text` and `author`, and
    /// `thought`/`tip` must be strings. Anything else is rejected — no
    /// partial record is ever produced.
    pub fn from_json_str(raw: &str) -> Result<Self, RecordError> {
        let value: Value = serde_json::from_str(raw.trim())?;

        let quote = value
            .get("quote")
            .and_then(Value::as_object)
            .ok_or_else(|| RecordError::Shape("quote must be an object".into()))?;
        let text = require_string(quote.get("text"), "quote.text")?;
        let author = require_string(quote.get("author"), "quote.author")?;
        let thought = require_string(value.get("thought"), "thought")?;
        let tip = require_string(value.get("tip"), "tip")?;

        Ok(Self {
            quote: Quote { text, author },
            thought,
            tip,
        })
    }
}

fn require_string(value: Option<&Value>, field: &str) -> Result<String, RecordError> {
    value
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| RecordError::Shape(format!("{field} must be a string")))
}
