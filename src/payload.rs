//! Decoding of externally generated ideas.
//!
//! Sources answer with free text that should hold one JSON object carrying a `generated_ideas`
//! array. The outermost `{ ... }` span is parsed; each array entry is decoded field by field with
//! the fallbacks below, so a partially malformed entry still yields an idea.
//!
//! | field | fallback |
//! |---|---|
//! | numeric scores | `0.5` |
//! | `combination_type` | `"ai_generated"` |
//! | text | empty string |
//! | lists | empty list |

use serde_json::{Map, Value};
use thiserror::Error;

use crate::deserializers::{DEFAULT_SCORE, lenient_f64, lenient_string, lenient_string_list};
use crate::model::{AI_GENERATED, GeneratedIdea};

#[derive(Debug, Error, PartialEq)]
pub enum PayloadError {
    #[error("no JSON object found in response")]
    NoJsonObject,
    #[error("invalid JSON in response: {0}")]
    InvalidJson(String),
}

/// Slice from the first `{` to the last `}` inclusive.
///
/// Both delimiters are ASCII, so the byte offsets are valid char boundaries.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parse a source response into ideas.
///
/// A response whose JSON is valid but has no usable `generated_ideas` array yields an empty list.
pub fn parse_generated_ideas(text: &str) -> Result<Vec<GeneratedIdea>, PayloadError> {
    let span = extract_json_object(text).ok_or(PayloadError::NoJsonObject)?;
    let value: Value =
        serde_json::from_str(span).map_err(|e| PayloadError::InvalidJson(e.to_string()))?;

    let Some(entries) = value.get("generated_ideas").and_then(Value::as_array) else {
        tracing::debug!("response JSON has no generated_ideas array");
        return Ok(Vec::new());
    };

    let ideas: Vec<GeneratedIdea> = entries
        .iter()
        .filter_map(|entry| match entry.as_object() {
            Some(fields) => Some(decode_idea(fields)),
            None => {
                tracing::debug!("skipping non-object generated_ideas entry");
                None
            }
        })
        .collect();

    Ok(ideas)
}

/// Decode one idea object with per-field fallbacks
pub fn decode_idea(fields: &Map<String, Value>) -> GeneratedIdea {
    let text = |key: &str| fields.get(key).and_then(lenient_string).unwrap_or_default();
    let score = |key: &str| {
        fields
            .get(key)
            .and_then(lenient_f64)
            .unwrap_or(DEFAULT_SCORE)
    };
    let list = |key: &str| {
        fields
            .get(key)
            .and_then(lenient_string_list)
            .unwrap_or_default()
    };

    GeneratedIdea {
        title: text("title"),
        description: text("description"),
        source_innovations: list("source_innovations"),
        combination_type: fields
            .get("combination_type")
            .and_then(lenient_string)
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| AI_GENERATED.to_string()),
        feasibility_score: score("feasibility_score"),
        novelty_score: score("novelty_score"),
        impact_potential: score("impact_potential"),
        implementation_path: text("implementation_path"),
        research_directions: list("research_directions"),
    }
}
