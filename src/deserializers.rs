//! Forgiving deserializers for the ingestion boundary.
//!
//! Innovation records arrive from language-model extraction runs and hand-edited JSON files, so
//! scores and text fields are accepted in several shapes and normalized here, before any record
//! reaches the engine.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Score used whenever a value is missing or unusable.
pub const DEFAULT_SCORE: f64 = 0.5;

pub fn default_score() -> f64 {
    DEFAULT_SCORE
}

/// Reads a numeric value from JSON, accepting numbers and numeric strings.
///
/// Returns `None` for anything else, including non-finite results.
pub fn lenient_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Reads a text value from JSON. Numbers and booleans are rendered, everything else is `None`.
pub fn lenient_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Reads a list of strings, dropping elements that are not text-like.
/// A bare string is treated as a one-element list.
pub fn lenient_string_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(items.iter().filter_map(lenient_string).collect()),
        Value::String(s) => Some(vec![s.clone()]),
        _ => None,
    }
}

/// Deserializes a unit-interval score.
///
/// # Accepted Formats
///
/// * **Number** within `[0, 1]`
/// * **String numeric**: `"0.75"` → 0.75
///
/// Missing, null, ill-typed, non-finite or out-of-range values all become [`DEFAULT_SCORE`].
/// Pair with `#[serde(default = "default_score")]` so absent keys take the same path.
pub fn de_unit_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<Value>::deserialize(deserializer)?;
    Ok(opt
        .as_ref()
        .and_then(lenient_f64)
        .filter(|v| (0.0..=1.0).contains(v))
        .unwrap_or(DEFAULT_SCORE))
}

/// Deserializes a text field where `null` or a non-text value means empty.
pub fn de_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<Value>::deserialize(deserializer)?;
    Ok(opt.as_ref().and_then(lenient_string).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Scored {
        #[serde(default = "default_score", deserialize_with = "de_unit_score")]
        score: f64,
        #[serde(default, deserialize_with = "de_text")]
        label: String,
    }

    fn score_of(v: Value) -> f64 {
        serde_json::from_value::<Scored>(v).unwrap().score
    }

    #[test]
    fn unit_score_accepts_numbers_and_numeric_strings() {
        assert_eq!(score_of(json!({"score": 0.8})), 0.8);
        assert_eq!(score_of(json!({"score": "0.25"})), 0.25);
        assert_eq!(score_of(json!({"score": 1})), 1.0);
    }

    #[test]
    fn unit_score_defaults_when_missing_or_unusable() {
        assert_eq!(score_of(json!({})), DEFAULT_SCORE);
        assert_eq!(score_of(json!({"score": null})), DEFAULT_SCORE);
        assert_eq!(score_of(json!({"score": "high"})), DEFAULT_SCORE);
        assert_eq!(score_of(json!({"score": 1.7})), DEFAULT_SCORE);
        assert_eq!(score_of(json!({"score": -0.1})), DEFAULT_SCORE);
        assert_eq!(score_of(json!({"score": [0.3]})), DEFAULT_SCORE);
    }

    #[test]
    fn text_accepts_null_and_scalars() {
        let s: Scored = serde_json::from_value(json!({"label": null})).unwrap();
        assert_eq!(s.label, "");
        let s: Scored = serde_json::from_value(json!({"label": 42})).unwrap();
        assert_eq!(s.label, "42");
    }

    #[test]
    fn string_list_filters_non_text() {
        let list = lenient_string_list(&json!(["a", {"x": 1}, 3])).unwrap();
        assert_eq!(list, vec!["a".to_string(), "3".to_string()]);
        assert_eq!(lenient_string_list(&json!("solo")).unwrap(), vec!["solo"]);
        assert!(lenient_string_list(&json!(null)).is_none());
    }
}
