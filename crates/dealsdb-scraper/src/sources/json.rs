//! Helpers for collectors whose source is a JSON payload.

use dealsdb_core::RawContainer;
use serde_json::Value;

use crate::error::ScraperError;

/// Joins every string value in `value`, depth-first, separated by single
/// spaces. Object keys are not included. Blank strings are skipped.
#[must_use]
pub fn flatten_strings(value: &Value) -> String {
    let mut parts = Vec::new();
    collect_strings(value, &mut parts);
    parts.join(" ")
}

fn collect_strings<'a>(value: &'a Value, parts: &mut Vec<&'a str>) {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_strings(item, parts);
            }
        }
        Value::Object(map) => {
            for item in map.values() {
                collect_strings(item, parts);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

/// Parses a JSON array of [`RawContainer`] values.
///
/// # Errors
///
/// Returns [`ScraperError::Deserialize`] with `context` if the payload does
/// not match the container shape.
pub fn parse_containers(json: &str, context: &str) -> Result<Vec<RawContainer>, ScraperError> {
    serde_json::from_str(json).map_err(|source| ScraperError::Deserialize {
        context: context.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn flatten_collects_nested_strings() {
        let value = json!({
            "title": "Court Sneaker",
            "meta": {"badge": "30% off", "rating": 4.5},
            "tags": ["leather", "  ", "white"],
            "in_stock": true,
            "note": null
        });
        let text = flatten_strings(&value);
        for part in ["Court Sneaker", "30% off", "leather", "white"] {
            assert!(text.contains(part), "missing {part:?} in {text:?}");
        }
        assert!(!text.contains("4.5"));
        assert!(!text.contains("true"));
        assert!(!text.contains("  "));
    }

    #[test]
    fn flatten_scalar_string() {
        assert_eq!(flatten_strings(&json!("  $19.99 ")), "$19.99");
    }

    #[test]
    fn flatten_non_string_is_empty() {
        assert_eq!(flatten_strings(&json!(42)), "");
    }

    #[test]
    fn parse_containers_reads_array() {
        let json = r#"[
            {"candidate_names": ["Wool Scarf"], "text_content": "$40.00 $25.00"},
            {"candidate_names": ["Canvas Belt"], "explicit_discount_percent": 20}
        ]"#;
        let containers = parse_containers(json, "fixture").unwrap();
        assert_eq!(containers.len(), 2);
        assert_eq!(containers[1].explicit_discount_percent, Some(20));
    }

    #[test]
    fn parse_containers_reports_context_on_error() {
        let err = parse_containers(r#"{"not": "an array"}"#, "outlet-page-3").unwrap_err();
        assert!(
            matches!(err, ScraperError::Deserialize { ref context, .. } if context == "outlet-page-3"),
            "unexpected error: {err:?}"
        );
    }
}
