//! Extraction of human-readable messages from error bodies.

use serde_json::Value;

/// Message and optional field name found in an error body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    pub message: String,
    pub field: Option<String>,
}

/// Looks for a field-level validation message first (`errors[0]`), then a
/// top-level `error` or `message`. Returns `None` for bodies that are not
/// JSON or carry none of these.
pub fn extract_detail(body: &str) -> Option<ErrorDetail> {
    let value: Value = serde_json::from_str(body).ok()?;

    if let Some(first) = value.get("errors").and_then(Value::as_array).and_then(|a| a.first()) {
        let message = ["defaultMessage", "message"]
            .iter()
            .find_map(|key| first.get(*key).and_then(Value::as_str))
            .or_else(|| first.as_str());
        if let Some(message) = message {
            return Some(ErrorDetail {
                message: message.to_string(),
                field: first.get("field").and_then(Value::as_str).map(String::from),
            });
        }
    }

    ["error", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .filter(|message| !message.trim().is_empty())
        .map(|message| ErrorDetail {
            message: message.to_string(),
            field: None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_level_message_wins() {
        let detail = extract_detail(
            r#"{"error":"Bad Request","errors":[{"field":"password","defaultMessage":"must have 8 characters"}]}"#,
        )
        .expect("detail");
        assert_eq!(detail.message, "must have 8 characters");
        assert_eq!(detail.field.as_deref(), Some("password"));
    }

    #[test]
    fn test_top_level_error_message() {
        let detail = extract_detail(r#"{"error":"Invalid credentials"}"#).expect("detail");
        assert_eq!(detail.message, "Invalid credentials");
        assert_eq!(detail.field, None);
    }

    #[test]
    fn test_plain_text_body_has_no_detail() {
        assert_eq!(extract_detail("Internal Server Error"), None);
        assert_eq!(extract_detail(r#"{"status":500}"#), None);
    }
}
