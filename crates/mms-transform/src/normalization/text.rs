//! Text coercion helpers.

use serde_json::Value;

/// Render a scalar JSON value as text.
///
/// Strings are trimmed; numbers and booleans use their JSON spelling.
/// Returns `None` for `null`, arrays and objects.
pub fn scalar_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Truncate to at most `max_chars` characters (not bytes).
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn scalars_render_as_text() {
        assert_eq!(scalar_to_text(&json!("  a b ")), Some("a b".to_string()));
        assert_eq!(scalar_to_text(&json!(15000)), Some("15000".to_string()));
        assert_eq!(scalar_to_text(&json!(1.5)), Some("1.5".to_string()));
        assert_eq!(scalar_to_text(&json!(true)), Some("true".to_string()));
        assert_eq!(scalar_to_text(&json!(null)), None);
        assert_eq!(scalar_to_text(&json!({"a": 1})), None);
    }

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate_chars("반팔 티셔츠", 2), "반팔");
        assert_eq!(truncate_chars("abc", 5), "abc");
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
