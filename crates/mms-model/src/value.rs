//! Converted field values.

use std::fmt;

use chrono::NaiveDateTime;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

/// Rendering used for timestamps in exports and JSON output.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A value produced by a transformer.
///
/// Each transformer yields exactly one variant, so downstream code can rely on
/// the semantic type of a target field without re-parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    /// Whole amounts, e.g. prices in the smallest currency unit.
    Integer(i64),
    Number(f64),
    Boolean(bool),
    Timestamp(NaiveDateTime),
    /// A normalized absolute URL.
    Url(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Short name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Number(_) => "number",
            Self::Boolean(_) => "boolean",
            Self::Timestamp(_) => "timestamp",
            Self::Url(_) => "url",
            Self::List(_) => "list",
        }
    }

    /// Borrow the textual content of `Text` and `Url` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) | Self::Url(text) => Some(text),
            _ => None,
        }
    }

    /// Numeric view of `Integer` and `Number` values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// True for blank text/URLs and empty lists.
    ///
    /// Scalars that carry a value (numbers, booleans, timestamps) are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) | Self::Url(text) => text.trim().is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Integer(_) | Self::Number(_) | Self::Boolean(_) | Self::Timestamp(_) => false,
        }
    }

    /// Render the value as a single export cell.
    ///
    /// Lists are joined with `list_separator`; everything else uses [`Display`](fmt::Display).
    pub fn to_cell(&self, list_separator: &str) -> String {
        match self {
            Self::List(items) => items.join(list_separator),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) | Self::Url(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Number(value) => f.write_str(&format_numeric(*value)),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Timestamp(value) => write!(f, "{}", value.format(TIMESTAMP_FORMAT)),
            Self::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) | Self::Url(text) => serializer.serialize_str(text),
            Self::Integer(value) => serializer.serialize_i64(*value),
            Self::Number(value) => serializer.serialize_f64(*value),
            Self::Boolean(value) => serializer.serialize_bool(*value),
            Self::Timestamp(value) => {
                serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
            }
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Formats a floating-point number without trailing fractional zeros.
pub fn format_numeric(value: f64) -> String {
    let text = format!("{value}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn numeric_formatting_drops_trailing_zeros() {
        assert_eq!(format_numeric(10.0), "10");
        assert_eq!(format_numeric(10.5), "10.5");
        assert_eq!(format_numeric(1200.25), "1200.25");
        assert_eq!(format_numeric(-3.0), "-3");
    }

    #[test]
    fn display_and_cells() {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(FieldValue::Timestamp(ts).to_string(), "2024-03-01 09:30:00");
        assert_eq!(FieldValue::Integer(15000).to_string(), "15000");
        let list = FieldValue::List(vec!["a".into(), "b".into()]);
        assert_eq!(list.to_cell(","), "a,b");
        assert_eq!(list.to_string(), "[a, b]");
    }

    #[test]
    fn emptiness() {
        assert!(FieldValue::Text("  ".into()).is_empty());
        assert!(FieldValue::List(vec![]).is_empty());
        assert!(!FieldValue::Integer(0).is_empty());
        assert!(!FieldValue::Boolean(false).is_empty());
    }

    #[test]
    fn serializes_as_plain_json() {
        let value = serde_json::to_value(FieldValue::List(vec!["x".into()])).unwrap();
        assert_eq!(value, serde_json::json!(["x"]));
        let value = serde_json::to_value(FieldValue::Integer(7)).unwrap();
        assert_eq!(value, serde_json::json!(7));
    }
}
