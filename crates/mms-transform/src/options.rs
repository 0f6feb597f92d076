//! Typed per-transformer options.
//!
//! Profiles author options as a free-form JSON object. At compile time the
//! object is parsed into the one [`TransformerOptions`] variant the
//! transformer understands; unknown keys and wrong value types are rejected
//! there instead of being silently ignored per record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::transformers::Transformer;

pub(crate) const DEFAULT_SEPARATOR: &str = ",";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TransformerOptions {
    /// The transformer takes no options.
    None,
    /// `toString` with `maxLength`.
    MaxLength { max_length: usize },
    /// `toArray`.
    Separator {
        separator: String,
        unique: bool,
        max_items: Option<usize>,
    },
    /// `toCategory`: name of the vocabulary table to translate through.
    CategoryMap { table: String },
    /// `toBrand`: vocabulary table and whether to emit the localized spelling.
    BrandMap { table: String, localized: bool },
}

impl TransformerOptions {
    /// Default list options (`,` separator, no dedup, no cap).
    pub fn separator() -> Self {
        Self::Separator {
            separator: DEFAULT_SEPARATOR.to_string(),
            unique: false,
            max_items: None,
        }
    }

    /// Vocabulary table referenced by these options, if any.
    pub fn vocabulary(&self) -> Option<&str> {
        match self {
            Self::CategoryMap { table } | Self::BrandMap { table, .. } => Some(table),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct TextOptions {
    max_length: Option<usize>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct ArrayOptions {
    separator: Option<String>,
    #[serde(default)]
    unique: bool,
    max_items: Option<usize>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct CategoryOptions {
    category_map: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct BrandOptions {
    brand_map: String,
    #[serde(default)]
    localized: bool,
}

/// Parse the raw options object for `transformer`. Returns a message on failure.
pub(crate) fn parse_options(
    transformer: Transformer,
    raw: &Map<String, Value>,
) -> Result<TransformerOptions, String> {
    let value = Value::Object(raw.clone());
    match transformer {
        Transformer::Text => {
            let parsed: TextOptions = serde_json::from_value(value).map_err(|e| e.to_string())?;
            Ok(match parsed.max_length {
                Some(max_length) => TransformerOptions::MaxLength { max_length },
                None => TransformerOptions::None,
            })
        }
        Transformer::Array => {
            let parsed: ArrayOptions = serde_json::from_value(value).map_err(|e| e.to_string())?;
            let separator = parsed
                .separator
                .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string());
            if separator.is_empty() {
                return Err("separator must not be empty".to_string());
            }
            if parsed.max_items == Some(0) {
                return Err("maxItems must be at least 1".to_string());
            }
            Ok(TransformerOptions::Separator {
                separator,
                unique: parsed.unique,
                max_items: parsed.max_items,
            })
        }
        Transformer::Category => {
            let parsed: CategoryOptions =
                serde_json::from_value(value).map_err(|e| e.to_string())?;
            Ok(TransformerOptions::CategoryMap {
                table: parsed.category_map,
            })
        }
        Transformer::Brand => {
            let parsed: BrandOptions = serde_json::from_value(value).map_err(|e| e.to_string())?;
            Ok(TransformerOptions::BrandMap {
                table: parsed.brand_map,
                localized: parsed.localized,
            })
        }
        Transformer::Number
        | Transformer::Boolean
        | Transformer::Price
        | Transformer::Date
        | Transformer::Url => {
            if let Some(key) = raw.keys().next() {
                return Err(format!("unknown option '{key}' (takes no options)"));
            }
            Ok(TransformerOptions::None)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test fixture must be an object"),
        }
    }

    #[test]
    fn text_options() {
        let parsed = parse_options(Transformer::Text, &object(json!({"maxLength": 50}))).unwrap();
        assert_eq!(parsed, TransformerOptions::MaxLength { max_length: 50 });
        let parsed = parse_options(Transformer::Text, &Map::new()).unwrap();
        assert_eq!(parsed, TransformerOptions::None);
    }

    #[test]
    fn array_options_default_separator() {
        let parsed = parse_options(Transformer::Array, &Map::new()).unwrap();
        assert_eq!(parsed, TransformerOptions::separator());
        let parsed = parse_options(
            Transformer::Array,
            &object(json!({"separator": "|", "unique": true, "maxItems": 5})),
        )
        .unwrap();
        assert_eq!(
            parsed,
            TransformerOptions::Separator {
                separator: "|".to_string(),
                unique: true,
                max_items: Some(5),
            }
        );
    }

    #[test]
    fn rejects_options_the_transformer_does_not_understand() {
        assert!(parse_options(Transformer::Text, &object(json!({"separator": ","}))).is_err());
        assert!(parse_options(Transformer::Price, &object(json!({"maxLength": 3}))).is_err());
        assert!(parse_options(Transformer::Array, &object(json!({"separator": ""}))).is_err());
        assert!(parse_options(Transformer::Array, &object(json!({"maxItems": 0}))).is_err());
        assert!(parse_options(Transformer::Text, &object(json!({"maxLength": "ten"}))).is_err());
    }

    #[test]
    fn vocabulary_options_require_a_table() {
        assert!(parse_options(Transformer::Category, &Map::new()).is_err());
        let parsed =
            parse_options(Transformer::Category, &object(json!({"categoryMap": "category"})))
                .unwrap();
        assert_eq!(parsed.vocabulary(), Some("category"));
        let parsed = parse_options(
            Transformer::Brand,
            &object(json!({"brandMap": "brand", "localized": true})),
        )
        .unwrap();
        assert_eq!(
            parsed,
            TransformerOptions::BrandMap {
                table: "brand".to_string(),
                localized: true,
            }
        );
    }
}
