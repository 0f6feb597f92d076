//! Transformer library.
//!
//! Each transformer is a pure conversion from a raw JSON value to a typed
//! [`FieldValue`]. The set is closed: profiles name transformers as strings
//! and [`Transformer::from_name`] resolves them once, at compile time.

use std::collections::HashSet;

use mms_model::{FieldValue, Vocabularies};
use serde_json::{Map, Value};

use crate::error::TransformError;
use crate::normalization::datetime::from_epoch_seconds;
use crate::normalization::numeric::{PriceError, price_from_f64};
use crate::normalization::{
    normalize_url, parse_number, parse_price, parse_timestamp, scalar_to_text, truncate_chars,
};
use crate::options::{DEFAULT_SEPARATOR, TransformerOptions, parse_options};

const TRUE_WORDS: &[&str] = &["true", "1", "yes", "y", "on", "예"];
const FALSE_WORDS: &[&str] = &["false", "0", "no", "n", "off", "아니오"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transformer {
    /// `toString`
    Text,
    /// `toNumber`
    Number,
    /// `toBoolean`
    Boolean,
    /// `toPrice`
    Price,
    /// `toDate`
    Date,
    /// `toUrl`
    Url,
    /// `toCategory`
    Category,
    /// `toArray`
    Array,
    /// `toBrand`
    Brand,
}

impl Transformer {
    pub const ALL: [Transformer; 9] = [
        Self::Text,
        Self::Number,
        Self::Boolean,
        Self::Price,
        Self::Date,
        Self::Url,
        Self::Category,
        Self::Array,
        Self::Brand,
    ];

    /// Name used in profile configuration.
    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "toString",
            Self::Number => "toNumber",
            Self::Boolean => "toBoolean",
            Self::Price => "toPrice",
            Self::Date => "toDate",
            Self::Url => "toUrl",
            Self::Category => "toCategory",
            Self::Array => "toArray",
            Self::Brand => "toBrand",
        }
    }

    /// Resolve a configured name. Names are case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Parse a raw options object into this transformer's typed options.
    pub fn parse_options(self, raw: &Map<String, Value>) -> Result<TransformerOptions, String> {
        parse_options(self, raw)
    }

    /// Convert one raw value.
    ///
    /// `options` must come from [`Transformer::parse_options`] for the same
    /// transformer; a mismatched variant falls back to the defaults.
    pub fn apply(
        self,
        raw: &Value,
        options: &TransformerOptions,
        vocabularies: &Vocabularies,
    ) -> Result<FieldValue, TransformError> {
        let name = self.name();
        let fail = |reason: &str| TransformError::new(name, raw, reason);

        match self {
            Self::Text => {
                let text = to_text(raw).ok_or_else(|| fail("expected a scalar or list"))?;
                Ok(FieldValue::Text(match options {
                    TransformerOptions::MaxLength { max_length } => {
                        truncate_chars(&text, *max_length)
                    }
                    _ => text,
                }))
            }
            Self::Number => {
                let number = match raw {
                    Value::Number(number) => number.as_f64(),
                    Value::String(text) => parse_number(text),
                    _ => None,
                };
                number
                    .filter(|n| n.is_finite())
                    .map(FieldValue::Number)
                    .ok_or_else(|| fail("not a number"))
            }
            Self::Boolean => to_boolean(raw)
                .map(FieldValue::Boolean)
                .ok_or_else(|| fail("not a recognized boolean")),
            Self::Price => {
                let amount = match raw {
                    Value::Number(number) => number
                        .as_f64()
                        .ok_or(PriceError::NotNumeric)
                        .and_then(price_from_f64),
                    Value::String(text) => parse_price(text),
                    _ => Err(PriceError::NotNumeric),
                };
                amount
                    .map(FieldValue::Integer)
                    .map_err(|error| fail(error.reason()))
            }
            Self::Date => {
                let parsed = match raw {
                    Value::String(text) => parse_timestamp(text),
                    Value::Number(number) => number.as_i64().and_then(from_epoch_seconds),
                    _ => None,
                };
                parsed
                    .map(FieldValue::Timestamp)
                    .ok_or_else(|| fail("unrecognized date format"))
            }
            Self::Url => {
                let Value::String(text) = raw else {
                    return Err(fail("expected a string"));
                };
                normalize_url(text).map(FieldValue::Url).map_err(fail)
            }
            Self::Category => {
                let term = scalar_to_text(raw).ok_or_else(|| fail("expected a scalar"))?;
                let translated = options
                    .vocabulary()
                    .and_then(|table| vocabularies.get(table))
                    .and_then(|table| table.translate(&term))
                    .map(str::to_string);
                Ok(FieldValue::Text(translated.unwrap_or(term)))
            }
            Self::Brand => {
                let term = scalar_to_text(raw).ok_or_else(|| fail("expected a scalar"))?;
                let (table, localized) = match options {
                    TransformerOptions::BrandMap { table, localized } => {
                        (vocabularies.get(table), *localized)
                    }
                    _ => (None, false),
                };
                let resolved = table.and_then(|table| {
                    let canonical = table.canonicalize(&term)?;
                    if localized {
                        table.to_localized(canonical)
                    } else {
                        Some(canonical)
                    }
                });
                Ok(FieldValue::Text(resolved.map(str::to_string).unwrap_or(term)))
            }
            Self::Array => {
                let (separator, unique, max_items) = match options {
                    TransformerOptions::Separator {
                        separator,
                        unique,
                        max_items,
                    } => (separator.as_str(), *unique, *max_items),
                    _ => (DEFAULT_SEPARATOR, false, None),
                };
                let items = split_items(raw, separator)
                    .ok_or_else(|| fail("expected a string or list"))?;
                Ok(FieldValue::List(shape_list(items, unique, max_items)))
            }
        }
    }
}

fn to_text(raw: &Value) -> Option<String> {
    match raw {
        Value::Array(items) => {
            let parts: Option<Vec<String>> = items
                .iter()
                .filter(|item| !item.is_null())
                .map(scalar_to_text)
                .collect();
            Some(
                parts?
                    .into_iter()
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        }
        other => scalar_to_text(other),
    }
}

fn to_boolean(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => match number.as_f64() {
            Some(n) if n == 1.0 => Some(true),
            Some(n) if n == 0.0 => Some(false),
            _ => None,
        },
        Value::String(text) => {
            let word = text.trim().to_lowercase();
            if TRUE_WORDS.contains(&word.as_str()) {
                Some(true)
            } else if FALSE_WORDS.contains(&word.as_str()) {
                Some(false)
            } else {
                None
            }
        }
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn split_items(raw: &Value, separator: &str) -> Option<Vec<String>> {
    match raw {
        Value::String(text) => Some(
            text.split(separator)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        Value::Array(items) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(scalar_to_text)
            .filter(|item| item.as_ref().is_none_or(|text| !text.is_empty()))
            .collect(),
        Value::Number(_) | Value::Bool(_) => scalar_to_text(raw).map(|item| vec![item]),
        Value::Null | Value::Object(_) => None,
    }
}

fn shape_list(items: Vec<String>, unique: bool, max_items: Option<usize>) -> Vec<String> {
    let mut items = if unique {
        let mut seen = HashSet::new();
        items
            .into_iter()
            .filter(|item| seen.insert(item.clone()))
            .collect()
    } else {
        items
    };
    if let Some(max) = max_items {
        items.truncate(max);
    }
    items
}
