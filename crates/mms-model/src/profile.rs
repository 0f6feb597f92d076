//! Raw mapping profile definitions.
//!
//! These types mirror the JSON configuration authored per marketplace. They
//! are deliberately loose (transformer/validator names are strings, options
//! are a free-form object) and must be compiled before use; see
//! `mms_transform::MappingProfile::compile`.
//!
//! ```json
//! {
//!   "id": "naver-smartstore",
//!   "name": "Naver Smart Store",
//!   "marketplace": "naver",
//!   "mappings": [
//!     { "sourceField": "product_name", "targetField": "상품명",
//!       "transformer": "toString", "required": true, "options": { "maxLength": 100 } }
//!   ],
//!   "metadata": { "version": "1.0", "requiredFields": ["상품명"], "encoding": "UTF-8", "delimiter": "\t" }
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ModelError;

/// One rule producing one output field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMappingDef {
    pub source_field: String,
    pub target_field: String,
    pub transformer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validator: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Substituted for absent/empty source values before transformation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
}

impl FieldMappingDef {
    pub fn new(
        source_field: impl Into<String>,
        target_field: impl Into<String>,
        transformer: impl Into<String>,
    ) -> Self {
        Self {
            source_field: source_field.into(),
            target_field: target_field.into(),
            transformer: transformer.into(),
            validator: None,
            required: false,
            default_value: None,
            options: Map::new(),
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_validator(mut self, validator: impl Into<String>) -> Self {
        self.validator = Some(validator.into());
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// Character encoding of serialized exports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Encoding {
    #[default]
    #[serde(rename = "UTF-8", alias = "utf-8", alias = "utf8")]
    Utf8,
    /// UTF-8 prefixed with a byte-order mark, for spreadsheet tools that need it.
    #[serde(rename = "UTF-8-BOM", alias = "utf-8-bom")]
    Utf8Bom,
}

impl Encoding {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf8Bom => "UTF-8-BOM",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Field delimiter of serialized exports.
///
/// Accepts either the literal character (`","`, `"\t"`, `"|"`, `";"`) or its
/// name (`"comma"`, `"tab"`, `"pipe"`, `"semicolon"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
    Semicolon,
}

impl Delimiter {
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Comma => b',',
            Self::Tab => b'\t',
            Self::Pipe => b'|',
            Self::Semicolon => b';',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Comma => "comma",
            Self::Tab => "tab",
            Self::Pipe => "pipe",
            Self::Semicolon => "semicolon",
        }
    }
}

impl TryFrom<String> for Delimiter {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "," => return Ok(Self::Comma),
            "\t" => return Ok(Self::Tab),
            "|" => return Ok(Self::Pipe),
            ";" => return Ok(Self::Semicolon),
            _ => {}
        }
        match value.trim().to_ascii_lowercase().as_str() {
            "comma" => Ok(Self::Comma),
            "tab" | "\\t" => Ok(Self::Tab),
            "pipe" => Ok(Self::Pipe),
            "semicolon" => Ok(Self::Semicolon),
            _ => Err(ModelError::InvalidDelimiter(value)),
        }
    }
}

impl From<Delimiter> for String {
    fn from(value: Delimiter) -> Self {
        (value.as_byte() as char).to_string()
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Profile-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMetadata {
    pub version: String,
    #[serde(default)]
    pub description: String,
    /// Target fields that must be present in every successful output.
    #[serde(default)]
    pub required_fields: Vec<String>,
    #[serde(default)]
    pub encoding: Encoding,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<Delimiter>,
}

/// A marketplace export schema as authored in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDefinition {
    pub id: String,
    pub name: String,
    pub marketplace: String,
    pub mappings: Vec<FieldMappingDef>,
    pub metadata: ProfileMetadata,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn definition_deserializes_from_camel_case() {
        let def: ProfileDefinition = serde_json::from_value(json!({
            "id": "p1",
            "name": "Profile",
            "marketplace": "naver",
            "mappings": [
                {
                    "sourceField": "images",
                    "targetField": "이미지",
                    "transformer": "toArray",
                    "defaultValue": "",
                    "options": { "separator": "|", "unique": true }
                }
            ],
            "metadata": {
                "version": "1.0",
                "requiredFields": ["이미지"],
                "encoding": "UTF-8",
                "delimiter": "\t"
            }
        }))
        .unwrap();

        let mapping = &def.mappings[0];
        assert_eq!(mapping.target_field, "이미지");
        assert!(!mapping.required);
        assert_eq!(mapping.default_value, Some(json!("")));
        assert_eq!(mapping.options.get("unique"), Some(&json!(true)));
        assert_eq!(def.metadata.delimiter, Some(Delimiter::Tab));
        assert_eq!(def.metadata.encoding, Encoding::Utf8);
    }

    #[test]
    fn delimiter_accepts_names_and_characters() {
        assert_eq!(Delimiter::try_from("|".to_string()).unwrap(), Delimiter::Pipe);
        assert_eq!(Delimiter::try_from("Tab".to_string()).unwrap(), Delimiter::Tab);
        assert_eq!(Delimiter::try_from("comma".to_string()).unwrap(), Delimiter::Comma);
        assert!(Delimiter::try_from("::".to_string()).is_err());
    }

    #[test]
    fn unknown_encoding_is_rejected() {
        let result: Result<ProfileMetadata, _> =
            serde_json::from_value(json!({"version": "1", "encoding": "EUC-KR"}));
        assert!(result.is_err());
    }
}
