//! Error types for transformation and profile compilation.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// A transformer rejected or could not coerce a raw value.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{transformer} could not convert {value}: {reason}")]
pub struct TransformError {
    pub transformer: &'static str,
    /// The raw value, rendered as JSON.
    pub value: String,
    pub reason: String,
}

impl TransformError {
    pub fn new(transformer: &'static str, raw: &Value, reason: impl Into<String>) -> Self {
        Self {
            transformer,
            value: raw.to_string(),
            reason: reason.into(),
        }
    }
}

/// Configuration defects found while compiling a profile definition.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("profile '{profile}': {attribute} must not be blank")]
    MissingAttribute {
        profile: String,
        attribute: &'static str,
    },

    #[error("profile '{profile}' has no field mappings")]
    EmptyProfile { profile: String },

    #[error("profile '{profile}', field '{field}': unknown transformer '{name}'")]
    UnknownTransformer {
        profile: String,
        field: String,
        name: String,
    },

    #[error("profile '{profile}', field '{field}': unknown validator '{name}'")]
    UnknownValidator {
        profile: String,
        field: String,
        name: String,
    },

    #[error("profile '{profile}', field '{field}': invalid options for {transformer}: {message}")]
    InvalidOptions {
        profile: String,
        field: String,
        transformer: &'static str,
        message: String,
    },

    #[error("profile '{profile}', field '{field}': vocabulary table '{table}' is not loaded")]
    UnknownVocabulary {
        profile: String,
        field: String,
        table: String,
    },

    #[error("profile '{profile}', field '{field}': default value is not convertible: {source}")]
    InvalidDefault {
        profile: String,
        field: String,
        #[source]
        source: TransformError,
    },

    #[error("profile '{profile}': target field '{field}' is mapped more than once")]
    DuplicateTargetField { profile: String, field: String },

    #[error("profile '{profile}': required field '{field}' is not produced by any mapping")]
    UnreachableRequiredField { profile: String, field: String },
}
