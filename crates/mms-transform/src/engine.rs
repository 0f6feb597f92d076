//! Profile execution.
//!
//! The engine walks a compiled profile in mapping order and produces a
//! [`TransformResult`]. Field problems never abort the run; they are collected
//! as [`FieldError`]s and classified as fatal or warning.

use mms_model::{FieldProvenance, SourceRecord, TargetRecord, Vocabularies};
use serde::Serialize;
use thiserror::Error;

use crate::batch::BatchReport;
use crate::logging::redact_value;
use crate::profile::{FieldMapping, MappingProfile};
use crate::validators::Validator;

/// What went wrong with one target field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind")]
pub enum FieldErrorKind {
    #[error("required field is missing")]
    MissingRequiredField,

    #[error("{transformer} failed: {reason}")]
    TransformationFailed {
        transformer: &'static str,
        reason: String,
    },

    #[error("{validator} validation failed for '{value}'")]
    ValidationFailed {
        validator: &'static str,
        value: String,
    },
}

impl FieldErrorKind {
    /// Variant name, safe to log without exposing record values.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MissingRequiredField => "MissingRequiredField",
            Self::TransformationFailed { .. } => "TransformationFailed",
            Self::ValidationFailed { .. } => "ValidationFailed",
        }
    }
}

/// A problem with one target field of one record.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("{field}: {kind}")]
pub struct FieldError {
    /// Target field name.
    pub field: String,
    pub source_field: String,
    #[serde(flatten)]
    pub kind: FieldErrorKind,
    /// Fatal errors fail the record; others are warnings.
    pub fatal: bool,
}

/// Outcome of applying one profile to one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum TransformResult {
    Success {
        record: TargetRecord,
        /// Non-fatal errors on optional fields, which were omitted.
        warnings: Vec<FieldError>,
    },
    Failure {
        /// Fields that converted before and after the fatal errors.
        partial: TargetRecord,
        /// All field errors in profile order, fatal and non-fatal.
        errors: Vec<FieldError>,
    },
}

impl TransformResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The output record (complete on success, partial on failure).
    pub fn record(&self) -> &TargetRecord {
        match self {
            Self::Success { record, .. } => record,
            Self::Failure { partial, .. } => partial,
        }
    }

    /// Warnings on success, all errors on failure.
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Success { warnings, .. } => warnings,
            Self::Failure { errors, .. } => errors,
        }
    }

    pub fn fatal_errors(&self) -> impl Iterator<Item = &FieldError> {
        self.errors().iter().filter(|error| error.fatal)
    }

    pub fn into_record(self) -> TargetRecord {
        match self {
            Self::Success { record, .. } => record,
            Self::Failure { partial, .. } => partial,
        }
    }
}

/// Applies compiled profiles to source records.
///
/// Holds only a borrowed, immutable vocabulary set, so one engine can be
/// shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct Engine<'v> {
    vocabularies: &'v Vocabularies,
}

impl<'v> Engine<'v> {
    pub fn new(vocabularies: &'v Vocabularies) -> Self {
        Self { vocabularies }
    }

    pub fn vocabularies(&self) -> &'v Vocabularies {
        self.vocabularies
    }

    /// Transform one record.
    pub fn transform(&self, record: &SourceRecord, profile: &MappingProfile) -> TransformResult {
        let mut output = TargetRecord::new();
        let mut errors = Vec::new();

        for mapping in profile.mappings() {
            if let Err(error) = self.apply_mapping(record, profile, mapping, &mut output) {
                tracing::warn!(
                    profile = %profile.id(),
                    field = %error.field,
                    fatal = error.fatal,
                    kind = error.kind.name(),
                    "Field error"
                );
                errors.push(error);
            }
        }

        for required in profile.required_fields() {
            let covered = output.contains(required) || errors.iter().any(|e| &e.field == required);
            if !covered {
                let source_field = profile
                    .mappings()
                    .iter()
                    .find(|m| &m.target_field == required)
                    .map(|m| m.source_field.clone())
                    .unwrap_or_default();
                errors.push(FieldError {
                    field: required.clone(),
                    source_field,
                    kind: FieldErrorKind::MissingRequiredField,
                    fatal: true,
                });
            }
        }

        if errors.iter().any(|error| error.fatal) {
            TransformResult::Failure {
                partial: output,
                errors,
            }
        } else {
            TransformResult::Success {
                record: output,
                warnings: errors,
            }
        }
    }

    /// Transform records independently, preserving input order.
    pub fn transform_batch<'r, I>(&self, records: I, profile: &MappingProfile) -> BatchReport
    where
        I: IntoIterator<Item = &'r SourceRecord>,
    {
        let outcomes: Vec<TransformResult> = records
            .into_iter()
            .map(|record| self.transform(record, profile))
            .collect();
        let report = BatchReport::new(profile.id(), outcomes);
        tracing::info!(
            profile = %profile.id(),
            total = report.total(),
            succeeded = report.succeeded,
            failed = report.failed,
            "Batch transformed"
        );
        report
    }

    fn apply_mapping(
        &self,
        record: &SourceRecord,
        profile: &MappingProfile,
        mapping: &FieldMapping,
        output: &mut TargetRecord,
    ) -> Result<(), FieldError> {
        let error = |kind: FieldErrorKind, fatal: bool| FieldError {
            field: mapping.target_field.clone(),
            source_field: mapping.source_field.clone(),
            kind,
            fatal,
        };

        let (raw, defaulted) = match record.present(&mapping.source_field) {
            Some(raw) => (raw, false),
            None => match &mapping.default_value {
                Some(default) => {
                    tracing::debug!(field = %mapping.target_field, "Using default value");
                    (default, true)
                }
                None if mapping.required => {
                    return Err(error(FieldErrorKind::MissingRequiredField, true));
                }
                None => {
                    tracing::debug!(field = %mapping.target_field, "Omitting absent optional field");
                    return Ok(());
                }
            },
        };

        let fatal = mapping.is_fatal_in(profile);
        let value = mapping
            .transformer
            .apply(raw, &mapping.options, self.vocabularies)
            .map_err(|failure| {
                tracing::trace!(
                    field = %mapping.target_field,
                    value = %redact_value(&failure.value),
                    "Transformer rejected value"
                );
                error(
                    FieldErrorKind::TransformationFailed {
                        transformer: failure.transformer,
                        reason: failure.reason,
                    },
                    fatal,
                )
            })?;

        if let Some(validator) = mapping.validator
            && !validator.check(&value)
        {
            let rendered = value.to_string();
            tracing::trace!(
                field = %mapping.target_field,
                value = %redact_value(&rendered),
                "Validator rejected value"
            );
            return Err(error(
                FieldErrorKind::ValidationFailed {
                    validator: validator.name(),
                    value: rendered,
                },
                fatal,
            ));
        }

        output.push(
            mapping.target_field.clone(),
            value,
            FieldProvenance {
                source_field: mapping.source_field.clone(),
                transformer: mapping.transformer.name(),
                validator: mapping.validator.map(Validator::name),
                defaulted,
            },
        );
        Ok(())
    }
}

/// Transform one record with a throwaway [`Engine`].
pub fn transform(
    record: &SourceRecord,
    profile: &MappingProfile,
    vocabularies: &Vocabularies,
) -> TransformResult {
    Engine::new(vocabularies).transform(record, profile)
}
