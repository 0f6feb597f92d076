//! Compiled mapping profiles.
//!
//! [`MappingProfile::compile`] turns a loose [`ProfileDefinition`] into a
//! checked, immutable profile. Every name and option is resolved against the
//! closed transformer/validator sets and the loaded vocabularies, so the
//! engine never has to handle a configuration defect per record.

use std::collections::HashSet;

use mms_model::{
    Delimiter, Encoding, FieldMappingDef, ProfileDefinition, ProfileMetadata, Vocabularies,
};
use serde::Serialize;
use serde_json::Value;

use crate::error::ProfileError;
use crate::options::TransformerOptions;
use crate::transformers::Transformer;
use crate::validators::Validator;

/// One compiled rule.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMapping {
    pub source_field: String,
    pub target_field: String,
    pub transformer: Transformer,
    pub validator: Option<Validator>,
    pub required: bool,
    pub default_value: Option<Value>,
    pub options: TransformerOptions,
}

impl FieldMapping {
    /// True when a failure on this field fails the whole record.
    pub fn is_fatal_in(&self, profile: &MappingProfile) -> bool {
        self.required || profile.requires(&self.target_field)
    }
}

/// An immutable, validated profile.
#[derive(Debug, Clone)]
pub struct MappingProfile {
    id: String,
    name: String,
    marketplace: String,
    mappings: Vec<FieldMapping>,
    metadata: ProfileMetadata,
}

impl MappingProfile {
    /// Compile a definition.
    ///
    /// # Errors
    ///
    /// Returns the first configuration defect found:
    /// blank identity attributes, no mappings, unknown transformer or
    /// validator names, invalid options, unknown vocabulary tables, duplicate
    /// target fields, `requiredFields` entries no mapping produces, or a
    /// default value the transformer cannot convert.
    pub fn compile(
        definition: ProfileDefinition,
        vocabularies: &Vocabularies,
    ) -> Result<Self, ProfileError> {
        let ProfileDefinition {
            id,
            name,
            marketplace,
            mappings,
            metadata,
        } = definition;

        for (attribute, value) in [("id", &id), ("name", &name), ("marketplace", &marketplace)] {
            if value.trim().is_empty() {
                return Err(ProfileError::MissingAttribute {
                    profile: id.clone(),
                    attribute,
                });
            }
        }
        if metadata.version.trim().is_empty() {
            return Err(ProfileError::MissingAttribute {
                profile: id,
                attribute: "metadata.version",
            });
        }
        if mappings.is_empty() {
            return Err(ProfileError::EmptyProfile { profile: id });
        }

        let mut compiled = Vec::with_capacity(mappings.len());
        let mut targets = HashSet::new();
        for def in mappings {
            let mapping = compile_mapping(&id, def, vocabularies)?;
            if !targets.insert(mapping.target_field.clone()) {
                return Err(ProfileError::DuplicateTargetField {
                    profile: id,
                    field: mapping.target_field,
                });
            }
            compiled.push(mapping);
        }

        if let Some(field) = metadata
            .required_fields
            .iter()
            .find(|field| !targets.contains(field.as_str()))
        {
            return Err(ProfileError::UnreachableRequiredField {
                profile: id,
                field: field.clone(),
            });
        }

        Ok(Self {
            id,
            name,
            marketplace,
            mappings: compiled,
            metadata,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn marketplace(&self) -> &str {
        &self.marketplace
    }

    pub fn mappings(&self) -> &[FieldMapping] {
        &self.mappings
    }

    pub fn metadata(&self) -> &ProfileMetadata {
        &self.metadata
    }

    pub fn version(&self) -> &str {
        &self.metadata.version
    }

    pub fn required_fields(&self) -> &[String] {
        &self.metadata.required_fields
    }

    /// True if `target` is listed in `requiredFields`.
    pub fn requires(&self, target: &str) -> bool {
        self.metadata.required_fields.iter().any(|f| f == target)
    }

    /// Target field names in output order.
    pub fn target_fields(&self) -> impl Iterator<Item = &str> {
        self.mappings.iter().map(|m| m.target_field.as_str())
    }

    /// Export delimiter, comma when the profile does not set one.
    pub fn delimiter(&self) -> Delimiter {
        self.metadata.delimiter.unwrap_or_default()
    }

    pub fn encoding(&self) -> Encoding {
        self.metadata.encoding
    }

    /// Listing view used by the CLI and JSON output.
    pub fn summary(&self) -> ProfileSummary<'_> {
        ProfileSummary {
            id: &self.id,
            name: &self.name,
            marketplace: &self.marketplace,
            version: &self.metadata.version,
            fields: self.mappings.len(),
            required_fields: &self.metadata.required_fields,
            delimiter: self.delimiter().name(),
            encoding: self.encoding().label(),
        }
    }
}

/// Serializable overview of a compiled profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub marketplace: &'a str,
    pub version: &'a str,
    pub fields: usize,
    pub required_fields: &'a [String],
    pub delimiter: &'static str,
    pub encoding: &'static str,
}

fn compile_mapping(
    profile: &str,
    def: FieldMappingDef,
    vocabularies: &Vocabularies,
) -> Result<FieldMapping, ProfileError> {
    let FieldMappingDef {
        source_field,
        target_field,
        transformer,
        validator,
        required,
        default_value,
        options,
    } = def;

    if target_field.trim().is_empty() {
        return Err(ProfileError::MissingAttribute {
            profile: profile.to_string(),
            attribute: "targetField",
        });
    }
    if source_field.trim().is_empty() {
        return Err(ProfileError::MissingAttribute {
            profile: profile.to_string(),
            attribute: "sourceField",
        });
    }

    let resolved = Transformer::from_name(&transformer).ok_or_else(|| {
        ProfileError::UnknownTransformer {
            profile: profile.to_string(),
            field: target_field.clone(),
            name: transformer.clone(),
        }
    })?;

    let validator = validator
        .map(|name| {
            Validator::from_name(&name).ok_or_else(|| ProfileError::UnknownValidator {
                profile: profile.to_string(),
                field: target_field.clone(),
                name,
            })
        })
        .transpose()?;

    let options =
        resolved
            .parse_options(&options)
            .map_err(|message| ProfileError::InvalidOptions {
                profile: profile.to_string(),
                field: target_field.clone(),
                transformer: resolved.name(),
                message,
            })?;

    if let Some(table) = options.vocabulary()
        && !vocabularies.contains(table)
    {
        return Err(ProfileError::UnknownVocabulary {
            profile: profile.to_string(),
            field: target_field,
            table: table.to_string(),
        });
    }

    // Defaults go through the mapping's own transformer at run time.
    if let Some(default) = &default_value
        && let Err(source) = resolved.apply(default, &options, vocabularies)
    {
        return Err(ProfileError::InvalidDefault {
            profile: profile.to_string(),
            field: target_field,
            source,
        });
    }

    Ok(FieldMapping {
        source_field,
        target_field,
        transformer: resolved,
        validator,
        required,
        default_value,
        options,
    })
}
