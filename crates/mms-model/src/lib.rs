//! Data model for the marketplace mapping engine.
//!
//! This crate holds the types shared by every other crate in the workspace:
//!
//! - [`value`]: converted field values ([`FieldValue`]) and their export rendering
//! - [`record`]: scraped source records and ordered target records
//! - [`provenance`]: per-field audit trail (which source field and rule produced it)
//! - [`profile`]: raw, deserializable mapping profile definitions
//! - [`vocabulary`]: bidirectional vocabulary tables (categories, brands)
//!
//! Profile definitions in this crate are *uncompiled*: transformer and
//! validator names are plain strings. Compilation into typed profiles lives in
//! `mms-transform`, which owns the closed transformer/validator sets.

pub mod error;
pub mod profile;
pub mod provenance;
pub mod record;
pub mod value;
pub mod vocabulary;

pub use error::{ModelError, Result};
pub use profile::{Delimiter, Encoding, FieldMappingDef, ProfileDefinition, ProfileMetadata};
pub use provenance::FieldProvenance;
pub use record::{SourceRecord, TargetField, TargetRecord, is_absent};
pub use value::{FieldValue, TIMESTAMP_FORMAT, format_numeric};
pub use vocabulary::{CollisionSide, Vocabularies, VocabularyCollision, VocabularyTable};
