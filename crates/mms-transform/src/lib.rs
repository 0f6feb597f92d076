//! Marketplace field mapping engine.
//!
//! Converts scraped product records into the field layout a marketplace
//! expects. Everything is driven by [`MappingProfile`]s; no marketplace is
//! hardcoded here.
//!
//! # Overview
//!
//! - **Transformers** ([`Transformer`]): closed set of pure value conversions
//!   (`toString`, `toNumber`, `toBoolean`, `toPrice`, `toDate`, `toUrl`,
//!   `toCategory`, `toArray`, `toBrand`)
//! - **Validators** ([`Validator`]): closed set of pure predicates
//!   (`required`, `positive`, `email`, `url`, `phone`)
//! - **Profile compilation** ([`MappingProfile::compile`]): resolves names and
//!   options against the closed sets so configuration defects surface at load
//!   time rather than per record
//! - **Engine** ([`Engine`]): applies a compiled profile to one record or a
//!   batch, collecting field errors as data
//!
//! # Example
//!
//! ```ignore
//! use mms_transform::{Engine, MappingProfile, TransformResult};
//!
//! let profile = MappingProfile::compile(definition, &vocabularies)?;
//! let engine = Engine::new(&vocabularies);
//!
//! match engine.transform(&record, &profile) {
//!     TransformResult::Success { record, .. } => export(record),
//!     TransformResult::Failure { partial, errors } => review(partial, errors),
//! }
//! ```

mod batch;
mod engine;
mod error;
mod options;
mod profile;
mod transformers;
mod validators;

pub mod logging;
pub mod normalization;

// Compiled profiles
pub use profile::{FieldMapping, MappingProfile, ProfileSummary};

// Libraries
pub use options::TransformerOptions;
pub use transformers::Transformer;
pub use validators::Validator;

// Execution
pub use batch::BatchReport;
pub use engine::{Engine, FieldError, FieldErrorKind, TransformResult, transform};

// Error types
pub use error::{ProfileError, TransformError};
