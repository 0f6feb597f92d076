//! Marketplace profiles and vocabularies.
//!
//! Ships the built-in mapping profiles (Shopify, Naver Smart Store, Coupang
//! Wing, 11st) and vocabulary tables, loads extra profiles from a directory,
//! and indexes everything in a [`ProfileRegistry`].
//!
//! # Example
//!
//! ```rust,ignore
//! use mms_profiles::{ProfileRegistry, RegistryConfig};
//!
//! let registry = ProfileRegistry::load(&RegistryConfig::from_env())?;
//! let profile = registry.get_by_id("naver-smartstore")?;
//! let result = registry.engine().transform(&record, profile);
//! ```

pub mod embedded;
pub mod error;
pub mod loader;
pub mod paths;
pub mod registry;

pub use error::{RegistryError, Result};
pub use loader::{
    DirectoryContents, builtin_definitions, builtin_vocabularies, load_directory,
    load_vocabulary_from_str, parse_profile_from_str,
};
pub use paths::{PROFILES_DIR_ENV_VAR, profiles_dir_from_env};
pub use registry::{ProfileRegistry, RegistryConfig};
