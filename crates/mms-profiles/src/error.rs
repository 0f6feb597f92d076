//! Error types for profile loading and registry lookups.

use std::path::PathBuf;

use mms_model::ModelError;
use mms_transform::ProfileError;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryError {
    #[error("profile id '{id}' is already registered")]
    DuplicateProfileId { id: String },

    #[error("profile '{id}' not found")]
    ProfileNotFound { id: String },

    #[error("no profiles registered for marketplace '{marketplace}'")]
    MarketplaceNotFound { marketplace: String },

    /// A definition parsed but failed compilation.
    #[error("invalid profile in {source_name}: {source}")]
    InvalidProfile {
        source_name: String,
        #[source]
        source: ProfileError,
    },

    #[error("failed to parse profile {source_name}: {source}")]
    ProfileParse {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read vocabulary {source_name}: {source}")]
    VocabularyRead {
        source_name: String,
        #[source]
        source: csv::Error,
    },

    #[error("invalid vocabulary {source_name}: {source}")]
    Vocabulary {
        source_name: String,
        #[source]
        source: ModelError,
    },

    #[error("profiles directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, RegistryError>;
