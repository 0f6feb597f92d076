use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// Source records are flat JSON objects.
    #[error("source record must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("vocabulary table '{name}' is already defined")]
    DuplicateVocabulary { name: String },

    #[error("invalid delimiter '{0}' (expected comma, tab, pipe or semicolon)")]
    InvalidDelimiter(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
