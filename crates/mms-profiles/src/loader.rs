//! Profile and vocabulary loading.
//!
//! Profiles are JSON [`ProfileDefinition`]s; vocabularies are two-column CSV
//! files with a `canonical,localized` header. Both are read from embedded data
//! or from a directory on disk.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use mms_model::{ProfileDefinition, Vocabularies, VocabularyTable};
use serde::Deserialize;

use crate::embedded;
use crate::error::{RegistryError, Result};

#[derive(Debug, Deserialize)]
struct VocabularyRow {
    canonical: String,
    localized: String,
}

/// Parse one vocabulary table from CSV content.
///
/// Blank rows are skipped. Pairs that would break the bijection are dropped
/// (first pair wins) and logged.
pub fn load_vocabulary_from_str(
    name: &str,
    content: &str,
    source_name: &str,
) -> Result<VocabularyTable> {
    let cursor = Cursor::new(content.as_bytes());
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(cursor);

    let mut table = VocabularyTable::new(name);
    for row in reader.deserialize::<VocabularyRow>() {
        let row = row.map_err(|source| RegistryError::VocabularyRead {
            source_name: source_name.to_string(),
            source,
        })?;
        table.add_pair(row.canonical, row.localized);
    }

    for collision in table.collisions() {
        tracing::warn!(
            table = %name,
            term = %collision.term,
            kept = %collision.kept,
            rejected = %collision.rejected,
            "Vocabulary collision, keeping first pair"
        );
    }
    Ok(table)
}

/// Load every embedded vocabulary table.
pub fn builtin_vocabularies() -> Result<Vocabularies> {
    let mut vocabularies = Vocabularies::new();
    for (name, content) in embedded::VOCABULARY_FILES {
        let table = load_vocabulary_from_str(name, content, name)?;
        insert_table(&mut vocabularies, table, name)?;
    }
    Ok(vocabularies)
}

/// Parse one profile definition from JSON content.
pub fn parse_profile_from_str(content: &str, source_name: &str) -> Result<ProfileDefinition> {
    serde_json::from_str(content).map_err(|source| RegistryError::ProfileParse {
        source_name: source_name.to_string(),
        source,
    })
}

/// Parse every embedded profile definition, in registration order.
pub fn builtin_definitions() -> Result<Vec<ProfileDefinition>> {
    embedded::PROFILE_FILES
        .iter()
        .map(|(file, content)| parse_profile_from_str(content, file))
        .collect()
}

/// Definitions and vocabularies read from a profiles directory.
#[derive(Debug, Default)]
pub struct DirectoryContents {
    /// `(file name, definition)` sorted by file name.
    pub profiles: Vec<(String, ProfileDefinition)>,
    pub vocabularies: Vec<VocabularyTable>,
}

/// Read `*.json` profiles and `*.csv` vocabularies from `dir`.
///
/// Files are processed in file-name order so registration is reproducible.
/// Vocabulary tables are named after the file stem (`colour.csv` -> `colour`).
/// Other files are ignored.
pub fn load_directory(dir: &Path) -> Result<DirectoryContents> {
    if !dir.is_dir() {
        return Err(RegistryError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut paths = Vec::new();
    let entries = fs::read_dir(dir).map_err(|source| io_error(dir, source))?;
    for entry in entries {
        let entry = entry.map_err(|source| io_error(dir, source))?;
        let path = entry.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut contents = DirectoryContents::default();
    for path in paths {
        let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
            continue;
        };
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        match extension.to_ascii_lowercase().as_str() {
            "json" => {
                let content = read(&path)?;
                let definition = parse_profile_from_str(&content, &file_name)?;
                tracing::debug!(file = %file_name, id = %definition.id, "Read profile definition");
                contents.profiles.push((file_name, definition));
            }
            "csv" => {
                let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                    continue;
                };
                let content = read(&path)?;
                let table = load_vocabulary_from_str(stem, &content, &file_name)?;
                tracing::debug!(file = %file_name, pairs = table.len(), "Read vocabulary");
                contents.vocabularies.push(table);
            }
            _ => {}
        }
    }
    Ok(contents)
}

pub(crate) fn insert_table(
    vocabularies: &mut Vocabularies,
    table: VocabularyTable,
    source_name: &str,
) -> Result<()> {
    vocabularies
        .insert(table)
        .map_err(|source| RegistryError::Vocabulary {
            source_name: source_name.to_string(),
            source,
        })
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| io_error(path, source))
}

fn io_error(path: &Path, source: std::io::Error) -> RegistryError {
    RegistryError::Io {
        path: PathBuf::from(path),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vocabulary_csv() {
        let table = load_vocabulary_from_str(
            "category",
            "canonical,localized\ntops, 상의\n\nbottoms,하의\n",
            "inline",
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.to_canonical("상의"), Some("tops"));
        assert!(table.is_bijective());
    }

    #[test]
    fn records_collisions_instead_of_failing() {
        let table = load_vocabulary_from_str(
            "category",
            "canonical,localized\ntops,상의\nshirts,상의\n",
            "inline",
        )
        .unwrap();
        assert_eq!(table.len(), 1);
        assert!(!table.is_bijective());
    }

    #[test]
    fn rejects_malformed_vocabulary() {
        let err = load_vocabulary_from_str("x", "canonical,localized\nonly-one-column\n", "x.csv")
            .unwrap_err();
        assert!(matches!(err, RegistryError::VocabularyRead { .. }));
    }

    #[test]
    fn rejects_malformed_profile_json() {
        let err = parse_profile_from_str("{\"id\": 1}", "broken.json").unwrap_err();
        assert!(matches!(err, RegistryError::ProfileParse { ref source_name, .. } if source_name == "broken.json"));
    }

    #[test]
    fn builtin_data_parses() {
        let vocabularies = builtin_vocabularies().unwrap();
        assert_eq!(vocabularies.names().collect::<Vec<_>>(), ["brand", "category"]);
        assert_eq!(builtin_definitions().unwrap().len(), 5);
    }
}
