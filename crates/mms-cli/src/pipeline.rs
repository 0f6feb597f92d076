//! Input loading and batch execution for `mms transform`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mms_model::SourceRecord;
use mms_profiles::ProfileRegistry;
use mms_transform::{BatchReport, MappingProfile};
use serde_json::Value;
use tracing::info_span;

/// Parse input JSON: a single record object or an array of them.
pub fn parse_records(content: &str) -> Result<Vec<SourceRecord>> {
    let value: Value = serde_json::from_str(content).context("parse input JSON")?;
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                SourceRecord::from_json(item).with_context(|| format!("input record {index}"))
            })
            .collect(),
        single => Ok(vec![SourceRecord::from_json(single).context("input record")?]),
    }
}

/// Read and parse an input file.
pub fn read_records(path: &Path) -> Result<Vec<SourceRecord>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_records(&content).with_context(|| format!("load records from {}", path.display()))
}

/// Apply every profile to the same records, one batch per profile.
pub fn run_profiles(
    registry: &ProfileRegistry,
    profiles: &[&MappingProfile],
    records: &[SourceRecord],
) -> Vec<BatchReport> {
    let engine = registry.engine();
    profiles
        .iter()
        .map(|profile| {
            let span = info_span!("profile", id = %profile.id());
            let _guard = span.enter();
            engine.transform_batch(records, profile)
        })
        .collect()
}

/// Export path for one profile.
///
/// A single profile writes to `output` as given. When several profiles run,
/// the profile id is inserted before the extension (`out.csv` becomes
/// `out.naver-smartstore.csv`) so exports do not overwrite each other.
pub fn export_path(output: &Path, profile_id: &str, profile_count: usize) -> PathBuf {
    if profile_count <= 1 {
        return output.to_path_buf();
    }
    let stem = output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match output.extension() {
        Some(extension) => format!("{stem}.{profile_id}.{}", extension.to_string_lossy()),
        None => format!("{stem}.{profile_id}"),
    };
    output.with_file_name(file_name)
}
