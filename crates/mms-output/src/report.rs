//! JSON failure reports.
//!
//! Failed records are not exported. Operators review them in a report that
//! keeps the partial output next to the errors that failed the record.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use mms_model::TargetRecord;
use mms_transform::{BatchReport, FieldError};
use serde::Serialize;

use crate::error::{OutputError, Result};

/// One failed record.
#[derive(Debug, Serialize)]
pub struct FailureEntry<'a> {
    pub profile: &'a str,
    /// Position of the record in the input.
    pub index: usize,
    pub errors: &'a [FieldError],
    pub partial: &'a TargetRecord,
}

/// Failure entries of several batches, in batch then input order.
pub fn failure_entries<'a, I>(reports: I) -> Vec<FailureEntry<'a>>
where
    I: IntoIterator<Item = &'a BatchReport>,
{
    reports
        .into_iter()
        .flat_map(|report| {
            report.failures().map(move |(index, outcome)| FailureEntry {
                profile: &report.profile_id,
                index,
                errors: outcome.errors(),
                partial: outcome.record(),
            })
        })
        .collect()
}

/// Write a pretty-printed JSON array of failures. Returns the entry count.
pub fn write_failure_report<'a, W, I>(mut writer: W, reports: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a BatchReport>,
{
    let entries = failure_entries(reports);
    serde_json::to_writer_pretty(&mut writer, &entries)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(entries.len())
}

/// [`write_failure_report`] to a file, creating parent directories.
pub fn write_failure_report_to_path<'a, I>(path: &Path, reports: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a BatchReport>,
{
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::Create {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let file = File::create(path).map_err(|source| OutputError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let count = write_failure_report(BufWriter::new(file), reports)?;
    tracing::info!(path = %path.display(), failures = count, "Failure report written");
    Ok(count)
}
