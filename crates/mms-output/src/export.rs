//! Delimited export files.
//!
//! One file per profile. The header row is the profile's target fields in
//! mapping order; fields a record did not produce are written as empty cells.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use mms_model::{Encoding, TargetRecord};
use mms_transform::{BatchReport, MappingProfile};

use crate::error::{OutputError, Result};

/// Separator used inside a cell for list values.
pub const LIST_SEPARATOR: &str = ",";

/// UTF-8 byte-order mark written for `UTF-8-BOM` profiles.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Streams records of one profile into a delimited file.
pub struct ExportWriter<W: Write> {
    writer: csv::Writer<W>,
    columns: Vec<String>,
    rows: usize,
}

impl<W: Write> ExportWriter<W> {
    /// Write the byte-order mark (if the profile asks for one) and the header row.
    pub fn new(mut inner: W, profile: &MappingProfile) -> Result<Self> {
        if profile.encoding() == Encoding::Utf8Bom {
            inner.write_all(UTF8_BOM)?;
        }
        let mut writer = csv::WriterBuilder::new()
            .delimiter(profile.delimiter().as_byte())
            .from_writer(inner);
        let columns: Vec<String> = profile.target_fields().map(str::to_string).collect();
        writer.write_record(&columns)?;
        Ok(Self {
            writer,
            columns,
            rows: 0,
        })
    }

    pub fn write_record(&mut self, record: &TargetRecord) -> Result<()> {
        let row = self.columns.iter().map(|column| {
            record
                .get(column)
                .map(|value| value.to_cell(LIST_SEPARATOR))
                .unwrap_or_default()
        });
        self.writer.write_record(row)?;
        self.rows += 1;
        Ok(())
    }

    /// Write every successful record of a batch. Returns the number written.
    pub fn write_successes(&mut self, report: &BatchReport) -> Result<usize> {
        let mut written = 0;
        for (_, outcome) in report.successes() {
            self.write_record(outcome.record())?;
            written += 1;
        }
        Ok(written)
    }

    /// Data rows written so far (header excluded).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and return the inner writer.
    pub fn finish(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|error| OutputError::Io(error.into_error()))
    }
}

/// Export the successful records of `report` to `path`, creating parent
/// directories. Returns the number of data rows.
pub fn export_to_path(path: &Path, profile: &MappingProfile, report: &BatchReport) -> Result<usize> {
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

    let mut writer = ExportWriter::new(BufWriter::new(file), profile)?;
    let rows = writer.write_successes(report)?;
    writer.finish()?.flush()?;

    tracing::info!(
        profile = %profile.id(),
        path = %path.display(),
        rows,
        "Export written"
    );
    Ok(rows)
}

/// Export successful records to an in-memory string.
pub fn export_to_string(profile: &MappingProfile, report: &BatchReport) -> Result<String> {
    let mut writer = ExportWriter::new(Vec::new(), profile)?;
    writer.write_successes(report)?;
    let bytes = writer.finish()?;
    String::from_utf8(bytes).map_err(|error| {
        OutputError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, error))
    })
}
