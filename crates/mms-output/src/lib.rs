//! Export of transformed records.
//!
//! - [`ExportWriter`]: delimited export files in the layout of one profile
//! - [`write_failure_report`]: JSON report of failed records for review

mod error;
mod export;
mod report;

pub use error::{OutputError, Result};
pub use export::{ExportWriter, LIST_SEPARATOR, UTF8_BOM, export_to_path, export_to_string};
pub use report::{FailureEntry, failure_entries, write_failure_report, write_failure_report_to_path};
