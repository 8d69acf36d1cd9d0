//! Export of classified results.
//!
//! This module writes an `AggregatedReport` to the per-category text reports
//! and, optionally, to a JSON Lines file.

mod jsonl;
mod text;
mod types;

pub use jsonl::{write_jsonl, write_jsonl_to};
pub use text::{write_record, write_text_reports};
pub use types::{ReportKind, WrittenFile};

use crate::collector::AggregatedReport;
use crate::config::OutputPaths;
use crate::error_handling::ExportError;

/// Writes every configured output for `report`.
///
/// # Errors
///
/// Returns the first `ExportError` encountered; files written before it are
/// left in place.
pub fn write_reports(
    report: &AggregatedReport,
    outputs: &OutputPaths,
) -> Result<Vec<WrittenFile>, ExportError> {
    let mut written = write_text_reports(report, outputs)?;
    if let Some(path) = &outputs.jsonl {
        written.push(write_jsonl(report, path)?);
    }
    Ok(written)
}
