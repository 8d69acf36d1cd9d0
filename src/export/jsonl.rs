//! JSONL export.
//!
//! One JSON object per line for every classified task, in input order. Each
//! object carries `id`, `url`, `category` and the fields of that category, so
//! the file pipes straight into `jq`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::collector::AggregatedReport;
use crate::error_handling::ExportError;

use super::types::{ReportKind, WrittenFile};

/// Writes every record of `report` to `path` as JSON Lines.
///
/// Unlike the text reports, the file is created even when the report is empty.
///
/// # Errors
///
/// Returns `ExportError::Io` if the file cannot be created or written.
pub fn write_jsonl(report: &AggregatedReport, path: &Path) -> Result<WrittenFile, ExportError> {
    let io_err = |source: io::Error| ExportError::Io {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    let records = write_jsonl_to(report, &mut writer)?;
    writer.flush().map_err(io_err)?;

    Ok(WrittenFile {
        kind: ReportKind::Jsonl,
        path: path.to_path_buf(),
        records,
    })
}

/// Writes JSON Lines to any writer and returns the number of records.
pub fn write_jsonl_to<W: Write>(
    report: &AggregatedReport,
    writer: &mut W,
) -> Result<usize, ExportError> {
    let records = report.all_in_input_order();
    for record in &records {
        serde_json::to_writer(&mut *writer, record)?;
        writer.write_all(b"\n").map_err(|source| ExportError::Io {
            path: "<writer>".to_string(),
            source,
        })?;
    }
    Ok(records.len())
}
