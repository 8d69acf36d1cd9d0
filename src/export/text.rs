//! Plain-text report files.
//!
//! Redirect records are written as `FROM:`/`TO:` blocks and failures as
//! `URL:`/`STATUS:`/`REASON:` blocks, each followed by a blank line. A
//! category with no records produces no file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::classify::Classification;
use crate::collector::{AggregatedReport, ClassifiedTask};
use crate::config::OutputPaths;
use crate::error_handling::ExportError;

use super::types::{ReportKind, WrittenFile};

/// Writes the four text reports for `report`.
///
/// The "valid redirects" file repeats the cross-domain records, since those
/// are the potential open redirects. Records are written in the order they
/// appear in `report`.
///
/// # Errors
///
/// Returns `ExportError::Io` for the first file that cannot be written.
pub fn write_text_reports(
    report: &AggregatedReport,
    outputs: &OutputPaths,
) -> Result<Vec<WrittenFile>, ExportError> {
    let plan = [
        (ReportKind::CrossDomain, &outputs.cross_domain, &report.cross_domain),
        (ReportKind::SameDomain, &outputs.same_domain, &report.same_domain),
        (ReportKind::Invalid, &outputs.invalid, &report.invalid),
        (ReportKind::Valid, &outputs.valid, &report.cross_domain),
    ];

    let mut written = Vec::new();
    for (kind, path, records) in plan {
        if records.is_empty() {
            log::debug!("No {:?} records, skipping {}", kind, path.display());
            continue;
        }
        write_records(path, records)?;
        written.push(WrittenFile {
            kind,
            path: path.clone(),
            records: records.len(),
        });
    }
    Ok(written)
}

fn write_records(path: &Path, records: &[ClassifiedTask]) -> Result<(), ExportError> {
    let io_err = |source: io::Error| ExportError::Io {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    for record in records {
        write_record(&mut writer, record).map_err(io_err)?;
    }
    writer.flush().map_err(io_err)
}

/// Renders one record as a text block.
pub fn write_record<W: Write>(writer: &mut W, record: &ClassifiedTask) -> io::Result<()> {
    match &record.classification {
        Classification::CrossDomain {
            initial_domain,
            final_domain,
            final_url,
            hop_count,
        } => {
            writeln!(writer, "FROM: {}", record.url)?;
            writeln!(writer, "  TO: {} ({} redirects)", final_url, hop_count)?;
            writeln!(writer, "  Initial Domain: {}", initial_domain)?;
            writeln!(writer, "  Final Domain:   {}", final_domain)?;
        }
        Classification::SameDomain {
            domain,
            final_url,
            hop_count,
        } => {
            writeln!(writer, "FROM: {}", record.url)?;
            writeln!(writer, "  TO: {} ({} redirects)", final_url, hop_count)?;
            writeln!(writer, "  Domain: {}", domain)?;
        }
        Classification::Invalid { stage, detail } => {
            writeln!(writer, "URL: {}", record.url)?;
            writeln!(writer, "  STATUS: {}", stage)?;
            writeln!(writer, "  REASON: {}", detail)?;
        }
    }
    writeln!(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::FailureStage;
    use tempfile::TempDir;

    fn cross(id: usize) -> ClassifiedTask {
        ClassifiedTask {
            id,
            url: "http://short.test/x".to_string(),
            classification: Classification::CrossDomain {
                initial_domain: "short.test".to_string(),
                final_domain: "long.test".to_string(),
                final_url: "http://long.test/y".to_string(),
                hop_count: 1,
            },
        }
    }

    fn invalid(id: usize) -> ClassifiedTask {
        ClassifiedTask {
            id,
            url: "http://loop.test/a".to_string(),
            classification: Classification::Invalid {
                stage: FailureStage::TooManyRedirects,
                detail: "Exceeded maximum of 3 redirects".to_string(),
            },
        }
    }

    fn outputs_in(dir: &TempDir) -> OutputPaths {
        OutputPaths {
            cross_domain: dir.path().join("cross.txt"),
            same_domain: dir.path().join("same.txt"),
            invalid: dir.path().join("invalid.txt"),
            valid: dir.path().join("valid.txt"),
            jsonl: None,
        }
    }

    fn render(record: &ClassifiedTask) -> String {
        let mut buf = Vec::new();
        write_record(&mut buf, record).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_cross_domain_block() {
        assert_eq!(
            render(&cross(0)),
            "FROM: http://short.test/x\n  TO: http://long.test/y (1 redirects)\n  Initial Domain: short.test\n  Final Domain:   long.test\n\n"
        );
    }

    #[test]
    fn test_same_domain_block() {
        let record = ClassifiedTask {
            id: 0,
            url: "https://a.test/".to_string(),
            classification: Classification::SameDomain {
                domain: "a.test".to_string(),
                final_url: "https://www.a.test/".to_string(),
                hop_count: 2,
            },
        };
        assert_eq!(
            render(&record),
            "FROM: https://a.test/\n  TO: https://www.a.test/ (2 redirects)\n  Domain: a.test\n\n"
        );
    }

    #[test]
    fn test_invalid_block_uses_stable_stage_name() {
        assert_eq!(
            render(&invalid(0)),
            "URL: http://loop.test/a\n  STATUS: TOO_MANY_REDIRECTS\n  REASON: Exceeded maximum of 3 redirects\n\n"
        );
    }

    #[test]
    fn test_empty_categories_create_no_files() {
        let dir = TempDir::new().unwrap();
        let outputs = outputs_in(&dir);
        let report = AggregatedReport {
            invalid: vec![invalid(0)],
            processed: 1,
            ..Default::default()
        };

        let written = write_text_reports(&report, &outputs).unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].kind, ReportKind::Invalid);
        assert!(outputs.invalid.exists());
        assert!(!outputs.cross_domain.exists());
        assert!(!outputs.same_domain.exists());
        assert!(!outputs.valid.exists());
    }

    #[test]
    fn test_valid_file_repeats_cross_domain_records() {
        let dir = TempDir::new().unwrap();
        let outputs = outputs_in(&dir);
        let report = AggregatedReport {
            cross_domain: vec![cross(0), cross(1)],
            processed: 2,
            ..Default::default()
        };

        let written = write_text_reports(&report, &outputs).unwrap();
        let kinds: Vec<ReportKind> = written.iter().map(|w| w.kind).collect();
        assert_eq!(kinds, vec![ReportKind::CrossDomain, ReportKind::Valid]);

        let cross_text = std::fs::read_to_string(&outputs.cross_domain).unwrap();
        let valid_text = std::fs::read_to_string(&outputs.valid).unwrap();
        assert_eq!(cross_text, valid_text);
        assert_eq!(cross_text.matches("FROM: ").count(), 2);
    }

    #[test]
    fn test_unwritable_path_reports_io_error() {
        let dir = TempDir::new().unwrap();
        let mut outputs = outputs_in(&dir);
        outputs.invalid = dir.path().join("no-such-dir").join("invalid.txt");
        let report = AggregatedReport {
            invalid: vec![invalid(0)],
            processed: 1,
            ..Default::default()
        };

        match write_text_reports(&report, &outputs) {
            Err(ExportError::Io { path, .. }) => assert!(path.ends_with("invalid.txt")),
            other => panic!("expected Io error, got {:?}", other),
        }
    }
}
