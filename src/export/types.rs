//! Export types.

use std::path::PathBuf;

/// Which report a written file holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportKind {
    /// Cross-domain redirects
    CrossDomain,
    /// Same-domain redirects
    SameDomain,
    /// Invalid or failed URLs
    Invalid,
    /// Cross-domain redirects listed as potential open redirects
    Valid,
    /// Every record as JSON Lines
    Jsonl,
}

/// A file produced by an export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrittenFile {
    /// What the file contains
    pub kind: ReportKind,
    /// Where it was written
    pub path: PathBuf,
    /// Number of records in it
    pub records: usize,
}
