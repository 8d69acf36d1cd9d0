//! URL input loading.
//!
//! Reads one URL per line from a file or stdin (`-`). Lines are trimmed and
//! blank lines are skipped. Everything else becomes a task, even if it is not
//! a valid URL (a leading `#` included): malformed input is reported per task
//! as `INVALID_URL`, not dropped here.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::pool::UrlTask;

/// Path value that selects stdin.
pub const STDIN_PATH: &str = "-";

/// Loads tasks from `path`, or from stdin when `path` is `-`.
///
/// # Errors
///
/// Fails if the file cannot be opened or a line cannot be read (for example,
/// invalid UTF-8).
pub async fn load_tasks(path: &Path) -> Result<Vec<UrlTask>> {
    let tasks = if path.as_os_str() == STDIN_PATH {
        log::info!("Reading URLs from stdin");
        read_tasks(BufReader::new(tokio::io::stdin()))
            .await
            .context("Failed to read URLs from stdin")?
    } else {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Failed to open input file: {}", path.display()))?;
        read_tasks(BufReader::new(file))
            .await
            .with_context(|| format!("Failed to read input file: {}", path.display()))?
    };

    log::info!("Found {} URLs to process", tasks.len());
    Ok(tasks)
}

/// Reads tasks from any buffered async reader, numbering them 0..n.
pub async fn read_tasks<R>(reader: R) -> std::io::Result<Vec<UrlTask>>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut tasks = Vec::new();
    while let Some(line) = lines.next_line().await? {
        if let Some(url) = task_line(&line) {
            tasks.push(UrlTask::new(tasks.len(), url));
        }
    }
    Ok(tasks)
}

/// Returns the trimmed line if it should become a task.
fn task_line(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
