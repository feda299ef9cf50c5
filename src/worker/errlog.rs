//! Durable log of unanticipated per-entry failures

use chrono::Utc;
use std::fmt::Debug;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Appends failure details to a file shared by all workers
///
/// Each record is written with a single append so that blocks from
/// concurrent workers do not interleave.
#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records a failure for one entry
    ///
    /// Failing to write the log is reported through tracing only.
    pub fn record(&self, worker: usize, entry: &str, error: &dyn Debug) {
        let block = format!(
            "[{}] Scraper #{}\nEntry: {}\n{:?}\n\n",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
            worker,
            entry,
            error
        );

        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(block.as_bytes()));

        if let Err(e) = written {
            tracing::error!("Failed to write error log {}: {}", self.path.display(), e);
        }
    }
}
