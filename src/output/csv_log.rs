//! CSV result log with ids that continue across runs
//!
//! The log format is a plain comma-separated file:
//!
//! ```text
//! ID,URL,Status,Timestamp
//! 1,https://example.com/a,OK,2026-08-29 10:15:00
//! 2,https://example.com/b,ERROR: HTTP 404,2026-08-29 10:15:02
//! ```
//!
//! Ids are contiguous and strictly increasing within one file: each run
//! reads the last data row of the existing file and continues from its id.

use crate::crawler::CheckResult;
use crate::output::traits::ResultSink;
use crate::RakeError;
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

const HEADER: &str = "ID,URL,Status,Timestamp";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Appends check results to a CSV file
pub struct CsvResultLog {
    path: PathBuf,
}

impl CsvResultLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Determines the first id to assign this run
    ///
    /// Reads the existing log and uses last id + 1. Any parse failure falls
    /// back to 1 rather than aborting: a corrupt tail costs id continuity,
    /// not the run. A missing or header-only file also starts at 1.
    fn next_id(&self) -> u64 {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(_) => return 1,
        };

        let mut last_data_line: Option<String> = None;
        for line in BufReader::new(file).lines() {
            match line {
                Ok(l) if l.trim().is_empty() || l == HEADER => {}
                Ok(l) => last_data_line = Some(l),
                Err(_) => return 1,
            }
        }

        let line = match last_data_line {
            Some(line) => line,
            None => return 1,
        };

        match line.split(',').next().and_then(|id| id.trim().parse::<u64>().ok()) {
            Some(last_id) => last_id + 1,
            None => {
                tracing::warn!(
                    "Could not parse last id in {}, restarting ids at 1",
                    self.path.display()
                );
                1
            }
        }
    }
}

impl ResultSink for CsvResultLog {
    fn append(&self, results: &[CheckResult]) -> Result<(), RakeError> {
        let existed = self.path.exists();
        let mut next_id = if existed { self.next_id() } else { 1 };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        if !existed {
            writeln!(file, "{}", HEADER)?;
        }

        for result in results {
            let timestamp = Local::now().format(TIMESTAMP_FORMAT);
            // Commas in the status would break the row format
            let status = result.status.to_string().replace(',', " ");
            writeln!(file, "{},{},{},{}", next_id, result.url, status, timestamp)?;
            next_id += 1;
        }

        tracing::info!(
            "Wrote {} rows to {}",
            results.len(),
            self.path.display()
        );
        Ok(())
    }
}
