use crate::error::ExtractError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    UnsafePath,
    DirectoryCreate,
    Write,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedEntry {
    pub path: String,
    pub kind: FailureKind,
    pub message: String,
}

impl FailedEntry {
    pub fn from_error(path: &str, error: &ExtractError) -> Self {
        let kind = match error {
            ExtractError::UnsafeEntryPath { .. } => FailureKind::UnsafePath,
            ExtractError::DirectoryCreate { .. } => FailureKind::DirectoryCreate,
            _ => FailureKind::Write,
        };

        Self {
            path: path.to_string(),
            kind,
            message: error.to_string(),
        }
    }
}

/// Mutable accumulator owned by a single run.
#[derive(Debug, Clone)]
pub struct ExtractionProgress {
    pub succeeded: Vec<String>,
    pub failed: Vec<FailedEntry>,
    pub bytes_written: u64,
    pub start_time: Instant,
}

impl ExtractionProgress {
    pub fn new(total_entries: usize) -> Self {
        Self {
            succeeded: Vec::with_capacity(total_entries),
            failed: Vec::new(),
            bytes_written: 0,
            start_time: Instant::now(),
        }
    }

    pub fn record_success<S: Into<String>>(&mut self, path: S, bytes: u64) {
        self.succeeded.push(path.into());
        self.bytes_written += bytes;
    }

    pub fn record_failure(&mut self, failure: FailedEntry) {
        self.failed.push(failure);
    }

    /// Freezes the accumulator into the final result.
    pub fn finish(self, output_root: PathBuf) -> ExtractionResult {
        ExtractionResult {
            output_root,
            elapsed: self.start_time.elapsed(),
            succeeded: self.succeeded,
            failed: self.failed,
            bytes_written: self.bytes_written,
        }
    }
}

/// Outcome of a completed run. Read-only once produced.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    output_root: PathBuf,
    succeeded: Vec<String>,
    failed: Vec<FailedEntry>,
    bytes_written: u64,
    #[serde(skip)]
    elapsed: Duration,
}

impl ExtractionResult {
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn succeeded(&self) -> &[String] {
        &self.succeeded
    }

    pub fn failed(&self) -> &[FailedEntry] {
        &self.failed
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    pub fn summary(&self) -> ExtractionSummary {
        ExtractionSummary {
            succeeded_count: self.succeeded.len(),
            failed_count: self.failed.len(),
            failures: self.failed.clone(),
            output_root: self.output_root.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractionSummary {
    pub succeeded_count: usize,
    pub failed_count: usize,
    pub failures: Vec<FailedEntry>,
    pub output_root: PathBuf,
}
