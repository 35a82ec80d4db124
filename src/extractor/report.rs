use crate::extractor::result::{ExtractionResult, FailedEntry};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Everything the formatter needs to present a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub manifest_path: PathBuf,
    pub extracted_at: DateTime<Utc>,
    pub duration_ms: u64,
    #[serde(flatten)]
    pub result: ExtractionResult,
    pub missing_expected: Vec<String>,
    pub strict: bool,
}

impl ExtractionReport {
    pub fn new(manifest_path: &Path, result: ExtractionResult, missing_expected: Vec<String>, strict: bool) -> Self {
        Self {
            manifest_path: manifest_path.to_path_buf(),
            extracted_at: Utc::now(),
            duration_ms: result.elapsed().as_millis() as u64,
            result,
            missing_expected,
            strict,
        }
    }

    pub fn output_root(&self) -> &Path {
        self.result.output_root()
    }

    pub fn succeeded(&self) -> &[String] {
        self.result.succeeded()
    }

    pub fn failed(&self) -> &[FailedEntry] {
        self.result.failed()
    }

    /// 0 unless strict mode is on and at least one entry failed.
    pub fn exit_code(&self) -> i32 {
        if self.strict && self.result.has_failures() {
            6
        } else {
            0
        }
    }
}

/// What `--dry-run` would do, computed without writing anything.
#[derive(Debug, Clone, Serialize)]
pub struct DryRunPlan {
    pub manifest_path: PathBuf,
    pub output_root: PathBuf,
    pub output_root_exists: bool,
    pub entries: Vec<String>,
    pub rejected: Vec<FailedEntry>,
    pub total_bytes: u64,
}
