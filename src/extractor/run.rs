use crate::error::{ExtractError, Result};
use crate::extractor::result::{ExtractionProgress, ExtractionResult, FailedEntry};
use crate::extractor::writer::{ensure_directory, FileWriter};
use crate::manifest::{load_manifest, normalize_entry_path, ExtractionManifest};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    NotStarted,
    Running,
    Completed,
    FailedFatally,
}

/// Notifications emitted while a run makes progress, in order.
#[derive(Debug)]
pub enum RunEvent<'a> {
    Started {
        output_root: &'a Path,
        total_entries: usize,
    },
    EntryWritten {
        path: &'a str,
        bytes: u64,
    },
    EntryFailed(&'a FailedEntry),
}

/// Resolves the output directory to an absolute path without touching the
/// filesystem.
pub fn resolve_output_root(output_dir: &Path) -> Result<PathBuf> {
    std::path::absolute(output_dir).map_err(|source| ExtractError::OutputRootCreate {
        path: output_dir.to_path_buf(),
        source,
    })
}

/// One extraction of a manifest into an output directory.
///
/// Entries are written one at a time in manifest order. A failing entry is
/// recorded and skipped; only a missing/invalid manifest or an uncreatable
/// output root abort the run.
pub struct ExtractionRun {
    manifest_path: PathBuf,
    output_dir: PathBuf,
    writer: FileWriter,
    state: RunState,
}

impl ExtractionRun {
    pub fn new<M: Into<PathBuf>, O: Into<PathBuf>>(manifest_path: M, output_dir: O) -> Self {
        Self {
            manifest_path: manifest_path.into(),
            output_dir: output_dir.into(),
            writer: FileWriter::new(),
            state: RunState::NotStarted,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn execute(&mut self, on_event: Option<&dyn Fn(&RunEvent<'_>)>) -> Result<ExtractionResult> {
        if self.state != RunState::NotStarted {
            return Err(ExtractError::Internal {
                message: format!("extraction run cannot be restarted from state {:?}", self.state),
            });
        }

        let (manifest, output_root) = match self.prepare() {
            Ok(prepared) => prepared,
            Err(e) => {
                self.state = RunState::FailedFatally;
                return Err(e);
            }
        };

        self.state = RunState::Running;
        info!(
            manifest = %self.manifest_path.display(),
            output_root = %output_root.display(),
            entries = manifest.len(),
            "starting extraction"
        );

        if let Some(callback) = on_event {
            callback(&RunEvent::Started {
                output_root: &output_root,
                total_entries: manifest.len(),
            });
        }

        let progress = self.write_entries(&manifest, &output_root, on_event);
        let result = progress.finish(output_root);

        self.state = RunState::Completed;
        info!(
            succeeded = result.succeeded().len(),
            failed = result.failed().len(),
            "extraction completed"
        );

        Ok(result)
    }

    fn prepare(&self) -> Result<(ExtractionManifest, PathBuf)> {
        let manifest = load_manifest(&self.manifest_path)?;
        let output_root = resolve_output_root(&self.output_dir)?;

        ensure_directory(&output_root).map_err(|e| match e {
            ExtractError::DirectoryCreate { path, source } => ExtractError::OutputRootCreate { path, source },
            other => other,
        })?;

        Ok((manifest, output_root))
    }

    fn write_entries(
        &self,
        manifest: &ExtractionManifest,
        output_root: &Path,
        on_event: Option<&dyn Fn(&RunEvent<'_>)>,
    ) -> ExtractionProgress {
        let mut progress = ExtractionProgress::new(manifest.len());
        // Normalized keys seen so far; a later key that lands on the same file is refused.
        let mut claimed: HashSet<String> = HashSet::with_capacity(manifest.len());

        let fail = |progress: &mut ExtractionProgress, key: &str, e: &ExtractError| {
            let failure = FailedEntry::from_error(key, e);
            warn!(path = %failure.path, error = %failure.message, "entry failed");
            if let Some(callback) = on_event {
                callback(&RunEvent::EntryFailed(&failure));
            }
            progress.record_failure(failure);
        };

        for entry in manifest {
            let key = match normalize_entry_path(&entry.path) {
                Ok(key) => key,
                Err(e) => {
                    fail(&mut progress, entry.path.as_str(), &e);
                    continue;
                }
            };

            if !claimed.insert(key.clone()) {
                let e = ExtractError::UnsafeEntryPath {
                    path: entry.path.clone(),
                    reason: format!("duplicates an earlier entry for '{}'", key),
                };
                fail(&mut progress, entry.path.as_str(), &e);
                continue;
            }

            match self.writer.write_entry(output_root, entry) {
                Ok(written) => {
                    debug!(path = %written.path, bytes = written.bytes, "wrote entry");
                    if let Some(callback) = on_event {
                        callback(&RunEvent::EntryWritten {
                            path: &written.path,
                            bytes: written.bytes,
                        });
                    }
                    progress.record_success(written.path, written.bytes);
                }
                Err(e) => fail(&mut progress, key.as_str(), &e),
            }
        }

        progress
    }
}
