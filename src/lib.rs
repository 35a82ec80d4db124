//! Materializes a flat manifest of `relative path -> file content` pairs as a
//! directory tree.
//!
//! ```no_run
//! let result = manifest_extract::extract("project-files.yaml", "./my-project")?;
//! println!("{} written, {} failed", result.succeeded().len(), result.failed().len());
//! # Ok::<(), manifest_extract::ExtractError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod manifest;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, OutputConfig, RunConfig, ValidationConfig};
pub use error::{ExtractError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{
    DryRunPlan, ExtractionReport, ExtractionResult, ExtractionRun, ExtractionSummary, FailedEntry,
    FailureKind, FileWriter, ProjectValidator, RunEvent, RunState,
};
pub use manifest::{load_manifest, ExtractionManifest, ManifestEntry};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use indicatif::ProgressBar;
use std::cell::OnceCell;
use std::path::Path;

/// Extracts `manifest_path` into `output_dir` without any console output.
pub fn extract<M: AsRef<Path>, O: AsRef<Path>>(manifest_path: M, output_dir: O) -> Result<ExtractionResult> {
    ExtractionRun::new(manifest_path.as_ref(), output_dir.as_ref()).execute(None)
}

/// Main library interface: a configured extraction with console reporting.
pub struct Extractor {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl Extractor {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(output_mode == OutputMode::Human && !quiet);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create an Extractor from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(config, output_mode, cli_args.verbosity_level(), cli_args.quiet))
    }

    /// Extracts the manifest into the configured output directory.
    ///
    /// Per-entry failures end up in the report; only fatal errors are
    /// returned as `Err`.
    pub fn run(&self, manifest_path: &Path) -> Result<ExtractionReport> {
        self.output_formatter.start_operation("Starting project extraction");

        let progress_bar: OnceCell<ProgressBar> = OnceCell::new();
        let formatter = &self.output_formatter;
        let progress = &self.progress_manager;

        let on_event = |event: &RunEvent<'_>| match event {
            RunEvent::Started {
                output_root,
                total_entries,
            } => {
                formatter.info(&format!(
                    "Extracting {} files to {}",
                    total_entries,
                    output_root.display()
                ));
                let _ = progress_bar.set(progress.create_entry_progress(*total_entries as u64));
            }
            RunEvent::EntryWritten { path, bytes } => {
                progress.suspend(progress_bar.get(), || formatter.entry_written(path, *bytes));
                if let Some(pb) = progress_bar.get() {
                    ui::progress::advance(pb, path);
                }
            }
            RunEvent::EntryFailed(failure) => {
                progress.suspend(progress_bar.get(), || formatter.entry_failed(failure));
                if let Some(pb) = progress_bar.get() {
                    ui::progress::advance(pb, &failure.path);
                }
            }
        };

        let mut run = ExtractionRun::new(manifest_path, &self.config.output.default_directory);
        let outcome = run.execute(Some(&on_event));

        if let Some(pb) = progress_bar.get() {
            ui::progress::finish(pb);
        }

        let result = outcome?;
        self.output_formatter
            .debug(&format!("Run finished in state {:?}", run.state()));

        let missing = if self.config.validation.enabled {
            ProjectValidator::new(self.config.validation.expected_files.iter().cloned())
                .missing_files(&result)
        } else {
            Vec::new()
        };

        Ok(ExtractionReport::new(
            manifest_path,
            result,
            missing,
            self.config.run.strict,
        ))
    }

    /// Loads the manifest and resolves the output root without writing.
    pub fn dry_run(&self, manifest_path: &Path) -> Result<DryRunPlan> {
        let loaded = load_manifest(manifest_path)?;
        let output_root = extractor::resolve_output_root(&self.config.output.default_directory)?;

        let mut entries: Vec<String> = Vec::with_capacity(loaded.len());
        let mut rejected = Vec::new();
        for key in loaded.paths() {
            match manifest::normalize_entry_path(key) {
                Ok(path) if entries.contains(&path) => {
                    let e = ExtractError::UnsafeEntryPath {
                        path: key.to_string(),
                        reason: format!("duplicates an earlier entry for '{}'", path),
                    };
                    rejected.push(FailedEntry::from_error(key, &e));
                }
                Ok(path) => entries.push(path),
                Err(e) => rejected.push(FailedEntry::from_error(key, &e)),
            }
        }

        Ok(DryRunPlan {
            manifest_path: manifest_path.to_path_buf(),
            output_root_exists: output_root.is_dir(),
            output_root,
            entries,
            rejected,
            total_bytes: loaded.total_bytes(),
        })
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &ExtractError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
