use crate::config::OutputConfig;
use crate::error::{ExtractError, UserFriendlyError};
use crate::extractor::{DryRunPlan, ExtractionReport, FailedEntry};
use crate::manifest::render_tree;
use console::{style, Emoji, Term};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "+ ");
static CROSS: Emoji = Emoji("❌ ", "x ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");
static FOLDER: Emoji = Emoji("📁 ", "");
static CHART: Emoji = Emoji("📊 ", "");
static SPARKLES: Emoji = Emoji("✨ ", "* ");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    // Core messaging methods
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Warning, message),
            OutputMode::Json => self.print_json_message("warning", message),
            OutputMode::Plain => println!("WARNING: {}", message),
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("{}{}", ROCKET, style(operation).bold());
                    } else {
                        println!("> {}", operation);
                    }
                }
                OutputMode::Json => self.print_json_message("operation_start", operation),
                OutputMode::Plain => println!("STARTING: {}", operation),
            }
        }
    }

    // Per-entry trace
    pub fn entry_written(&self, path: &str, bytes: u64) {
        if self.quiet {
            return;
        }
        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}{}", CHECKMARK, style(path).green());
                } else {
                    println!("{}{}", CHECKMARK, path);
                }
                if self.verbose_level > 0 {
                    println!("    {}", format_bytes(bytes));
                }
            }
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "entry",
                "status": "written",
                "path": path,
                "bytes": bytes,
            })),
            OutputMode::Plain => println!("OK: {}", path),
        }
    }

    pub fn entry_failed(&self, failure: &FailedEntry) {
        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    eprintln!(
                        "{}{} - {}",
                        CROSS,
                        style(&failure.path).red().bold(),
                        failure.message
                    );
                } else {
                    eprintln!("{}{} - {}", CROSS, failure.path, failure.message);
                }
            }
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "entry",
                "status": "failed",
                "path": failure.path,
                "kind": failure.kind,
                "error": failure.message,
            })),
            OutputMode::Plain => eprintln!("FAILED: {} - {}", failure.path, failure.message),
        }
    }

    // User-friendly error handling
    pub fn print_user_friendly_error(&self, error: &ExtractError) {
        let user_message = error.user_message();
        self.error(&user_message);

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!("{}{}", INFO, style(format!("Suggestion: {}", suggestion)).cyan());
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => {
                    eprintln!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    // Summary and reporting
    pub fn print_extraction_report(&self, report: &ExtractionReport, output: &OutputConfig) {
        if self.quiet {
            // Failures were already reported on stderr.
            return;
        }

        match self.mode {
            OutputMode::Human => self.print_human_report(report, output),
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            OutputMode::Plain => self.print_plain_report(report, output),
        }
    }

    pub fn print_dry_run(&self, plan: &DryRunPlan) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(plan).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            OutputMode::Human | OutputMode::Plain => {
                self.print_header("Dry Run");
                println!("Manifest:         {}", plan.manifest_path.display());
                println!(
                    "Output directory: {}{}",
                    plan.output_root.display(),
                    if plan.output_root_exists { "" } else { " (will be created)" }
                );
                println!(
                    "Files:            {} ({})",
                    plan.entries.len(),
                    format_bytes(plan.total_bytes)
                );
                println!();
                print!("{}", render_tree(plan.entries.iter().map(String::as_str)));

                if !plan.rejected.is_empty() {
                    println!();
                    self.warning(&format!("{} entries would be rejected:", plan.rejected.len()));
                    for failure in &plan.rejected {
                        println!("  - {}", failure.message);
                    }
                }

                self.print_separator();
                println!("No files were written. Run without --dry-run to extract.");
            }
        }
    }

    pub fn print_header(&self, title: &str) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                println!();
                self.print_separator();
                if self.use_colors {
                    println!("{}{}", CHART, style(title).bold().cyan());
                } else {
                    println!("{}{}", CHART, title.to_uppercase());
                }
                self.print_separator();
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "header",
                    "title": title
                }));
            }
            OutputMode::Plain => {
                println!("=== {} ===", title);
            }
        }
    }

    pub fn print_separator(&self) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}", style("=".repeat(60)).dim());
                } else {
                    println!("{}", "=".repeat(60));
                }
            }
            OutputMode::Plain => {
                println!("{}", "-".repeat(60));
            }
            OutputMode::Json => {}
        }
    }

    // Private helper methods
    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        #[allow(clippy::type_complexity)]
        let (emoji, color_fn): (Emoji, Box<dyn Fn(&str) -> console::StyledObject<&str>>) =
            match msg_type {
                MessageType::Error => (CROSS, Box::new(|msg| style(msg).red().bold())),
                MessageType::Warning => (WARNING, Box::new(|msg| style(msg).yellow().bold())),
                MessageType::Info => (INFO, Box::new(|msg| style(msg).cyan())),
            };

        if self.use_colors {
            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, color_fn(message)),
                _ => println!("{}{}", emoji, color_fn(message)),
            }
        } else {
            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, message),
                _ => println!("{}{}", emoji, message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn print_human_report(&self, report: &ExtractionReport, output: &OutputConfig) {
        let summary = report.result.summary();
        self.print_header("Extraction Summary");

        let count = |n: usize| {
            if self.use_colors {
                style(n).cyan().bold().to_string()
            } else {
                n.to_string()
            }
        };

        println!("{}Successfully extracted: {} files", CHECKMARK, count(summary.succeeded_count));
        if summary.failed_count > 0 {
            println!("{}Failed to extract:      {} files", CROSS, count(summary.failed_count));
            println!();
            println!("Errors:");
            for failure in &summary.failures {
                println!("  - {}: {}", failure.path, failure.message);
            }
        }
        println!(
            "  Bytes written: {}   Time taken: {}",
            format_bytes(report.result.bytes_written()),
            format_duration(Duration::from_millis(report.duration_ms))
        );

        if output.show_tree && !report.succeeded().is_empty() {
            println!();
            print!("{}", render_tree(report.succeeded().iter().map(String::as_str)));
        }

        println!();
        println!("{}Project extracted to: {}", FOLDER, summary.output_root.display());

        self.print_missing_files(&report.missing_expected);

        if !output.next_steps.is_empty() {
            println!();
            println!("{}Next steps:", ROCKET);
            println!("  1. cd {}", display_relative(&summary.output_root));
            for (index, step) in output.next_steps.iter().enumerate() {
                println!("  {}. {}", index + 2, step);
            }
        }

        println!();
        println!("{}Done{}", SPARKLES, if summary.failed_count == 0 { "!" } else { " with errors." });
    }

    fn print_plain_report(&self, report: &ExtractionReport, output: &OutputConfig) {
        let summary = report.result.summary();
        println!("COMPLETED: Project extraction");
        println!("Succeeded: {}", summary.succeeded_count);
        println!("Failed: {}", summary.failed_count);
        for failure in &summary.failures {
            println!("Error: {}: {}", failure.path, failure.message);
        }
        println!("Output: {}", summary.output_root.display());
        println!("Duration: {}", format_duration(Duration::from_millis(report.duration_ms)));

        if output.show_tree && !report.succeeded().is_empty() {
            print!("{}", render_tree(report.succeeded().iter().map(String::as_str)));
        }

        for missing in &report.missing_expected {
            println!("WARNING: missing expected file: {}", missing);
        }
    }

    fn print_missing_files(&self, missing: &[String]) {
        if missing.is_empty() {
            return;
        }

        println!();
        self.warning("Missing expected files:");
        for file in missing {
            println!("   - {}", file);
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Error,
    Warning,
    Info,
}

/// Path relative to the working directory when it lies below it.
fn display_relative(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(|p| p.display().to_string()))
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}
