use clap::Parser;
use manifest_extract::ui::init_logging;
use manifest_extract::{Cli, ExtractError, Extractor, OutputFormatter, OutputMode, UserFriendlyError};
use std::any::Any;
use std::panic;
use std::path::Path;
use std::process;
use tracing::error;

fn main() {
    // Panics are reported and mapped to exit code 1.
    let exit_code = match panic::catch_unwind(run) {
        Ok(code) => code,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!(%message, "unexpected failure");
            eprintln!("Fatal error: {}", message);
            1
        }
    };
    process::exit(exit_code);
}

fn run() -> i32 {
    // Help, version and usage errors exit inside clap.
    let cli = Cli::parse();
    init_logging(cli.verbosity_level());

    // clap only lets MANIFEST be absent together with --generate-config.
    let Some(manifest) = cli.manifest.as_deref() else {
        return handle_generate_config(&cli);
    };

    let extractor = match Extractor::from_cli(&cli) {
        Ok(extractor) => extractor,
        Err(e) => {
            print_startup_error(&e);
            return e.exit_code();
        }
    };

    if cli.dry_run {
        return handle_dry_run(&extractor, manifest);
    }

    match extractor.run(manifest) {
        Ok(report) => {
            extractor
                .output_formatter()
                .print_extraction_report(&report, &extractor.config().output);
            report.exit_code()
        }
        Err(e) => {
            error!(error = %e, fatal = e.is_fatal(), "extraction aborted");
            extractor.handle_error(&e);
            e.exit_code()
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "extract.toml".to_string());

    match Extractor::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  extract <manifest> --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            1
        }
    }
}

fn handle_dry_run(extractor: &Extractor, manifest: &Path) -> i32 {
    match extractor.dry_run(manifest) {
        Ok(plan) => {
            extractor.output_formatter().print_dry_run(&plan);
            0
        }
        Err(e) => {
            extractor.handle_error(&e);
            e.exit_code()
        }
    }
}

fn print_startup_error(error: &ExtractError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
