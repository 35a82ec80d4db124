use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "extract")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract project files from a YAML or JSON manifest")]
#[command(
    long_about = "Reads a manifest mapping relative file paths to file contents and writes \
                  every entry below the output directory, creating folders as needed."
)]
#[command(disable_version_flag = true)]
#[command(after_help = "EXAMPLES:\n  \
    extract project-files.yaml\n  \
    extract files.yaml ./my-project\n  \
    extract files.json ~/Projects/app --tree\n  \
    extract files.yaml --dry-run\n  \
    extract files.yaml out --strict --output-format json")]
pub struct Cli {
    /// Manifest file mapping relative paths to file contents
    #[arg(value_name = "MANIFEST", required_unless_present = "generate_config")]
    pub manifest: Option<PathBuf>,

    /// Directory to extract files to (default: ./extracted-project)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Print version information
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: (),

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose diagnostics (--verbose, --verbose --verbose)
    #[arg(long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only errors are printed)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Exit with a non-zero status when any entry fails
    #[arg(long)]
    pub strict: bool,

    /// Print the extracted directory tree
    #[arg(long)]
    pub tree: bool,

    /// Expected file after extraction (repeatable, replaces configured list)
    #[arg(long = "expect", value_name = "PATH")]
    pub expect: Vec<String>,

    /// Skip the expected-files check
    #[arg(long, conflicts_with = "expect")]
    pub no_validate: bool,

    /// Show what would be extracted without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, conflicts_with = "manifest", help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        let expected = if self.expect.is_empty() {
            None
        } else {
            Some(self.expect.clone())
        };

        CliOverrides::new()
            .with_output_dir(self.output_dir.clone())
            .with_expected_files(expected)
            .with_no_validate(self.no_validate)
            .with_show_tree(self.tree)
            .with_strict(self.strict)
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_arguments() {
        let cli = Cli::try_parse_from(["extract", "files.yaml", "out"]).unwrap();
        assert_eq!(cli.manifest, Some(PathBuf::from("files.yaml")));
        assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
        assert_eq!(cli.output_format, OutputFormat::Human);
    }

    #[test]
    fn test_output_dir_is_optional() {
        let cli = Cli::try_parse_from(["extract", "files.yaml"]).unwrap();
        assert!(cli.output_dir.is_none());
    }

    #[test]
    fn test_manifest_is_required() {
        let err = Cli::try_parse_from(["extract"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_generate_config_needs_no_manifest() {
        let cli = Cli::try_parse_from(["extract", "--generate-config"]).unwrap();
        assert!(cli.generate_config);
        assert!(cli.manifest.is_none());
    }

    #[test]
    fn test_generate_config_rejects_manifest() {
        let err = Cli::try_parse_from(["extract", "files.yaml", "--generate-config"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_short_version_flag() {
        let err = Cli::try_parse_from(["extract", "-v"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_help_flag() {
        let err = Cli::try_parse_from(["extract", "-h"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_overrides_from_flags() {
        let cli = Cli::try_parse_from([
            "extract", "files.yaml", "out", "--strict", "--tree", "--expect", "Cargo.toml", "--expect",
            "src/main.rs",
        ])
        .unwrap();

        let overrides = cli.create_cli_overrides();
        assert_eq!(overrides.output_dir, Some(PathBuf::from("out")));
        assert_eq!(
            overrides.expected_files,
            Some(vec!["Cargo.toml".to_string(), "src/main.rs".to_string()])
        );
        assert!(overrides.strict);
        assert!(overrides.show_tree);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["extract", "files.yaml", "--quiet", "--verbose"]).is_err());
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli::try_parse_from(["extract", "files.yaml", "--verbose", "--verbose"]).unwrap();
        assert_eq!(cli.verbosity_level(), 2);
    }
}
