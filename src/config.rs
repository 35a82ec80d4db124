use crate::error::{ExtractError, Result};
use crate::extractor::DEFAULT_EXPECTED_FILES;
use crate::manifest::normalize_entry_path;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIRECTORY: &str = "./extracted-project";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub validation: ValidationConfig,
    pub run: RunConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub default_directory: PathBuf,
    pub show_tree: bool,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub enabled: bool,
    pub expected_files: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RunConfig {
    /// Exit non-zero when any entry failed.
    pub strict: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_directory: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
            show_tree: false,
            next_steps: vec!["npm install".to_string(), "npm start".to_string()],
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            expected_files: DEFAULT_EXPECTED_FILES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ExtractError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ExtractError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ExtractError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["extract.toml", ".extract.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref output_dir) = cli_args.output_dir {
            self.output.default_directory = output_dir.clone();
        }

        if let Some(ref expected) = cli_args.expected_files {
            self.validation.expected_files = expected.clone();
            self.validation.enabled = true;
        }

        if cli_args.no_validate {
            self.validation.enabled = false;
        }

        if cli_args.show_tree {
            self.output.show_tree = true;
        }

        if cli_args.strict {
            self.run.strict = true;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| ExtractError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| ExtractError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.output.default_directory.as_os_str().is_empty() {
            return Err(ExtractError::Config {
                message: "Default output directory must not be empty".to_string(),
            });
        }

        for expected in &self.validation.expected_files {
            if normalize_entry_path(expected).is_err() {
                return Err(ExtractError::Config {
                    message: format!(
                        "Expected file '{}' must be a relative path inside the output directory",
                        expected
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub output_dir: Option<PathBuf>,
    pub expected_files: Option<Vec<String>>,
    pub no_validate: bool,
    pub show_tree: bool,
    pub strict: bool,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_expected_files(mut self, expected: Option<Vec<String>>) -> Self {
        self.expected_files = expected;
        self
    }

    pub fn with_no_validate(mut self, no_validate: bool) -> Self {
        self.no_validate = no_validate;
        self
    }

    pub fn with_show_tree(mut self, show_tree: bool) -> Self {
        self.show_tree = show_tree;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
