use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Manifest not found or unreadable: {path}")]
    ManifestNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    #[error("Failed to create output directory {path}: {source}")]
    OutputRootCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    EntryWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsafe entry path '{path}': {reason}")]
    UnsafeEntryPath { path: String, reason: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected internal failure: {message}")]
    Internal { message: String },
}

impl ExtractError {
    /// Fatal errors abort the whole run; everything else is scoped to one entry.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ExtractError::DirectoryCreate { .. }
                | ExtractError::EntryWrite { .. }
                | ExtractError::UnsafeEntryPath { .. }
        )
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            ExtractError::ManifestNotFound { .. } => 3,
            ExtractError::ManifestParse { .. } => 4,
            ExtractError::OutputRootCreate { .. } => 5,
            _ => 1,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for ExtractError {
    fn user_message(&self) -> String {
        match self {
            ExtractError::ManifestNotFound { path, source } => {
                format!("Manifest file not found or unreadable: {} ({})", path.display(), source)
            }
            ExtractError::ManifestParse { path, message } => {
                format!("Manifest {} is not a valid file mapping: {}", path.display(), message)
            }
            ExtractError::OutputRootCreate { path, source } => {
                format!("Cannot create output directory {}: {}", path.display(), source)
            }
            ExtractError::UnsafeEntryPath { path, reason } => {
                format!("Refusing to write '{}': {}", path, reason)
            }
            ExtractError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            ExtractError::ManifestNotFound { .. } => Some(
                "Check the manifest path. Relative paths are resolved against the current directory.".to_string()
            ),
            ExtractError::ManifestParse { .. } => Some(
                "The manifest must be a flat mapping of relative file paths to string contents (e.g. `src/index.js: |` followed by the file body).".to_string()
            ),
            ExtractError::OutputRootCreate { .. } => Some(
                "Choose a different output directory or make sure no regular file sits at that path and you have write permission.".to_string()
            ),
            ExtractError::Config { .. } => Some(
                "Check your configuration file syntax or regenerate it with --generate-config.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for ExtractError {
    fn from(error: toml::de::Error) -> Self {
        ExtractError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
