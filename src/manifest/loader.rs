use crate::error::{ExtractError, Result};
use crate::manifest::{ExtractionManifest, ManifestEntry};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Yaml,
    Json,
}

impl ManifestFormat {
    /// `.json` selects JSON; everything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => ManifestFormat::Json,
            _ => ManifestFormat::Yaml,
        }
    }
}

/// Reads and parses the manifest at `path`.
///
/// Fails with [`ExtractError::ManifestNotFound`] when the file cannot be read
/// and with [`ExtractError::ManifestParse`] when it is not a flat mapping of
/// string keys to string values.
pub fn load_manifest(path: &Path) -> Result<ExtractionManifest> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::InvalidData {
            ExtractError::ManifestParse {
                path: path.to_path_buf(),
                message: "manifest is not valid UTF-8 text".to_string(),
            }
        } else {
            ExtractError::ManifestNotFound {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let format = ManifestFormat::from_path(path);
    debug!(path = %path.display(), ?format, bytes = content.len(), "read manifest");

    parse_manifest(&content, format).map_err(|message| ExtractError::ManifestParse {
        path: path.to_path_buf(),
        message,
    })
}

/// Parses manifest text. The error is a bare message; [`load_manifest`]
/// attaches the source path.
pub fn parse_manifest(content: &str, format: ManifestFormat) -> std::result::Result<ExtractionManifest, String> {
    match format {
        ManifestFormat::Yaml => parse_yaml(content),
        ManifestFormat::Json => parse_json(content),
    }
}

fn parse_yaml(content: &str) -> std::result::Result<ExtractionManifest, String> {
    use serde_yaml::Value;

    let document: Value = serde_yaml::from_str(content).map_err(|e| e.to_string())?;

    let mapping = match document {
        Value::Mapping(mapping) => mapping,
        Value::Null => return Err("document is empty".to_string()),
        other => {
            return Err(format!(
                "expected a mapping of file paths to contents, found {}",
                yaml_kind(&other)
            ))
        }
    };

    let mut entries = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let path = match key {
            Value::String(s) => s,
            other => return Err(format!("file path keys must be strings, found {}", yaml_kind(&other))),
        };

        let content = match value {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => {
                return Err(format!(
                    "content of '{}' must be a string, found {}",
                    path,
                    yaml_kind(&other)
                ))
            }
        };

        entries.push(ManifestEntry::new(path, content));
    }

    Ok(ExtractionManifest::from_entries(entries))
}

fn parse_json(content: &str) -> std::result::Result<ExtractionManifest, String> {
    use serde_json::Value;

    let document: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;

    let object = match document {
        Value::Object(object) => object,
        other => {
            return Err(format!(
                "expected an object of file paths to contents, found {}",
                json_kind(&other)
            ))
        }
    };

    let mut entries = Vec::with_capacity(object.len());
    for (path, value) in object {
        let content = match value {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => {
                return Err(format!(
                    "content of '{}' must be a string, found {}",
                    path,
                    json_kind(&other)
                ))
            }
        };

        entries.push(ManifestEntry::new(path, content));
    }

    Ok(ExtractionManifest::from_entries(entries))
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    use serde_yaml::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a nested mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a nested object",
    }
}
