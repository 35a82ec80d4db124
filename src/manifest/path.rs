use crate::error::{ExtractError, Result};
use std::path::{Component, Path, PathBuf};

// Unix PATH_MAX; longer keys are rejected before touching the filesystem.
const MAX_ENTRY_PATH: usize = 4096;

/// Normalizes a manifest key into a safe, forward-slash relative path.
///
/// Empty and `.` segments are dropped. Keys that are empty, absolute,
/// contain `..`, contain NUL, end in `/` or carry a drive/UNC prefix are
/// rejected with [`ExtractError::UnsafeEntryPath`].
pub fn normalize_entry_path(key: &str) -> Result<String> {
    let reject = |reason: &str| ExtractError::UnsafeEntryPath {
        path: key.to_string(),
        reason: reason.to_string(),
    };

    if key.trim().is_empty() {
        return Err(reject("path is empty"));
    }
    if key.len() > MAX_ENTRY_PATH {
        return Err(reject("path is too long"));
    }
    if key.contains('\0') {
        return Err(reject("path contains a NUL byte"));
    }
    if key.starts_with('/') || key.starts_with('\\') {
        return Err(reject("absolute paths are not allowed"));
    }
    if key.ends_with('/') {
        return Err(reject("path names a directory, not a file"));
    }

    let mut segments = Vec::new();
    for segment in key.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return Err(reject("parent directory traversal is not allowed")),
            s => segments.push(s),
        }
    }

    if segments.is_empty() {
        return Err(reject("path does not name a file"));
    }

    let normalized = segments.join("/");

    // Catches platform prefixes such as `C:` that survive the split above.
    let escapes = Path::new(&normalized).components().any(|c| {
        matches!(c, Component::Prefix(_) | Component::RootDir | Component::ParentDir)
    });
    if escapes {
        return Err(reject("path is not relative to the output directory"));
    }

    Ok(normalized)
}

/// Joins a normalized entry path onto the output root.
pub fn resolve_destination(output_root: &Path, normalized: &str) -> PathBuf {
    normalized
        .split('/')
        .fold(output_root.to_path_buf(), |acc, segment| acc.join(segment))
}
