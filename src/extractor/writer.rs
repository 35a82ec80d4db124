use crate::error::{ExtractError, Result};
use crate::manifest::{normalize_entry_path, resolve_destination, ManifestEntry};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Creates `path` and any missing parents. Succeeds when the directory
/// already exists; fails when something other than a directory is in the way.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }

    fs::create_dir_all(path).map_err(|source| ExtractError::DirectoryCreate {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenEntry {
    /// Normalized manifest key.
    pub path: String,
    pub destination: PathBuf,
    pub bytes: u64,
}

pub struct FileWriter {
    buffer_size: usize,
}

impl FileWriter {
    pub fn new() -> Self {
        Self {
            buffer_size: 64 * 1024, // 64KB buffer
        }
    }

    /// Writes one manifest entry below `output_root`, replacing any existing
    /// file at the destination.
    pub fn write_entry(&self, output_root: &Path, entry: &ManifestEntry) -> Result<WrittenEntry> {
        let normalized = normalize_entry_path(&entry.path)?;
        let destination = resolve_destination(output_root, &normalized);

        if let Some(parent) = destination.parent() {
            ensure_directory(parent)?;
        }

        let bytes = self.write_contents(&destination, entry.content.as_bytes())?;

        Ok(WrittenEntry {
            path: normalized,
            destination,
            bytes,
        })
    }

    fn write_contents(&self, destination: &Path, contents: &[u8]) -> Result<u64> {
        let to_error = |source: std::io::Error| ExtractError::EntryWrite {
            path: destination.to_path_buf(),
            source,
        };

        let file = fs::File::create(destination).map_err(to_error)?;
        let mut writer = BufWriter::with_capacity(self.buffer_size, file);

        writer.write_all(contents).map_err(to_error)?;
        writer.flush().map_err(to_error)?;

        Ok(contents.len() as u64)
    }
}

impl Default for FileWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_directory_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b").join("c");

        ensure_directory(&nested).unwrap();
        ensure_directory(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_ensure_directory_collides_with_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("taken");
        fs::write(&file, "x").unwrap();

        let err = ensure_directory(&file.join("sub")).unwrap_err();
        match err {
            ExtractError::DirectoryCreate { path, .. } => assert_eq!(path, file.join("sub")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_write_entry_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let writer = FileWriter::new();

        let written = writer
            .write_entry(temp_dir.path(), &ManifestEntry::new("src/components/App.js", "export {};"))
            .unwrap();

        assert_eq!(written.path, "src/components/App.js");
        assert_eq!(written.bytes, 10);
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("src/components/App.js")).unwrap(),
            "export {};"
        );
    }

    #[test]
    fn test_write_entry_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("a.txt");
        fs::write(&target, "a much longer previous body").unwrap();

        FileWriter::new()
            .write_entry(temp_dir.path(), &ManifestEntry::new("a.txt", "new"))
            .unwrap();

        assert_eq!(fs::read_to_string(target).unwrap(), "new");
    }

    #[test]
    fn test_write_entry_onto_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("docs")).unwrap();

        let err = FileWriter::new()
            .write_entry(temp_dir.path(), &ManifestEntry::new("docs", "text"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::EntryWrite { .. }));
    }

    #[test]
    fn test_write_entry_rejects_traversal() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("out");
        fs::create_dir(&root).unwrap();

        let err = FileWriter::new()
            .write_entry(&root, &ManifestEntry::new("../escaped.txt", "nope"))
            .unwrap_err();

        assert!(matches!(err, ExtractError::UnsafeEntryPath { .. }));
        assert!(!temp_dir.path().join("escaped.txt").exists());
    }
}
