pub mod loader;
pub mod path;
pub mod tree;

pub use loader::{load_manifest, ManifestFormat};
pub use path::{normalize_entry_path, resolve_destination};
pub use tree::render_tree;

/// One `(relative path, content)` pair of a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub path: String,
    pub content: String,
}

impl ManifestEntry {
    pub fn new<P: Into<String>, C: Into<String>>(path: P, content: C) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// Flat, ordered mapping of relative file paths to file contents.
///
/// The directory tree is only implied by the keys; use [`render_tree`] when
/// a hierarchical view is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionManifest {
    entries: Vec<ManifestEntry>,
}

impl ExtractionManifest {
    /// Builds a manifest from entries in document order. Callers are
    /// responsible for key uniqueness; the loaders get it from the parser.
    pub fn from_entries(entries: Vec<ManifestEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.entries.iter().map(ManifestEntry::size).sum()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.path.as_str())
    }
}

impl<'a> IntoIterator for &'a ExtractionManifest {
    type Item = &'a ManifestEntry;
    type IntoIter = std::slice::Iter<'a, ManifestEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
