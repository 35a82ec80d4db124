use crate::extractor::result::ExtractionResult;
use crate::manifest::normalize_entry_path;
use std::collections::HashSet;

/// Files a scaffolded JavaScript project is expected to contain.
pub const DEFAULT_EXPECTED_FILES: &[&str] = &[
    "package.json",
    "src/App.js",
    "src/index.js",
    "public/index.html",
];

/// Advisory check that a run produced a set of expected files.
#[derive(Debug, Clone)]
pub struct ProjectValidator {
    expected: Vec<String>,
}

impl ProjectValidator {
    pub fn new<I, S>(expected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            expected: expected.into_iter().map(Into::into).collect(),
        }
    }

    /// Expected paths absent from the succeeded set, in configured order.
    pub fn missing_files(&self, result: &ExtractionResult) -> Vec<String> {
        let written: HashSet<&str> = result.succeeded().iter().map(String::as_str).collect();

        self.expected
            .iter()
            .filter(|expected| {
                let key = normalize_entry_path(expected).unwrap_or_else(|_| expected.to_string());
                !written.contains(key.as_str())
            })
            .cloned()
            .collect()
    }
}

impl Default for ProjectValidator {
    fn default() -> Self {
        Self::new(DEFAULT_EXPECTED_FILES.iter().copied())
    }
}
