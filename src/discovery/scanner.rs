//! File system scanner for map definition files.
//!
//! Map definitions live flat in one directory; subdirectories are not
//! searched.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Result of scanning a directory for map definitions.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Discovered definition files, sorted by file name.
    pub files: Vec<PathBuf>,
}

impl ScanResult {
    /// Create a new empty scan result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total number of discovered files.
    pub fn total(&self) -> usize {
        self.files.len()
    }

    /// Check if no files were discovered.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Scan a directory for files ending in `.<extension>` (any case).
///
/// A missing directory yields an empty result; callers that need to tell
/// the two apart check for the directory first.
pub fn scan_directory(root: &Path, extension: &str) -> ScanResult {
    let mut result = ScanResult::new();

    if !root.is_dir() {
        return result;
    }

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !entry.file_type().is_file() {
            continue;
        }

        if is_definition_file(path, extension) {
            result.files.push(path.to_path_buf());
        }
    }

    result
}

/// Whether a file name ends with `.<extension>`, ignoring case.
pub fn is_definition_file(path: &Path, extension: &str) -> bool {
    let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };

    let suffix = format!(".{}", extension.to_lowercase());
    filename.to_lowercase().ends_with(&suffix)
}
