//! Output file naming.
//!
//! Declaration names come straight from user-written YAML, so they are
//! sanitized before touching the filesystem, and existing files are never
//! overwritten: a taken name gets a `_1`, `_2`, ... suffix instead.

use std::path::PathBuf;

/// Characters that are not allowed in output filenames.
pub const FORBIDDEN_CHARS: [char; 9] = ['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Replace every forbidden filename character with `_`.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if FORBIDDEN_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Allocates collision-free output paths inside one directory.
///
/// Allocation only checks the filesystem; the caller is expected to create
/// the file right away so later allocations see it.
#[derive(Debug, Clone)]
pub struct PathAllocator {
    dir: PathBuf,
    extension: String,
}

impl PathAllocator {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    /// Find the first free path among `<name>.<ext>`, `<name>_1.<ext>`, ...
    pub fn allocate(&self, base_name: &str) -> PathBuf {
        let safe = sanitize(base_name);

        let first = self.candidate(&safe);
        if !first.exists() {
            return first;
        }

        (1u64..)
            .map(|n| self.candidate(&format!("{}_{}", safe, n)))
            .find(|path| !path.exists())
            .unwrap_or(first)
    }

    fn candidate(&self, stem: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", stem, self.extension))
    }
}
