//! Map definition loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, StitchError};

use super::value::Node;

/// Top-level key holding the map store.
pub const STORE_KEY: &str = "PlayerMapStore";

/// Key inside the store holding the list of output declarations.
pub const LIST_KEY: &str = "mapList";

/// A parsed map definition file.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Where the document was read from (`<inline>` for parsed strings).
    pub path: PathBuf,
    root: Node,
}

impl Document {
    /// Parse a document from YAML source.
    pub fn parse(source: &str) -> Result<Self> {
        Self::parse_at(source, Path::new("<inline>"))
    }

    fn parse_at(source: &str, path: &Path) -> Result<Self> {
        // An empty file is a document with nothing in it
        let root = if source.trim().is_empty() {
            Node::Null
        } else {
            let value: serde_yaml::Value =
                serde_yaml::from_str(source).map_err(|e| StitchError::Parse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                    help: Some(format!("Expected a {}.{} list", STORE_KEY, LIST_KEY)),
                })?;
            Node::from(value)
        };

        Ok(Self {
            path: path.to_path_buf(),
            root,
        })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The raw output declarations under `PlayerMapStore.mapList`.
    ///
    /// A missing store, missing list, or a list of the wrong type all
    /// yield no entries.
    pub fn entries(&self) -> &[Node] {
        self.root
            .field(STORE_KEY)
            .field(LIST_KEY)
            .present()
            .and_then(Node::as_sequence)
            .unwrap_or(&[])
    }
}

/// Read and parse a map definition file.
pub fn load(path: &Path) -> Result<Document> {
    let source = fs::read_to_string(path)
        .map_err(|e| StitchError::io(path, "Failed to read map definition", e))?;

    Document::parse_at(&source, path)
}
