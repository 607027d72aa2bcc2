//! Source tile lookup.

use std::path::PathBuf;

use crate::document::TileId;
use crate::settings::Settings;

/// Resolves tile identifiers to files named `<prefix><id>.<ext>`.
#[derive(Debug, Clone)]
pub struct TileSource {
    dir: PathBuf,
    prefix: String,
    extension: String,
}

impl TileSource {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            extension: extension.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            &settings.tiles_dir,
            settings.tile_prefix.as_str(),
            settings.tile_extension.as_str(),
        )
    }

    /// File name of a tile, e.g. `map491.png`.
    pub fn file_name(&self, id: &TileId) -> String {
        format!("{}{}.{}", self.prefix, id, self.extension)
    }

    pub fn path(&self, id: &TileId) -> PathBuf {
        self.dir.join(self.file_name(id))
    }

    /// The tile's path, if the file exists.
    pub fn locate(&self, id: &TileId) -> Option<PathBuf> {
        let path = self.path(id);
        path.is_file().then_some(path)
    }
}
