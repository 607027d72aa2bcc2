//! Single-tile outputs.
//!
//! A declaration with one `mapID` is a byte-for-byte copy of that tile;
//! the image is never decoded or re-encoded.

use std::fs;
use std::path::PathBuf;

use crate::document::SingleSpec;
use crate::error::{Result, StitchError};
use crate::naming::PathAllocator;
use crate::output::{display_path, Printer};

use super::tile::TileSource;

/// Copies single tiles to uniquely named outputs.
#[derive(Debug, Clone)]
pub struct TileCopier {
    tiles: TileSource,
    allocator: PathAllocator,
}

impl TileCopier {
    pub fn new(tiles: TileSource, allocator: PathAllocator) -> Self {
        Self { tiles, allocator }
    }

    /// Copy the declared tile. Returns `None` when the source tile is missing.
    pub fn copy_single(&self, single: &SingleSpec, printer: &Printer) -> Result<Option<PathBuf>> {
        let Some(source) = self.tiles.locate(&single.tile_id) else {
            printer.warning(
                "Missing",
                &format!(
                    "tile not found: {}",
                    display_path(&self.tiles.path(&single.tile_id))
                ),
            );
            return Ok(None);
        };

        let output = self.allocator.allocate(&single.name);
        fs::copy(&source, &output)
            .map_err(|e| StitchError::io(&output, "Failed to copy tile", e))?;

        printer.success("Copied", &printer.cyan(&display_path(&output)));
        Ok(Some(output))
    }
}
