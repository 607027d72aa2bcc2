//! Grid compositing.
//!
//! Tiles are placed row-major onto a transparent canvas of
//! `columns * tile_size` by `rows * tile_size` pixels. Tile `i` lands in
//! column `i % columns` and row `i / columns`. Pixels are copied straight,
//! alpha included, with no blending.

use std::path::{Path, PathBuf};

use image::{imageops, ImageReader, RgbaImage};

use crate::document::{GridSpec, TileId};
use crate::error::{Result, StitchError};
use crate::naming::PathAllocator;
use crate::output::{display_path, Printer};
use crate::settings::DEFAULT_MAX_CANVAS_PIXELS;

use super::tile::TileSource;

/// What happened to each tile of a grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placement {
    /// Tiles pasted onto the canvas.
    pub placed: usize,
    /// Tiles whose source file does not exist.
    pub missing: Vec<TileId>,
    /// Tiles whose source file could not be decoded.
    pub unreadable: Vec<TileId>,
    /// Tiles listed past the last cell of the grid.
    pub out_of_bounds: Vec<TileId>,
}

impl Placement {
    /// Number of listed tiles that left their cell blank.
    pub fn skipped(&self) -> usize {
        self.missing.len() + self.unreadable.len() + self.out_of_bounds.len()
    }
}

/// Result of composing one grid declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposeReport {
    pub output: PathBuf,
    pub placement: Placement,
}

/// Stitches grids of tiles into single images.
#[derive(Debug, Clone)]
pub struct TileCompositor {
    tiles: TileSource,
    allocator: PathAllocator,
    tile_size: u32,
    max_pixels: u64,
}

impl TileCompositor {
    pub fn new(tiles: TileSource, allocator: PathAllocator, tile_size: u32) -> Self {
        Self {
            tiles,
            allocator,
            tile_size,
            max_pixels: DEFAULT_MAX_CANVAS_PIXELS,
        }
    }

    /// Refuse canvases larger than `max_pixels` pixels.
    pub fn with_pixel_limit(mut self, max_pixels: u64) -> Self {
        self.max_pixels = max_pixels;
        self
    }

    /// Render a grid and save it under a freshly allocated output path.
    pub fn compose(&self, grid: &GridSpec, printer: &Printer) -> Result<ComposeReport> {
        let (canvas, placement) = self.render(grid, printer)?;

        let output = self.allocator.allocate(&grid.name);
        canvas.save(&output).map_err(|e| StitchError::Image {
            path: output.clone(),
            message: format!("Failed to write image: {}", e),
        })?;

        printer.success("Created", &printer.cyan(&display_path(&output)));

        Ok(ComposeReport { output, placement })
    }

    /// Build the canvas for a grid without writing anything.
    ///
    /// Missing, unreadable and out-of-bounds tiles are reported through the
    /// printer and leave their cell transparent.
    pub fn render(&self, grid: &GridSpec, printer: &Printer) -> Result<(RgbaImage, Placement)> {
        let (width, height) = self.canvas_size(grid)?;
        let mut canvas = RgbaImage::new(width, height);
        let mut placement = Placement::default();

        let columns = grid.columns as usize;

        for (index, id) in grid.tile_ids.iter().enumerate() {
            let (column, row) = (index % columns, index / columns);

            if index >= grid.capacity() {
                printer.warning(
                    "Skipping",
                    &format!(
                        "tile {} at position {} is outside the {}x{} grid of {}",
                        id, index, grid.columns, grid.rows, grid.name
                    ),
                );
                placement.out_of_bounds.push(id.clone());
                continue;
            }

            let Some(path) = self.tiles.locate(id) else {
                printer.warning(
                    "Missing",
                    &format!("tile not found: {}", display_path(&self.tiles.path(id))),
                );
                placement.missing.push(id.clone());
                continue;
            };

            let tile = match decode_tile(&path) {
                Ok(img) => img,
                Err(e) => {
                    printer.error(
                        "Unreadable",
                        &format!("{}: {}", display_path(&path), e),
                    );
                    placement.unreadable.push(id.clone());
                    continue;
                }
            };

            // Cells never overlap, so a straight replace is enough
            let x = column as i64 * self.tile_size as i64;
            let y = row as i64 * self.tile_size as i64;
            imageops::replace(&mut canvas, &tile, x, y);
            placement.placed += 1;
        }

        Ok((canvas, placement))
    }

    fn canvas_size(&self, grid: &GridSpec) -> Result<(u32, u32)> {
        let width = grid.columns.checked_mul(self.tile_size);
        let height = grid.rows.checked_mul(self.tile_size);

        match (width, height) {
            (Some(w), Some(h)) if u64::from(w) * u64::from(h) <= self.max_pixels => Ok((w, h)),
            _ => Err(StitchError::Image {
                path: PathBuf::from(&grid.name),
                message: format!(
                    "a {}x{} grid of {}px tiles exceeds the {} pixel canvas limit",
                    grid.columns, grid.rows, self.tile_size, self.max_pixels
                ),
            }),
        }
    }
}

/// Decode a tile, sniffing the format from its contents rather than its extension.
fn decode_tile(path: &Path) -> image::ImageResult<RgbaImage> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(img.to_rgba8())
}
