//! Command line interface.
//!
//! Running `tilestitch` with no arguments processes `maps/` against `tiles/`
//! and writes to `output/`. Every flag overrides the matching setting.

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::batch::{Batch, BatchReport};
use crate::error::Result;
use crate::output::Printer;
use crate::settings::{Settings, SETTINGS_FILENAME};

/// tilestitch - stitch map tiles into grid images
#[derive(Parser, Debug, Default)]
#[command(name = "tilestitch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Settings file (default: tilestitch.yaml in the working directory, if present)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Directory holding source tiles
    #[arg(long)]
    pub tiles: Option<PathBuf>,

    /// Directory holding YAML map definitions
    #[arg(long)]
    pub maps: Option<PathBuf>,

    /// Output directory
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Tile filename prefix, e.g. "map" for map491.png
    #[arg(long)]
    pub prefix: Option<String>,

    /// Tile edge length in pixels
    #[arg(long)]
    pub tile_size: Option<u32>,
}

impl Cli {
    /// Resolve the effective settings: file (if any), then flag overrides.
    pub fn resolve_settings(&self, cwd: &Path) -> Result<Settings> {
        let mut settings = match &self.settings {
            Some(path) => Settings::load(path)?,
            None => {
                let default_path = cwd.join(SETTINGS_FILENAME);
                if default_path.is_file() {
                    Settings::load(&default_path)?
                } else {
                    Settings::default()
                }
            }
        };

        if let Some(tiles) = &self.tiles {
            settings.tiles_dir = tiles.clone();
        }
        if let Some(maps) = &self.maps {
            settings.maps_dir = maps.clone();
        }
        if let Some(output) = &self.output {
            settings.output_dir = output.clone();
        }
        if let Some(prefix) = &self.prefix {
            settings.tile_prefix = prefix.clone();
        }
        if let Some(tile_size) = self.tile_size {
            settings.tile_size = tile_size;
        }

        settings.validate()?;
        Ok(settings)
    }
}

/// Run a batch with the settings the command line describes.
pub fn run(cli: Cli, cwd: &Path, printer: &Printer) -> Result<BatchReport> {
    let settings = cli.resolve_settings(cwd)?;
    Ok(Batch::new(settings, printer).run())
}
