//! Run settings (tilestitch.yaml).
//!
//! Settings hold the tile geometry, directory layout and file naming used
//! by a batch run. They are loaded once at startup and passed to the batch
//! driver explicitly.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StitchError};

/// The name of the optional settings file looked up in the working directory.
pub const SETTINGS_FILENAME: &str = "tilestitch.yaml";

/// Default canvas limit: 16384 x 16384 pixels, 1 GiB of RGBA.
pub const DEFAULT_MAX_CANVAS_PIXELS: u64 = 16384 * 16384;

/// Settings for one batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Edge length of one square tile, in pixels.
    pub tile_size: u32,

    /// Directory holding the source tiles.
    pub tiles_dir: PathBuf,

    /// Directory holding the YAML map definitions.
    pub maps_dir: PathBuf,

    /// Directory receiving stitched and copied images.
    pub output_dir: PathBuf,

    /// Prefix for tile filenames, e.g. `map` for `map491.png`.
    pub tile_prefix: String,

    /// Extension of source tiles and of single-tile copies (without the dot).
    pub tile_extension: String,

    /// Extension of stitched grid images; selects the encoder (without the dot).
    pub output_extension: String,

    /// Largest canvas, in pixels, a grid declaration may ask for.
    pub max_canvas_pixels: u64,

    /// Extension of map definition files (without the dot, matched case-insensitively).
    pub config_extension: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tile_size: 128,
            tiles_dir: PathBuf::from("tiles"),
            maps_dir: PathBuf::from("maps"),
            output_dir: PathBuf::from("output"),
            tile_prefix: "map".to_string(),
            tile_extension: "png".to_string(),
            output_extension: "png".to_string(),
            max_canvas_pixels: DEFAULT_MAX_CANVAS_PIXELS,
            config_extension: "yml".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| StitchError::io(path, "Failed to read settings", e))?;

        Self::parse(&content).map_err(|e| match e {
            StitchError::Parse { message, help, .. } => StitchError::Parse {
                path: path.to_path_buf(),
                message,
                help,
            },
            other => other,
        })
    }

    /// Parse settings from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: Settings = serde_yaml::from_str(content).map_err(|e| StitchError::Parse {
            path: PathBuf::from(SETTINGS_FILENAME),
            message: format!("Invalid settings: {}", e),
            help: Some("Check tilestitch.yaml syntax".to_string()),
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Check values that would make every render meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.tile_size == 0 {
            return Err(StitchError::Settings {
                message: "tile_size must be at least 1".to_string(),
                help: Some("The default tile size is 128".to_string()),
            });
        }
        if self.max_canvas_pixels == 0 {
            return Err(StitchError::Settings {
                message: "max_canvas_pixels must be at least 1".to_string(),
                help: None,
            });
        }
        if self.tile_extension.is_empty()
            || self.output_extension.is_empty()
            || self.config_extension.is_empty()
        {
            return Err(StitchError::Settings {
                message: "file extensions must not be empty".to_string(),
                help: None,
            });
        }
        Ok(())
    }

    /// Settings with every directory resolved under `root`.
    pub fn rooted_at(mut self, root: &Path) -> Self {
        self.tiles_dir = root.join(&self.tiles_dir);
        self.maps_dir = root.join(&self.maps_dir);
        self.output_dir = root.join(&self.output_dir);
        self
    }
}
