//! tilestitch - map tile stitcher
//!
//! A library for turning YAML map definitions into images: grids of tiles
//! are stitched onto one canvas, single tiles are copied verbatim, and
//! every output gets a collision-free name.

pub mod batch;
pub mod cli;
pub mod discovery;
pub mod document;
pub mod error;
pub mod naming;
pub mod output;
pub mod render;
pub mod settings;

pub use batch::{Batch, BatchReport};
pub use document::{load, Declaration, DeclarationError, Document, GridSpec, Node, SingleSpec, TileId};
pub use error::{Result, StitchError};
pub use naming::{sanitize, PathAllocator};
pub use render::{ComposeReport, Placement, TileCompositor, TileCopier, TileSource};
pub use settings::Settings;
