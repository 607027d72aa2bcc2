//! Output image production.
//!
//! Grid declarations are stitched onto a fresh canvas by the
//! [`TileCompositor`]; single declarations are copied verbatim by the
//! [`TileCopier`]. Both resolve tiles through a shared [`TileSource`] and
//! name their outputs through a [`PathAllocator`](crate::naming::PathAllocator).

mod compose;
mod copy;
mod tile;

pub use compose::{ComposeReport, Placement, TileCompositor};
pub use copy::TileCopier;
pub use tile::TileSource;
