//! Output declarations.
//!
//! Each entry of a map list declares one output image, either as a grid of
//! tiles or as a copy of a single tile:
//!
//! ```yaml
//! - name: World1
//!   columns: 2
//!   rows: 1
//!   mapIDs: [491, 492]
//! - name: Solo
//!   mapID: 7
//! ```

use std::fmt;

use thiserror::Error;

use super::value::Node;

/// Name used when an entry has neither `name` nor `id`.
pub const UNNAMED: &str = "Unnamed";

/// Opaque tile identifier, rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileId(String);

impl TileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A grid of tiles stitched into one image.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSpec {
    pub name: String,
    pub columns: u32,
    pub rows: u32,
    /// Row-major: position `i` lands in column `i % columns`, row `i / columns`.
    pub tile_ids: Vec<TileId>,
}

impl GridSpec {
    /// Number of cells on the canvas.
    pub fn capacity(&self) -> usize {
        self.columns as usize * self.rows as usize
    }
}

/// A single tile copied verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleSpec {
    pub name: String,
    pub tile_id: TileId,
}

/// One output image declared by a map definition.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Grid(GridSpec),
    Single(SingleSpec),
}

/// Why an entry was skipped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeclarationError {
    #[error("entry is a {kind}, expected a mapping")]
    NotAMapping { kind: &'static str },

    #[error("missing mapID/mapIDs for: {name}")]
    MissingTiles { name: String },

    #[error("{field} for {name} must be a positive integer, got {value}")]
    InvalidDimension {
        name: String,
        field: &'static str,
        value: String,
    },

    #[error("tile list for {name} must be a sequence, got a {kind}")]
    TilesNotSequence { name: String, kind: &'static str },

    #[error("tile id at position {index} for {name} is a {kind}, expected a number or string")]
    InvalidTileId {
        name: String,
        index: usize,
        kind: &'static str,
    },
}

/// Resolve the display name of an entry: `name`, then `id`, then `Unnamed`.
pub fn entry_name(entry: &Node) -> String {
    ["name", "id"]
        .iter()
        .filter_map(|key| entry.field(key).truthy())
        .find_map(Node::to_label)
        .unwrap_or_else(|| UNNAMED.to_string())
}

/// Turn one map list entry into a declaration.
///
/// `mapIDs` wins when it is non-empty; otherwise the legacy `mapsIDs` alias
/// is used whenever it is set, even if empty. Only then is `mapID` checked.
pub fn parse_declaration(entry: &Node) -> Result<Declaration, DeclarationError> {
    if !entry.is_mapping() {
        return Err(DeclarationError::NotAMapping { kind: entry.kind() });
    }

    let name = entry_name(entry);

    let grid_ids = entry
        .field("mapIDs")
        .truthy()
        .or_else(|| entry.field("mapsIDs").present());

    if let Some(ids) = grid_ids {
        let columns = dimension(entry, "columns", &name)?;
        let rows = dimension(entry, "rows", &name)?;

        let items = ids.as_sequence().ok_or_else(|| DeclarationError::TilesNotSequence {
            name: name.clone(),
            kind: ids.kind(),
        })?;

        let tile_ids = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.to_label()
                    .map(TileId::new)
                    .ok_or_else(|| DeclarationError::InvalidTileId {
                        name: name.clone(),
                        index,
                        kind: item.kind(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        return Ok(Declaration::Grid(GridSpec {
            name,
            columns,
            rows,
            tile_ids,
        }));
    }

    if let Some(id) = entry.field("mapID").present() {
        let tile_id = id.to_label().map(TileId::new).ok_or_else(|| {
            DeclarationError::InvalidTileId {
                name: name.clone(),
                index: 0,
                kind: id.kind(),
            }
        })?;
        return Ok(Declaration::Single(SingleSpec { name, tile_id }));
    }

    Err(DeclarationError::MissingTiles { name })
}

/// Read `columns` / `rows`, defaulting to 1 when absent.
fn dimension(entry: &Node, field: &'static str, name: &str) -> Result<u32, DeclarationError> {
    let Some(node) = entry.field(field).present() else {
        return Ok(1);
    };

    node.as_positive_u32()
        .ok_or_else(|| DeclarationError::InvalidDimension {
            name: name.to_string(),
            field,
            value: node.to_label().unwrap_or_else(|| node.kind().to_string()),
        })
}
