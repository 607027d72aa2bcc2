//! Map definition documents.
//!
//! A map definition is a YAML file holding a list of output declarations
//! under `PlayerMapStore.mapList`:
//!
//! ```yaml
//! PlayerMapStore:
//!   mapList:
//!     - name: World1
//!       columns: 2
//!       rows: 1
//!       mapIDs: [1, 2]
//!     - name: Solo
//!       mapID: 7
//! ```
//!
//! Files are parsed into a loosely-typed [`Node`] tree, and each list entry
//! is turned into a typed [`Declaration`] on demand so that one bad entry
//! never spoils the rest of the file.

mod declaration;
mod loader;
mod value;

pub use declaration::{
    entry_name, parse_declaration, Declaration, DeclarationError, GridSpec, SingleSpec, TileId,
    UNNAMED,
};
pub use loader::{load, Document, LIST_KEY, STORE_KEY};
pub use value::{Field, Node, Number};
