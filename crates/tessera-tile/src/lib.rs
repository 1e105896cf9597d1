//! Tessera tile core -- block-bound persistent entities for a voxel grid.
//!
//! A *tile* is an entity pinned to exactly one integer position in a world
//! grid: a chest, a furnace, a sign. This crate provides the pieces that
//! make tiles work as a system:
//!
//! - [`Record`](record::Record): the tagged key/value compound every tile
//!   serializes to and from.
//! - [`Tile`](tile::Tile) / [`TileVariant`](tile::TileVariant): the contract
//!   every concrete tile kind implements.
//! - [`TileRegistry`](registry::TileRegistry): maps save identifiers (and
//!   their aliases) to tile constructors, so saved data can be revived
//!   without a central dispatch table.
//! - [`TileGrid`](grid::TileGrid): owns attached tiles, indexes them by
//!   block hash, and holds the pending-update set drained by the tick loop.
//! - [`codec`]: builds full save records, minimal records, and spawn-time
//!   records from contextual parameters.
//!
//! # Quick Start
//!
//! ```
//! use tessera_tile::prelude::*;
//!
//! let mut registry = TileRegistry::new();
//! tessera_tile::variants::register_builtin(&mut registry);
//!
//! let mut record = Record::new();
//! record.set_string(TAG_ID, "Chest");
//! record.set_int(TAG_X, 10);
//! record.set_int(TAG_Y, 64);
//! record.set_int(TAG_Z, -3);
//!
//! let mut grid = TileGrid::new();
//! let id = registry
//!     .create("Chest", &mut grid, &record)
//!     .unwrap()
//!     .expect("Chest is registered");
//!
//! let tile = grid.tile(id).unwrap();
//! assert_eq!(tile.base().pos(), BlockPos::new(10, 64, -3));
//!
//! let saved = tessera_tile::codec::save(&registry, tile);
//! assert_eq!(saved.string(TAG_ID).unwrap(), "Chest");
//! ```

#![deny(unsafe_code)]

pub mod codec;
pub mod grid;
pub mod handle;
pub mod pos;
pub mod record;
pub mod registry;
pub mod spawn;
pub mod tile;
pub mod variants;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced when a record's shape does not match what a tile needs.
///
/// These cover the *surfaced* failure class only: reserved or required keys
/// that are missing or hold the wrong kind of value. Expected absences
/// (unknown identifiers, optional variant keys) are represented as `Option`
/// at the API surface, never as an error. Caller-contract violations
/// (scheduling a closed tile, saving an unregistered variant) panic at the
/// call site instead.
#[derive(Debug, thiserror::Error)]
pub enum TileError {
    /// A required key is absent from the record.
    #[error("record key '{key}' is missing")]
    MissingKey {
        /// The key that was looked up.
        key: String,
    },

    /// A key is present but holds a value of the wrong kind.
    #[error("record key '{key}' should hold {expected} but holds {found}")]
    KeyKind {
        /// The key that was looked up.
        key: String,
        /// What the caller asked for.
        expected: &'static str,
        /// What the record actually holds.
        found: &'static str,
    },

    /// An integer key holds a value outside the 32-bit range.
    #[error("record key '{key}' holds {value}, which does not fit in 32 bits")]
    IntOutOfRange {
        /// The key that was looked up.
        key: String,
        /// The out-of-range value.
        value: i64,
    },
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::grid::TileGrid;
    pub use crate::handle::TileId;
    pub use crate::pos::{BlockPos, Facing};
    pub use crate::record::{Record, TAG_ID, TAG_X, TAG_Y, TAG_Z};
    pub use crate::registry::{TileFactory, TileRegistry};
    pub use crate::spawn::{ActorId, ItemStack, SpawnContext};
    pub use crate::tile::{Tile, TileBase, TileVariant};
    pub use crate::variants::{Chest, Furnace, Sign};
    pub use crate::TileError;
}
