//! Tessera engine -- the tick driver and archive layer over the tile core.
//!
//! This crate builds on [`tessera_tile`] to run a tile grid: a
//! fixed-timestep [`TickLoop`](tick::TickLoop) that drains the grid's
//! pending-update set once per tick, and a [`TileArchive`](archive::TileArchive)
//! that captures every attached tile as records behind a BLAKE3 integrity
//! digest.
//!
//! # Quick Start
//!
//! ```
//! use tessera_engine::prelude::*;
//!
//! let mut registry = TileRegistry::new();
//! tessera_tile::variants::register_builtin(&mut registry);
//! let mut tick_loop = TickLoop::new(registry, TickConfig::default());
//!
//! let mut record = Record::new();
//! record.set_string(TAG_ID, "Chest");
//! record.set_int(TAG_X, 3);
//! record.set_int(TAG_Y, 64);
//! record.set_int(TAG_Z, 7);
//! tick_loop.create_tile("Chest", &record).unwrap().unwrap();
//!
//! tick_loop.run_ticks(20);
//! let archive = tick_loop.capture_archive();
//! assert_eq!(archive.tiles.len(), 1);
//! assert_eq!(archive.tick_counter, 20);
//! ```

#![deny(unsafe_code)]

pub mod archive;
pub mod tick;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

/// Re-export the tile core for convenience.
pub use tessera_tile;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common engine usage.
pub mod prelude {
    pub use tessera_tile::prelude::*;

    pub use crate::archive::{RestoreReport, TileArchive};
    pub use crate::tick::{TickConfig, TickDiagnostics, TickLoop};
}
