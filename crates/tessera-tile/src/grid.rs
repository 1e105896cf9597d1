//! The grid-side container hosting attached tiles.
//!
//! A [`TileGrid`] owns every attached tile, indexes them by the block hash
//! of their position, and keeps the pending-update set the tick driver
//! drains. Callers hold generational [`TileId`] handles instead of
//! references; closing a tile stales its handle, so the "back-reference to
//! the world" problem reduces to an aliveness check.
//!
//! Lifecycle: a tile becomes attached the moment
//! [`add_tile`](TileGrid::add_tile) accepts it, and leaves through
//! [`close_tile`](TileGrid::close_tile) exactly once -- closing again is a
//! no-op. Teardown routes through the same path, so the ordering guarantees
//! (closed flag first, then index removal) hold uniformly.

use std::collections::{BTreeMap, HashMap};

use crate::handle::{TileAllocator, TileId};
use crate::pos::BlockPos;
use crate::tile::Tile;

// ---------------------------------------------------------------------------
// TileGrid
// ---------------------------------------------------------------------------

/// Owns attached tiles and their spatial + pending-update indices.
///
/// Both indices are ordered by block hash so that iteration and update
/// draining are deterministic.
#[derive(Default)]
pub struct TileGrid {
    allocator: TileAllocator,
    tiles: HashMap<TileId, Box<dyn Tile>>,
    /// Spatial index: block hash to the tile occupying that position.
    by_pos: BTreeMap<u64, TileId>,
    /// Tiles awaiting an update pass, keyed by block hash -- at most one
    /// pending update per position.
    pending: BTreeMap<u64, TileId>,
}

impl TileGrid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a freshly constructed tile, attach it at its position, and
    /// return its handle.
    ///
    /// If another tile already occupies the position it is closed first --
    /// one position hosts one tile. A tile that reports
    /// [`wants_update`](Tile::wants_update) is scheduled immediately.
    ///
    /// # Panics
    ///
    /// Panics when handed a tile that was already closed.
    pub fn add_tile(&mut self, mut tile: Box<dyn Tile>) -> TileId {
        assert!(
            !tile.base().is_closed(),
            "cannot attach a closed tile at {}",
            tile.base().pos()
        );
        let pos = tile.base().pos();
        let hash = pos.hash();
        if let Some(&previous) = self.by_pos.get(&hash) {
            tracing::warn!(%pos, "position already occupied; closing the previous tile");
            self.close_tile(previous);
        }

        let id = self.allocator.allocate();
        tile.base_mut().mark_attached();
        let wants_update = tile.wants_update();
        self.by_pos.insert(hash, id);
        self.tiles.insert(id, tile);
        if wants_update {
            self.schedule_update(id);
        }
        tracing::debug!(%pos, tile = %id, "tile attached");
        id
    }

    /// Close a tile: flag it closed, detach it from the indices, retire its
    /// handle. Returns the closed tile so the caller can still inspect it,
    /// or `None` if the handle was already stale -- closing twice is a
    /// no-op, never an error.
    pub fn close_tile(&mut self, id: TileId) -> Option<Box<dyn Tile>> {
        if !self.allocator.is_live(id) {
            return None;
        }
        let mut tile = self.tiles.remove(&id)?;
        // Flag first, then detach, so a closed tile is never still indexed.
        tile.base_mut().mark_closed();
        let hash = tile.base().pos().hash();
        if self.by_pos.get(&hash) == Some(&id) {
            self.by_pos.remove(&hash);
        }
        if self.pending.get(&hash) == Some(&id) {
            self.pending.remove(&hash);
        }
        self.allocator.release(id);
        tracing::debug!(pos = %tile.base().pos(), tile = %id, "tile closed");
        Some(tile)
    }

    /// Close every tile, in block-hash order, through the normal close
    /// path.
    pub fn close_all(&mut self) {
        let ids: Vec<TileId> = self.by_pos.values().copied().collect();
        for id in ids {
            self.close_tile(id);
        }
    }

    /// Register `id` for the next update pass, keyed by its position's
    /// block hash. Scheduling an already-scheduled tile changes nothing.
    ///
    /// # Panics
    ///
    /// Panics when the handle is stale: scheduling a closed tile is a
    /// programming error. Callers that are unsure must check
    /// [`is_closed`](Self::is_closed) first.
    pub fn schedule_update(&mut self, id: TileId) {
        let Some(tile) = self.tiles.get(&id) else {
            panic!("cannot schedule update on closed tile {id}");
        };
        self.pending.insert(tile.base().pos().hash(), id);
    }

    /// Take the whole pending-update set, leaving it empty. The tick
    /// driver calls this once per tick and walks the result in hash order.
    pub fn take_pending_updates(&mut self) -> BTreeMap<u64, TileId> {
        std::mem::take(&mut self.pending)
    }

    /// Number of positions with a pending update.
    pub fn pending_update_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether `id` no longer refers to a live tile.
    pub fn is_closed(&self, id: TileId) -> bool {
        !self.allocator.is_live(id)
    }

    /// Shared access to a tile by handle.
    pub fn tile(&self, id: TileId) -> Option<&dyn Tile> {
        self.tiles.get(&id).map(|tile| tile.as_ref())
    }

    /// Mutable access to a tile by handle.
    pub fn tile_mut(&mut self, id: TileId) -> Option<&mut dyn Tile> {
        self.tiles.get_mut(&id).map(|tile| tile.as_mut())
    }

    /// The handle of the tile at `pos`, if that position hosts one.
    pub fn id_at(&self, pos: &BlockPos) -> Option<TileId> {
        self.by_pos.get(&pos.hash()).copied()
    }

    /// The tile at `pos`, if that position hosts one.
    pub fn tile_at(&self, pos: &BlockPos) -> Option<&dyn Tile> {
        self.id_at(pos).and_then(|id| self.tile(id))
    }

    /// Number of attached tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Iterate attached tiles in block-hash order.
    pub fn iter(&self) -> impl Iterator<Item = (TileId, &dyn Tile)> {
        self.by_pos
            .values()
            .filter_map(|id| self.tiles.get(id).map(|tile| (*id, tile.as_ref())))
    }
}

impl Drop for TileGrid {
    fn drop(&mut self) {
        // Teardown uses the one close path so every tile observes the same
        // flag-then-detach ordering.
        self.close_all();
    }
}

impl std::fmt::Debug for TileGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileGrid")
            .field("tile_count", &self.tiles.len())
            .field("pending_updates", &self.pending.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
