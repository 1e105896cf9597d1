//! Tile handles and their allocation.
//!
//! A [`TileId`] is the caller-side reference to a tile owned by a
//! [`TileGrid`](crate::grid::TileGrid). It packs a *generation* counter in
//! the high 32 bits and a slot *index* in the low 32 bits; closing a tile
//! bumps the slot's generation, so every handle that pointed at the closed
//! tile reads as stale from then on. This is what lets detach invalidate
//! outstanding references without any shared pointers.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TileId
// ---------------------------------------------------------------------------

/// A generational handle to a tile hosted by a grid.
///
/// Layout: `[generation: u32 | index: u32]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(u64);

impl TileId {
    /// Assemble a handle from a slot index and generation.
    #[inline]
    pub fn new(index: u32, generation: u32) -> Self {
        Self((generation as u64) << 32 | index as u64)
    }

    /// The slot index (low 32 bits).
    #[inline]
    pub fn index(self) -> u32 {
        self.0 as u32
    }

    /// The generation (high 32 bits).
    #[inline]
    pub fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }
}

impl fmt::Debug for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileId({}v{})", self.index(), self.generation())
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index(), self.generation())
    }
}

// ---------------------------------------------------------------------------
// TileAllocator
// ---------------------------------------------------------------------------

/// Hands out [`TileId`]s and retires them when tiles close.
///
/// Retired slot indices queue up FIFO before reuse, spreading generation
/// bumps across slots instead of concentrating them on whichever slot
/// happened to churn last.
#[derive(Debug, Default)]
pub struct TileAllocator {
    /// Current generation per slot.
    generations: Vec<u32>,
    /// Whether each slot currently hosts a live tile.
    live: Vec<bool>,
    /// Retired slots awaiting reuse, oldest first.
    free: VecDeque<u32>,
}

impl TileAllocator {
    /// Create an empty allocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant a fresh handle, reusing the oldest retired slot when one
    /// exists.
    pub fn allocate(&mut self) -> TileId {
        match self.free.pop_front() {
            Some(index) => {
                // The generation was already bumped when the slot retired.
                self.live[index as usize] = true;
                TileId::new(index, self.generations[index as usize])
            }
            None => {
                let index = self.generations.len() as u32;
                self.generations.push(0);
                self.live.push(true);
                TileId::new(index, 0)
            }
        }
    }

    /// Retire a handle, staling every copy of it.
    ///
    /// Returns `false` when the handle was already stale, which makes
    /// double-release harmless.
    pub fn release(&mut self, id: TileId) -> bool {
        if !self.is_live(id) {
            return false;
        }
        let index = id.index() as usize;
        self.live[index] = false;
        self.generations[index] = self.generations[index].wrapping_add(1);
        self.free.push_back(id.index());
        true
    }

    /// Whether `id` still refers to a live slot with a matching generation.
    pub fn is_live(&self, id: TileId) -> bool {
        let index = id.index() as usize;
        index < self.generations.len()
            && self.live[index]
            && self.generations[index] == id.generation()
    }

    /// Number of live slots.
    pub fn live_count(&self) -> usize {
        self.live.iter().filter(|&&l| l).count()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
