//! Integer grid positions and the block hash that buckets them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::{Record, TAG_X, TAG_Y, TAG_Z};
use crate::TileError;

// ---------------------------------------------------------------------------
// BlockPos
// ---------------------------------------------------------------------------

/// An integer coordinate triple addressing one cell of the world grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    /// East/west coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
    /// North/south coordinate.
    pub z: i32,
}

impl BlockPos {
    /// Construct a position from its components.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The spatial hash used to bucket tiles for lookup and update
    /// scheduling.
    ///
    /// Layout: `[x: 26 bits | z: 26 bits | y: 12 bits]`. Distinct positions
    /// inside the playable volume (|x|, |z| below 2^25, y in 0..4096) map to
    /// distinct hashes; coordinates outside that volume wrap into it.
    pub fn hash(&self) -> u64 {
        ((self.x as u64 & 0x3FF_FFFF) << 38)
            | ((self.z as u64 & 0x3FF_FFFF) << 12)
            | (self.y as u64 & 0xFFF)
    }

    /// Read a position from a record's reserved coordinate keys.
    ///
    /// # Errors
    ///
    /// The coordinate keys are required and must hold 32-bit integers;
    /// anything else surfaces as a [`TileError`] for the caller to handle.
    pub fn from_record(record: &Record) -> Result<Self, TileError> {
        Ok(Self {
            x: record.int(TAG_X)?,
            y: record.int(TAG_Y)?,
            z: record.int(TAG_Z)?,
        })
    }

    /// Write this position into a record's reserved coordinate keys.
    pub fn write_into(&self, record: &mut Record) {
        record.set_int(TAG_X, self.x);
        record.set_int(TAG_Y, self.y);
        record.set_int(TAG_Z, self.z);
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Facing
// ---------------------------------------------------------------------------

/// One of the six axis-aligned directions a placed block can face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Toward negative y.
    Down,
    /// Toward positive y.
    Up,
    /// Toward negative z.
    North,
    /// Toward positive z.
    South,
    /// Toward negative x.
    West,
    /// Toward positive x.
    East,
}

impl Facing {
    /// The wire index of this direction.
    pub fn index(self) -> i32 {
        match self {
            Facing::Down => 0,
            Facing::Up => 1,
            Facing::North => 2,
            Facing::South => 3,
            Facing::West => 4,
            Facing::East => 5,
        }
    }

    /// The direction for a wire index, or `None` for anything outside 0..6.
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(Facing::Down),
            1 => Some(Facing::Up),
            2 => Some(Facing::North),
            3 => Some(Facing::South),
            4 => Some(Facing::West),
            5 => Some(Facing::East),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
