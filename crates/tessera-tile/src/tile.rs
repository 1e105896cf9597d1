//! The contract every concrete tile kind implements.
//!
//! [`Tile`] is the object-safe half: the state and hooks the grid and the
//! codec drive through a `Box<dyn Tile>`. [`TileVariant`] is the static
//! half: the canonical save identifier, the record constructor the registry
//! stores, and the spawn-record hook. [`TileBase`] carries the state common
//! to every variant; it is embedded in each concrete tile struct and
//! reached through the `base`/`base_mut` accessors.

use std::any::Any;

use crate::pos::BlockPos;
use crate::record::Record;
use crate::spawn::SpawnContext;
use crate::TileError;

// ---------------------------------------------------------------------------
// Tile
// ---------------------------------------------------------------------------

/// The object-safe contract for one tile instance.
pub trait Tile: Any {
    /// The common state shared by every variant.
    fn base(&self) -> &TileBase;

    /// Mutable access to the common state.
    fn base_mut(&mut self) -> &mut TileBase;

    /// Populate variant-specific fields from a record's keys.
    ///
    /// Missing variant keys are not errors -- older saves may predate a
    /// field, and the variant substitutes its default. Only malformed
    /// required data surfaces as [`TileError`].
    fn read_save_data(&mut self, record: &Record) -> Result<(), TileError>;

    /// Write variant-specific fields into a record.
    ///
    /// The reserved keys (`id`, `x`, `y`, `z`) belong to the base save path
    /// and must not be written here.
    fn write_save_data(&self, record: &mut Record);

    /// One scheduled update. Return `true` to be scheduled again on the
    /// next tick.
    fn on_update(&mut self) -> bool {
        false
    }

    /// Polled once when the tile attaches to a grid; return `true` to be
    /// scheduled immediately (a furnace loaded mid-burn, for example).
    fn wants_update(&self) -> bool {
        false
    }

    /// Identity hook for canonical-identifier lookups and downcasts.
    fn as_any(&self) -> &dyn Any;
}

// ---------------------------------------------------------------------------
// TileVariant
// ---------------------------------------------------------------------------

/// The static side of a tile kind: what the registry needs to revive it
/// from saved data and to build spawn-time records.
pub trait TileVariant: Tile + Sized {
    /// The canonical short name tagged onto this variant's save records.
    const SAVE_ID: &'static str;

    /// Construct an instance from a record: read the base position, then
    /// the variant's own fields.
    ///
    /// # Errors
    ///
    /// Surfaces [`TileError`] when the reserved coordinate keys (or any
    /// key the variant treats as required) are missing or malformed.
    fn from_record(record: &Record) -> Result<Self, TileError>;

    /// Add variant-specific keys to a spawn-time record using the
    /// contextual parameters. The default adds nothing.
    fn spawn_data(_ctx: &SpawnContext<'_>, _record: &mut Record) {}
}

// ---------------------------------------------------------------------------
// TileBase
// ---------------------------------------------------------------------------

/// State common to every tile: position, display name, and lifecycle flags.
///
/// A tile is *attached* from the moment its grid accepts it until it is
/// closed. Once closed it never mutates again; the closed flag never
/// clears.
#[derive(Debug, Clone)]
pub struct TileBase {
    pos: BlockPos,
    name: String,
    closed: bool,
    attached: bool,
}

impl TileBase {
    /// A detached, open base at `pos` with an empty display name.
    pub fn new(pos: BlockPos) -> Self {
        Self {
            pos,
            name: String::new(),
            closed: false,
            attached: false,
        }
    }

    /// Read the base from a record's reserved coordinate keys.
    ///
    /// # Errors
    ///
    /// Propagates the coordinate shape errors from
    /// [`BlockPos::from_record`].
    pub fn from_record(record: &Record) -> Result<Self, TileError> {
        Ok(Self::new(BlockPos::from_record(record)?))
    }

    /// The position this tile is bound to.
    pub fn pos(&self) -> BlockPos {
        self.pos
    }

    /// The display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the display name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Whether this tile has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether this tile is currently hosted by a grid.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Grid-side hook: the tile was accepted into a grid.
    ///
    /// # Panics
    ///
    /// Panics when called on a closed base; a closed tile can never
    /// re-attach.
    pub(crate) fn mark_attached(&mut self) {
        assert!(!self.closed, "a closed tile cannot attach to a grid");
        self.attached = true;
    }

    /// Grid-side hook: the tile left its grid for good. Sets the closed
    /// flag first, then clears the attachment.
    pub(crate) fn mark_closed(&mut self) {
        self.closed = true;
        self.attached = false;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{TAG_X, TAG_Y, TAG_Z};

    #[test]
    fn base_reads_position_from_record() {
        let mut record = Record::new();
        record.set_int(TAG_X, 10);
        record.set_int(TAG_Y, 4);
        record.set_int(TAG_Z, -3);
        let base = TileBase::from_record(&record).unwrap();
        assert_eq!(base.pos(), BlockPos::new(10, 4, -3));
        assert!(!base.is_closed());
        assert!(!base.is_attached());
        assert_eq!(base.name(), "");
    }

    #[test]
    fn base_requires_all_coordinates() {
        let mut record = Record::new();
        record.set_int(TAG_X, 10);
        assert!(TileBase::from_record(&record).is_err());
        record.set_int(TAG_Y, 4);
        record.set_int(TAG_Z, -3);
        assert!(TileBase::from_record(&record).is_ok());
    }

    #[test]
    fn lifecycle_flags() {
        let mut base = TileBase::new(BlockPos::new(0, 0, 0));
        base.mark_attached();
        assert!(base.is_attached());
        base.mark_closed();
        assert!(base.is_closed());
        assert!(!base.is_attached());
    }

    #[test]
    #[should_panic(expected = "closed tile cannot attach")]
    fn closed_base_refuses_to_attach() {
        let mut base = TileBase::new(BlockPos::new(0, 0, 0));
        base.mark_closed();
        base.mark_attached();
    }
}
