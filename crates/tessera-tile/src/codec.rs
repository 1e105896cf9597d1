//! Building save and spawn records from tiles and spawn context.
//!
//! Three shapes come out of here:
//!
//! - [`save`]: the full record a tile round-trips through on disk --
//!   reserved keys plus the variant's own fields.
//! - [`save_minimal`]: only the variant's fields, or nothing at all when
//!   the variant has nothing to persist.
//! - [`spawn_record`]: the record for a tile that does not exist yet,
//!   assembled from placement context instead of saved state.

use std::any::TypeId;

use crate::record::{Record, TAG_ID};
use crate::registry::TileRegistry;
use crate::spawn::SpawnContext;
use crate::tile::{Tile, TileVariant};

/// Build the full save record for an attached or detached tile: the
/// reserved `id`/`x`/`y`/`z` keys, then whatever the variant writes. The
/// reserved keys are always present in the result.
///
/// # Panics
///
/// Panics when the tile's variant was never registered, because the
/// canonical identifier comes from the registry.
pub fn save(registry: &TileRegistry, tile: &dyn Tile) -> Record {
    let mut record = Record::new();
    record.set_string(TAG_ID, registry.save_id_of(tile.as_any().type_id()));
    tile.base().pos().write_into(&mut record);
    tile.write_save_data(&mut record);
    record
}

/// Build a record holding only the variant's own fields -- no reserved
/// keys. Returns `None` when the variant wrote nothing, so callers can
/// tell "nothing to persist" from "persisted an empty state".
pub fn save_minimal(tile: &dyn Tile) -> Option<Record> {
    let mut record = Record::new();
    tile.write_save_data(&mut record);
    if record.is_empty() {
        None
    } else {
        Some(record)
    }
}

/// Build the record that spawns a brand-new `T` from placement context.
///
/// The reserved keys are written first, then `T`'s
/// [`spawn_data`](TileVariant::spawn_data) hook adds variant keys from the
/// context, and finally every key of the triggering item's attached-data
/// subtree is copied in. Item-attached keys land last, so they overwrite
/// same-named keys the variant wrote.
///
/// # Panics
///
/// Panics when `T` was never registered.
pub fn spawn_record<T: TileVariant>(registry: &TileRegistry, ctx: &SpawnContext<'_>) -> Record {
    let mut record = Record::new();
    record.set_string(TAG_ID, registry.save_id_of(TypeId::of::<T>()));
    ctx.pos.write_into(&mut record);

    T::spawn_data(ctx, &mut record);

    if let Some(attached) = ctx.item.and_then(|item| item.attached_data()) {
        record.merge_from(attached);
    }
    record
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos::BlockPos;
    use crate::record::{TAG_X, TAG_Y, TAG_Z};
    use crate::spawn::ItemStack;
    use crate::tile::TileBase;
    use crate::TileError;

    /// Test variant with one persisted field and a spawn hook that writes
    /// a default for it.
    struct Gauge {
        base: TileBase,
        level: i32,
    }

    impl Tile for Gauge {
        fn base(&self) -> &TileBase {
            &self.base
        }
        fn base_mut(&mut self) -> &mut TileBase {
            &mut self.base
        }
        fn read_save_data(&mut self, record: &Record) -> Result<(), TileError> {
            self.level = record.opt_int("Level").unwrap_or(0);
            Ok(())
        }
        fn write_save_data(&self, record: &mut Record) {
            if self.level != 0 {
                record.set_int("Level", self.level);
            }
        }
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    impl TileVariant for Gauge {
        const SAVE_ID: &'static str = "Gauge";
        fn from_record(record: &Record) -> Result<Self, TileError> {
            let mut gauge = Self {
                base: TileBase::from_record(record)?,
                level: 0,
            };
            gauge.read_save_data(record)?;
            Ok(gauge)
        }
        fn spawn_data(_ctx: &SpawnContext<'_>, record: &mut Record) {
            record.set_int("Level", 1);
        }
    }

    fn registry() -> TileRegistry {
        let mut registry = TileRegistry::new();
        registry.register::<Gauge>(&["Gauge", "tessera:gauge"]);
        registry
    }

    #[test]
    fn save_always_contains_the_reserved_keys() {
        let registry = registry();
        let tile = Gauge {
            base: TileBase::new(BlockPos::new(10, 4, -3)),
            level: 0,
        };
        let record = save(&registry, &tile);
        assert_eq!(record.string(TAG_ID).unwrap(), "Gauge");
        assert_eq!(record.int(TAG_X).unwrap(), 10);
        assert_eq!(record.int(TAG_Y).unwrap(), 4);
        assert_eq!(record.int(TAG_Z).unwrap(), -3);
        // level == 0 writes nothing, so reserved keys are all there is.
        assert_eq!(record.len(), 4);
    }

    #[test]
    fn save_minimal_is_none_exactly_when_nothing_was_written() {
        let mut tile = Gauge {
            base: TileBase::new(BlockPos::new(0, 0, 0)),
            level: 0,
        };
        assert!(save_minimal(&tile).is_none());

        tile.level = 9;
        let record = save_minimal(&tile).expect("level was written");
        assert_eq!(record.len(), 1);
        assert_eq!(record.int("Level").unwrap(), 9);
        assert!(!record.contains(TAG_ID));
    }

    #[test]
    fn spawn_record_writes_reserved_keys_and_variant_data() {
        let registry = registry();
        let ctx = SpawnContext::at(BlockPos::new(1, 2, 3));
        let record = spawn_record::<Gauge>(&registry, &ctx);
        assert_eq!(record.string(TAG_ID).unwrap(), "Gauge");
        assert_eq!(record.int(TAG_X).unwrap(), 1);
        assert_eq!(record.int("Level").unwrap(), 1);
    }

    #[test]
    fn item_attached_data_lands_last() {
        let registry = registry();
        let mut attached = Record::new();
        attached.set_string("Lock", "secret");
        attached.set_int("Level", 42);
        let item = ItemStack::new("tessera:gauge").with_attached_data(attached);
        let ctx = SpawnContext::at(BlockPos::new(1, 2, 3)).with_item(&item);

        let record = spawn_record::<Gauge>(&registry, &ctx);
        assert_eq!(record.string("Lock").unwrap(), "secret");
        // The variant wrote Level = 1; the item's attached data wins.
        assert_eq!(record.int("Level").unwrap(), 42);
    }

    #[test]
    #[should_panic(expected = "not registered")]
    fn saving_an_unregistered_variant_panics() {
        let registry = TileRegistry::new();
        let tile = Gauge {
            base: TileBase::new(BlockPos::new(0, 0, 0)),
            level: 0,
        };
        let _ = save(&registry, &tile);
    }

    #[test]
    fn spawn_then_load_roundtrip() {
        let registry = registry();
        let ctx = SpawnContext::at(BlockPos::new(5, 6, 7));
        let record = spawn_record::<Gauge>(&registry, &ctx);
        let gauge = Gauge::from_record(&record).unwrap();
        assert_eq!(gauge.base.pos(), BlockPos::new(5, 6, 7));
        assert_eq!(gauge.level, 1);
    }
}
