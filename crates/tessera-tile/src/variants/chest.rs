//! Chest: a storage tile with an optional custom name and optional
//! pairing with a neighboring chest.

use std::any::Any;

use crate::record::Record;
use crate::spawn::SpawnContext;
use crate::tile::{Tile, TileBase, TileVariant};
use crate::TileError;

/// Record key for the custom display name.
pub const TAG_CUSTOM_NAME: &str = "CustomName";
/// Record key for the paired chest's x coordinate.
pub const TAG_PAIR_X: &str = "pairx";
/// Record key for the paired chest's z coordinate.
pub const TAG_PAIR_Z: &str = "pairz";

/// A chest tile. Only state that deviates from the defaults is persisted,
/// so a plain unnamed chest saves nothing beyond the reserved keys.
#[derive(Debug)]
pub struct Chest {
    base: TileBase,
    custom_name: Option<String>,
    /// (x, z) of the partner chest forming a double chest, if paired.
    pair: Option<(i32, i32)>,
}

impl Chest {
    /// The custom display name, if one was set.
    pub fn custom_name(&self) -> Option<&str> {
        self.custom_name.as_deref()
    }

    /// Name or rename the chest.
    pub fn set_custom_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.base.set_name(name.clone());
        self.custom_name = Some(name);
    }

    /// The partner chest's (x, z), if this chest is half of a double chest.
    pub fn pair(&self) -> Option<(i32, i32)> {
        self.pair
    }

    /// Pair with the chest at (x, z).
    pub fn pair_with(&mut self, x: i32, z: i32) {
        self.pair = Some((x, z));
    }

    /// Dissolve the pairing.
    pub fn unpair(&mut self) {
        self.pair = None;
    }
}

impl Tile for Chest {
    fn base(&self) -> &TileBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut TileBase {
        &mut self.base
    }

    fn read_save_data(&mut self, record: &Record) -> Result<(), TileError> {
        self.custom_name = record.opt_string(TAG_CUSTOM_NAME).map(str::to_owned);
        self.base
            .set_name(self.custom_name.clone().unwrap_or_else(|| "Chest".to_owned()));
        // Pairing only holds when both halves of the coordinate survive.
        self.pair = match (record.opt_int(TAG_PAIR_X), record.opt_int(TAG_PAIR_Z)) {
            (Some(x), Some(z)) => Some((x, z)),
            _ => None,
        };
        Ok(())
    }

    fn write_save_data(&self, record: &mut Record) {
        if let Some(name) = &self.custom_name {
            record.set_string(TAG_CUSTOM_NAME, name.clone());
        }
        if let Some((x, z)) = self.pair {
            record.set_int(TAG_PAIR_X, x);
            record.set_int(TAG_PAIR_Z, z);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TileVariant for Chest {
    const SAVE_ID: &'static str = "Chest";

    fn from_record(record: &Record) -> Result<Self, TileError> {
        let mut chest = Self {
            base: TileBase::from_record(record)?,
            custom_name: None,
            pair: None,
        };
        chest.read_save_data(record)?;
        Ok(chest)
    }

    fn spawn_data(ctx: &SpawnContext<'_>, record: &mut Record) {
        if let Some(name) = ctx.item.and_then(|item| item.custom_name()) {
            record.set_string(TAG_CUSTOM_NAME, name);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use crate::pos::BlockPos;
    use crate::registry::TileRegistry;
    use crate::spawn::ItemStack;

    fn base_record(x: i32, y: i32, z: i32) -> Record {
        let mut record = Record::new();
        BlockPos::new(x, y, z).write_into(&mut record);
        record
    }

    #[test]
    fn loads_defaults_from_a_bare_record() {
        let chest = Chest::from_record(&base_record(10, 4, -3)).unwrap();
        assert_eq!(chest.base().pos(), BlockPos::new(10, 4, -3));
        assert_eq!(chest.custom_name(), None);
        assert_eq!(chest.pair(), None);
        assert_eq!(chest.base().name(), "Chest");
    }

    #[test]
    fn custom_name_and_pairing_roundtrip() {
        let mut record = base_record(0, 64, 0);
        record.set_string(TAG_CUSTOM_NAME, "Vault");
        record.set_int(TAG_PAIR_X, 1);
        record.set_int(TAG_PAIR_Z, 0);

        let chest = Chest::from_record(&record).unwrap();
        assert_eq!(chest.custom_name(), Some("Vault"));
        assert_eq!(chest.pair(), Some((1, 0)));
        assert_eq!(chest.base().name(), "Vault");

        let mut out = Record::new();
        chest.write_save_data(&mut out);
        let again = Chest::from_record(&{
            let mut r = base_record(0, 64, 0);
            r.merge_from(&out);
            r
        })
        .unwrap();
        assert_eq!(again.custom_name(), chest.custom_name());
        assert_eq!(again.pair(), chest.pair());
    }

    #[test]
    fn half_a_pair_reads_as_unpaired() {
        let mut record = base_record(0, 64, 0);
        record.set_int(TAG_PAIR_X, 12);
        let chest = Chest::from_record(&record).unwrap();
        assert_eq!(chest.pair(), None);
    }

    #[test]
    fn plain_chest_has_no_minimal_record() {
        let chest = Chest::from_record(&base_record(0, 64, 0)).unwrap();
        assert!(codec::save_minimal(&chest).is_none());

        let mut named = Chest::from_record(&base_record(0, 64, 0)).unwrap();
        named.set_custom_name("Vault");
        let minimal = codec::save_minimal(&named).unwrap();
        assert_eq!(minimal.len(), 1);
        assert_eq!(minimal.string(TAG_CUSTOM_NAME).unwrap(), "Vault");
    }

    #[test]
    fn spawn_hook_copies_the_item_name() {
        let mut registry = TileRegistry::new();
        registry.register::<Chest>(&["Chest", "minecraft:chest"]);

        let item = ItemStack::new("minecraft:chest").with_custom_name("Loot");
        let ctx = SpawnContext::at(BlockPos::new(1, 2, 3)).with_item(&item);
        let record = codec::spawn_record::<Chest>(&registry, &ctx);
        assert_eq!(record.string(TAG_CUSTOM_NAME).unwrap(), "Loot");

        let chest = Chest::from_record(&record).unwrap();
        assert_eq!(chest.custom_name(), Some("Loot"));
    }
}
