//! Furnace: a tile that burns fuel over scheduled updates.

use std::any::Any;

use crate::record::Record;
use crate::tile::{Tile, TileBase, TileVariant};
use crate::TileError;

/// Record key for the remaining fuel, in ticks.
pub const TAG_BURN_TIME: &str = "BurnTime";
/// Record key for the smelting progress, in ticks.
pub const TAG_COOK_TIME: &str = "CookTime";
/// Record key for the burn duration of the last fuel item, in ticks.
pub const TAG_MAX_TIME: &str = "MaxTime";

/// Ticks of progress one smelt takes.
const COOK_TICKS: i32 = 200;

/// A furnace tile. While lit it asks to stay on the update schedule,
/// burning one tick of fuel per pass and advancing smelting progress;
/// when the fire dies the progress resets and the furnace drops off the
/// schedule.
#[derive(Debug)]
pub struct Furnace {
    base: TileBase,
    burn_time: i32,
    cook_time: i32,
    max_time: i32,
}

impl Furnace {
    /// Remaining fuel, in ticks.
    pub fn burn_time(&self) -> i32 {
        self.burn_time
    }

    /// Current smelting progress, in ticks.
    pub fn cook_time(&self) -> i32 {
        self.cook_time
    }

    /// Burn duration of the last fuel item, in ticks.
    pub fn max_time(&self) -> i32 {
        self.max_time
    }

    /// Whether fuel is currently burning.
    pub fn is_lit(&self) -> bool {
        self.burn_time > 0
    }

    /// Add fuel worth `ticks` of burning. The caller re-schedules the
    /// furnace if it was cold.
    pub fn add_fuel(&mut self, ticks: i32) {
        assert!(ticks > 0, "fuel must burn for at least one tick");
        self.burn_time += ticks;
        self.max_time = self.max_time.max(ticks);
    }
}

impl Tile for Furnace {
    fn base(&self) -> &TileBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut TileBase {
        &mut self.base
    }

    fn read_save_data(&mut self, record: &Record) -> Result<(), TileError> {
        self.burn_time = record.opt_int(TAG_BURN_TIME).unwrap_or(0).max(0);
        // Progress without fire is stale data from an interrupted save.
        self.cook_time = if self.burn_time > 0 {
            record.opt_int(TAG_COOK_TIME).unwrap_or(0).clamp(0, COOK_TICKS)
        } else {
            0
        };
        self.max_time = record.opt_int(TAG_MAX_TIME).unwrap_or(0).max(0);
        if self.max_time == 0 {
            self.max_time = self.burn_time;
        }
        Ok(())
    }

    fn write_save_data(&self, record: &mut Record) {
        record.set_int(TAG_BURN_TIME, self.burn_time);
        record.set_int(TAG_COOK_TIME, self.cook_time);
        record.set_int(TAG_MAX_TIME, self.max_time);
    }

    fn on_update(&mut self) -> bool {
        if self.burn_time == 0 {
            self.cook_time = 0;
            return false;
        }
        self.burn_time -= 1;
        self.cook_time = (self.cook_time + 1).min(COOK_TICKS);
        if self.burn_time == 0 {
            self.cook_time = 0;
            return false;
        }
        true
    }

    fn wants_update(&self) -> bool {
        // A furnace saved mid-burn resumes burning as soon as it attaches.
        self.is_lit()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TileVariant for Furnace {
    const SAVE_ID: &'static str = "Furnace";

    fn from_record(record: &Record) -> Result<Self, TileError> {
        let mut furnace = Self {
            base: TileBase::from_record(record)?,
            burn_time: 0,
            cook_time: 0,
            max_time: 0,
        };
        furnace.read_save_data(record)?;
        Ok(furnace)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos::BlockPos;

    fn record_with(burn: i32, cook: i32, max: i32) -> Record {
        let mut record = Record::new();
        BlockPos::new(0, 64, 0).write_into(&mut record);
        record.set_int(TAG_BURN_TIME, burn);
        record.set_int(TAG_COOK_TIME, cook);
        record.set_int(TAG_MAX_TIME, max);
        record
    }

    #[test]
    fn loads_defaults_when_keys_are_absent() {
        let mut record = Record::new();
        BlockPos::new(0, 64, 0).write_into(&mut record);
        let furnace = Furnace::from_record(&record).unwrap();
        assert_eq!(furnace.burn_time(), 0);
        assert_eq!(furnace.cook_time(), 0);
        assert_eq!(furnace.max_time(), 0);
        assert!(!furnace.is_lit());
        assert!(!furnace.wants_update());
    }

    #[test]
    fn negative_saved_values_clamp_to_zero() {
        let furnace = Furnace::from_record(&record_with(-5, -1, -9)).unwrap();
        assert_eq!(furnace.burn_time(), 0);
        assert_eq!(furnace.cook_time(), 0);
        assert_eq!(furnace.max_time(), 0);
    }

    #[test]
    fn cook_progress_without_fire_is_discarded() {
        let furnace = Furnace::from_record(&record_with(0, 120, 0)).unwrap();
        assert_eq!(furnace.cook_time(), 0);
    }

    #[test]
    fn max_time_falls_back_to_burn_time() {
        let furnace = Furnace::from_record(&record_with(80, 0, 0)).unwrap();
        assert_eq!(furnace.max_time(), 80);
        assert!(furnace.wants_update());
    }

    #[test]
    fn update_burns_fuel_and_advances_progress() {
        let mut furnace = Furnace::from_record(&record_with(3, 0, 3)).unwrap();
        assert!(furnace.on_update());
        assert_eq!(furnace.burn_time(), 2);
        assert_eq!(furnace.cook_time(), 1);
        assert!(furnace.on_update());
        // Final tick of fuel: fire dies, progress resets, no re-schedule.
        assert!(!furnace.on_update());
        assert_eq!(furnace.burn_time(), 0);
        assert_eq!(furnace.cook_time(), 0);
    }

    #[test]
    fn cold_furnace_update_is_a_terminal_no_op() {
        let mut furnace = Furnace::from_record(&record_with(0, 0, 0)).unwrap();
        assert!(!furnace.on_update());
        assert_eq!(furnace.burn_time(), 0);
    }

    #[test]
    fn state_roundtrips_through_save_data() {
        let lit = Furnace::from_record(&record_with(40, 12, 80)).unwrap();
        let mut out = Record::new();
        BlockPos::new(0, 64, 0).write_into(&mut out);
        lit.write_save_data(&mut out);
        let again = Furnace::from_record(&out).unwrap();
        assert_eq!(again.burn_time(), 40);
        assert_eq!(again.cook_time(), 12);
        assert_eq!(again.max_time(), 80);
    }

    #[test]
    fn add_fuel_lights_the_furnace() {
        let mut record = Record::new();
        BlockPos::new(0, 64, 0).write_into(&mut record);
        let mut furnace = Furnace::from_record(&record).unwrap();
        furnace.add_fuel(100);
        assert!(furnace.is_lit());
        assert_eq!(furnace.max_time(), 100);
    }
}
