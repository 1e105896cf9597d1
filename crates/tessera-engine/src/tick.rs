//! Fixed-timestep tick loop for the tile grid.
//!
//! Each tick takes the grid's pending-update set in one swap and walks it
//! in block-hash order, invoking [`on_update`](tessera_tile::tile::Tile::on_update)
//! on every tile still live. Tiles that return `true` go straight back
//! into the pending set for the next tick; tiles closed between
//! scheduling and the drain are skipped. Everything runs on the calling
//! thread -- there is exactly one mutator, so there are no locks.
//!
//! # Example
//!
//! ```
//! use tessera_engine::tick::{TickConfig, TickLoop};
//! use tessera_tile::prelude::*;
//!
//! let mut registry = TileRegistry::new();
//! tessera_tile::variants::register_builtin(&mut registry);
//! let mut tick_loop = TickLoop::new(registry, TickConfig::default());
//!
//! let mut record = Record::new();
//! record.set_string(TAG_ID, "Furnace");
//! record.set_int(TAG_X, 0);
//! record.set_int(TAG_Y, 64);
//! record.set_int(TAG_Z, 0);
//! record.set_int("BurnTime", 2);
//! tick_loop.create_tile("Furnace", &record).unwrap().unwrap();
//!
//! // The lit furnace scheduled itself on attach, burns for two ticks,
//! // then drops off the schedule.
//! assert_eq!(tick_loop.grid().pending_update_count(), 1);
//! tick_loop.run_ticks(2);
//! assert_eq!(tick_loop.grid().pending_update_count(), 0);
//! ```

use std::time::{Duration, Instant};

use tessera_tile::grid::TileGrid;
use tessera_tile::handle::TileId;
use tessera_tile::record::Record;
use tessera_tile::registry::TileRegistry;
use tessera_tile::TileError;

// ---------------------------------------------------------------------------
// TickConfig
// ---------------------------------------------------------------------------

/// Configuration for the tick loop.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Fixed time step in seconds per tick. Must be positive and finite.
    pub fixed_dt: f64,
}

impl Default for TickConfig {
    /// Defaults to 20 ticks per second (1/20 second per tick).
    fn default() -> Self {
        Self { fixed_dt: 1.0 / 20.0 }
    }
}

// ---------------------------------------------------------------------------
// TickDiagnostics
// ---------------------------------------------------------------------------

/// Timing and volume diagnostics for the last tick.
#[derive(Debug, Clone, Default)]
pub struct TickDiagnostics {
    /// Tiles whose `on_update` ran this tick.
    pub updates_run: usize,
    /// Tiles that asked to run again next tick.
    pub updates_requeued: usize,
    /// Wall-clock time for the whole tick.
    pub total_time: Duration,
}

// ---------------------------------------------------------------------------
// TickLoop
// ---------------------------------------------------------------------------

/// Drives a [`TileGrid`] forward in fixed steps.
///
/// Owns the grid and the registry together so that creation, ticking, and
/// archiving share one consistent view of the world. The registry is built
/// before the loop and only read afterwards.
pub struct TickLoop {
    registry: TileRegistry,
    grid: TileGrid,
    tick_counter: u64,
    fixed_dt: f64,
    last_diagnostics: TickDiagnostics,
}

impl TickLoop {
    /// Create a tick loop over an empty grid.
    ///
    /// # Panics
    ///
    /// Panics when `config.fixed_dt` is not positive and finite.
    pub fn new(registry: TileRegistry, config: TickConfig) -> Self {
        assert!(
            config.fixed_dt > 0.0 && config.fixed_dt.is_finite(),
            "fixed_dt must be positive and finite, got {}",
            config.fixed_dt
        );
        Self {
            registry,
            grid: TileGrid::new(),
            tick_counter: 0,
            fixed_dt: config.fixed_dt,
            last_diagnostics: TickDiagnostics::default(),
        }
    }

    /// The registry this loop resolves identifiers against.
    pub fn registry(&self) -> &TileRegistry {
        &self.registry
    }

    /// Shared access to the hosted grid.
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Mutable access to the hosted grid.
    pub fn grid_mut(&mut self) -> &mut TileGrid {
        &mut self.grid
    }

    /// Resolve `identifier` and attach a tile built from `record`.
    ///
    /// Returns `Ok(None)` for unknown identifiers, mirroring
    /// [`TileRegistry::create`].
    ///
    /// # Errors
    ///
    /// Propagates [`TileError`] for malformed records.
    pub fn create_tile(
        &mut self,
        identifier: &str,
        record: &Record,
    ) -> Result<Option<TileId>, TileError> {
        self.registry.create(identifier, &mut self.grid, record)
    }

    /// Execute one tick: drain the pending-update set, run each live
    /// tile's update, and re-schedule the ones that asked for it.
    ///
    /// Returns the number of updates that ran.
    pub fn tick(&mut self) -> usize {
        let tick_start = Instant::now();
        let due = self.grid.take_pending_updates();
        let mut updates_run = 0;
        let mut updates_requeued = 0;

        for (_hash, id) in due {
            // A tile can close between scheduling and the drain; its entry
            // is dropped on close, but replacement at the same position can
            // still leave a stale handle here.
            if self.grid.is_closed(id) {
                continue;
            }
            let again = match self.grid.tile_mut(id) {
                Some(tile) => tile.on_update(),
                None => continue,
            };
            updates_run += 1;
            if again {
                self.grid.schedule_update(id);
                updates_requeued += 1;
            }
        }

        self.tick_counter += 1;
        self.last_diagnostics = TickDiagnostics {
            updates_run,
            updates_requeued,
            total_time: tick_start.elapsed(),
        };
        tracing::trace!(
            tick = self.tick_counter,
            updates = updates_run,
            requeued = updates_requeued,
            "tick complete"
        );
        updates_run
    }

    /// Run `count` ticks. Returns the total number of updates that ran.
    pub fn run_ticks(&mut self, count: u64) -> u64 {
        let mut total = 0u64;
        for _ in 0..count {
            total += self.tick() as u64;
        }
        total
    }

    /// Number of ticks executed so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_counter
    }

    /// Simulation time in seconds: tick count times the fixed step.
    pub fn sim_time(&self) -> f64 {
        self.tick_counter as f64 * self.fixed_dt
    }

    /// The fixed time step in seconds per tick.
    pub fn fixed_dt(&self) -> f64 {
        self.fixed_dt
    }

    /// Diagnostics from the most recent tick.
    pub fn last_diagnostics(&self) -> &TickDiagnostics {
        &self.last_diagnostics
    }

    /// Overwrite the tick counter; used when restoring an archive.
    pub(crate) fn set_tick_counter(&mut self, counter: u64) {
        self.tick_counter = counter;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_tile::record::{TAG_ID, TAG_X, TAG_Y, TAG_Z};
    use tessera_tile::variants::register_builtin;

    fn new_loop() -> TickLoop {
        let mut registry = TileRegistry::new();
        register_builtin(&mut registry);
        TickLoop::new(registry, TickConfig::default())
    }

    fn furnace_record(x: i32, burn: i32) -> Record {
        let mut record = Record::new();
        record.set_string(TAG_ID, "Furnace");
        record.set_int(TAG_X, x);
        record.set_int(TAG_Y, 64);
        record.set_int(TAG_Z, 0);
        record.set_int("BurnTime", burn);
        record
    }

    #[test]
    #[should_panic(expected = "fixed_dt must be positive")]
    fn zero_dt_is_rejected() {
        let _ = TickLoop::new(TileRegistry::new(), TickConfig { fixed_dt: 0.0 });
    }

    #[test]
    fn ticking_an_empty_grid_advances_time_only() {
        let mut tick_loop = new_loop();
        assert_eq!(tick_loop.tick(), 0);
        assert_eq!(tick_loop.tick_count(), 1);
        assert!((tick_loop.sim_time() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn lit_furnace_runs_until_the_fuel_is_gone() {
        let mut tick_loop = new_loop();
        tick_loop
            .create_tile("Furnace", &furnace_record(0, 3))
            .unwrap()
            .unwrap();

        assert_eq!(tick_loop.grid().pending_update_count(), 1);
        assert_eq!(tick_loop.tick(), 1);
        assert_eq!(tick_loop.last_diagnostics().updates_requeued, 1);
        assert_eq!(tick_loop.tick(), 1);
        assert_eq!(tick_loop.tick(), 1);
        assert_eq!(tick_loop.last_diagnostics().updates_requeued, 0);
        // Fuel exhausted: nothing left to drain.
        assert_eq!(tick_loop.tick(), 0);
        assert_eq!(tick_loop.grid().pending_update_count(), 0);
    }

    #[test]
    fn cold_tiles_are_not_scheduled() {
        let mut tick_loop = new_loop();
        tick_loop
            .create_tile("Furnace", &furnace_record(0, 0))
            .unwrap()
            .unwrap();
        assert_eq!(tick_loop.grid().pending_update_count(), 0);
        assert_eq!(tick_loop.tick(), 0);
    }

    #[test]
    fn closing_before_the_drain_skips_the_update() {
        let mut tick_loop = new_loop();
        let id = tick_loop
            .create_tile("Furnace", &furnace_record(0, 5))
            .unwrap()
            .unwrap();
        tick_loop.grid_mut().close_tile(id);
        assert_eq!(tick_loop.tick(), 0);
    }

    #[test]
    fn two_furnaces_update_independently() {
        let mut tick_loop = new_loop();
        tick_loop
            .create_tile("Furnace", &furnace_record(0, 1))
            .unwrap()
            .unwrap();
        tick_loop
            .create_tile("Furnace", &furnace_record(1, 4))
            .unwrap()
            .unwrap();

        assert_eq!(tick_loop.tick(), 2);
        // The one-tick furnace went cold; the other keeps burning.
        assert_eq!(tick_loop.grid().pending_update_count(), 1);
        assert_eq!(tick_loop.tick(), 1);
    }

    #[test]
    fn run_ticks_totals_updates() {
        let mut tick_loop = new_loop();
        tick_loop
            .create_tile("Furnace", &furnace_record(0, 4))
            .unwrap()
            .unwrap();
        assert_eq!(tick_loop.run_ticks(10), 4);
        assert_eq!(tick_loop.tick_count(), 10);
    }
}
