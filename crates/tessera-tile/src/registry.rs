//! The save-identifier registry: string names to tile constructors.
//!
//! Saved tile records carry a string identifier; the registry maps that
//! identifier (and any historical aliases) back to a constructor so new
//! variants can be added without touching a central dispatch table. One
//! registry instance is built during setup and read from then on -- it is
//! passed by reference wherever creation or resolution happens, never held
//! in global state.

use std::any::TypeId;
use std::collections::HashMap;

use crate::grid::TileGrid;
use crate::handle::TileId;
use crate::record::Record;
use crate::tile::{Tile, TileVariant};
use crate::TileError;

/// A monomorphized tile constructor, as stored in the registry.
pub type TileFactory = fn(&Record) -> Result<Box<dyn Tile>, TileError>;

fn build_tile<T: TileVariant>(record: &Record) -> Result<Box<dyn Tile>, TileError> {
    Ok(Box::new(T::from_record(record)?))
}

#[derive(Clone, Copy)]
struct Registration {
    tile_type: TypeId,
    factory: TileFactory,
}

// ---------------------------------------------------------------------------
// TileRegistry
// ---------------------------------------------------------------------------

/// Maps save identifiers and aliases to tile constructors, and tile types
/// back to their ordered save-name lists.
pub struct TileRegistry {
    by_name: HashMap<String, Registration>,
    save_names: HashMap<TypeId, Vec<String>>,
}

impl TileRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            by_name: HashMap::new(),
            save_names: HashMap::new(),
        }
    }

    /// Register a variant under `save_names`, in order. The variant's own
    /// canonical name ([`TileVariant::SAVE_ID`]) is appended when the list
    /// does not already contain it, so an empty list is allowed. The first
    /// entry of the final list becomes the canonical identifier written
    /// into save records.
    ///
    /// An alias already bound to a different variant is rebound: last
    /// registration wins. That is deliberate (it lets a variant take over
    /// a legacy name) but easy to trip over, so the overwrite is logged.
    pub fn register<T: TileVariant>(&mut self, save_names: &[&str]) {
        let mut names: Vec<String> = save_names.iter().map(|n| (*n).to_owned()).collect();
        if !names.iter().any(|n| n == T::SAVE_ID) {
            names.push(T::SAVE_ID.to_owned());
        }

        let registration = Registration {
            tile_type: TypeId::of::<T>(),
            factory: build_tile::<T>,
        };
        for name in &names {
            if let Some(previous) = self.by_name.insert(name.clone(), registration) {
                if previous.tile_type != registration.tile_type {
                    tracing::warn!(
                        alias = %name,
                        variant = T::SAVE_ID,
                        "tile alias was already bound to another variant; rebinding"
                    );
                }
            }
        }
        self.save_names.insert(TypeId::of::<T>(), names);
    }

    /// Look up the constructor for an identifier. Case-sensitive exact
    /// match; unknown identifiers read as `None`, because stale or modded
    /// save data is an expected condition, not a failure.
    pub fn resolve(&self, identifier: &str) -> Option<TileFactory> {
        self.by_name.get(identifier).map(|r| r.factory)
    }

    /// Resolve `identifier`, construct a tile from `record`, and attach it
    /// to `grid`.
    ///
    /// Returns `Ok(None)` when the identifier is unknown -- the caller
    /// decides whether to skip or complain.
    ///
    /// # Errors
    ///
    /// Propagates [`TileError`] when the record's shape is wrong (missing
    /// or malformed coordinates, malformed required variant keys).
    pub fn create(
        &self,
        identifier: &str,
        grid: &mut TileGrid,
        record: &Record,
    ) -> Result<Option<TileId>, TileError> {
        let Some(factory) = self.resolve(identifier) else {
            return Ok(None);
        };
        let tile = factory(record)?;
        Ok(Some(grid.add_tile(tile)))
    }

    /// The canonical save identifier for a registered tile type: the first
    /// entry of its registered name list.
    ///
    /// # Panics
    ///
    /// Panics when the type was never registered. Asking for the save
    /// identifier of an unregistered variant is a programming error, not a
    /// runtime condition.
    pub fn save_id_of(&self, tile_type: TypeId) -> &str {
        self.save_names
            .get(&tile_type)
            .and_then(|names| names.first())
            .map(String::as_str)
            .expect("tile variant is not registered")
    }

    /// Typed convenience for [`save_id_of`](Self::save_id_of).
    ///
    /// # Panics
    ///
    /// Panics when `T` was never registered.
    pub fn save_id<T: TileVariant>(&self) -> &str {
        self.save_id_of(TypeId::of::<T>())
    }

    /// Number of registered variants.
    pub fn len(&self) -> usize {
        self.save_names.len()
    }

    /// Whether no variants have been registered.
    pub fn is_empty(&self) -> bool {
        self.save_names.is_empty()
    }

    /// Every registered alias, sorted, for diagnostics.
    pub fn registered_aliases(&self) -> Vec<&str> {
        let mut aliases: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        aliases.sort_unstable();
        aliases
    }
}

impl Default for TileRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
