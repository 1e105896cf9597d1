//! Tile archives: capture and restore with BLAKE3 integrity hashing.
//!
//! A [`TileArchive`] is the persistent form of a grid: every attached tile
//! rendered to its full save record, in block-hash order, plus the tick
//! counter and a BLAKE3 hex digest of the serialized payload. Restore
//! verifies the digest before touching any state, skips records with
//! identifiers the registry does not know (old saves, removed mods), and
//! aborts on records whose shape is wrong.

use serde::{Deserialize, Serialize};

use tessera_tile::codec;
use tessera_tile::record::{Record, TAG_ID};
use tessera_tile::tile::Tile;

use crate::tick::TickLoop;

// ---------------------------------------------------------------------------
// TileArchive
// ---------------------------------------------------------------------------

/// A serializable capture of every tile attached to a grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileArchive {
    /// Full save records, in block-hash order.
    pub tiles: Vec<Record>,
    /// Number of ticks executed at the time of capture.
    pub tick_counter: u64,
    /// BLAKE3 hex digest (64 lowercase hex chars) of the serialized tiles
    /// and tick counter. Verified on restore.
    pub hash: String,
}

/// Compute the BLAKE3 hex digest of the archive payload. The hash field
/// itself is derived, so it is not part of the hashed state.
fn compute_hash(tiles: &[Record], tick_counter: u64) -> String {
    #[derive(Serialize)]
    struct HashableState<'a> {
        tiles: &'a [Record],
        tick_counter: u64,
    }

    let bytes = serde_json::to_vec(&HashableState { tiles, tick_counter })
        .expect("archive payload should always be JSON-serializable");
    blake3::hash(&bytes).to_hex().to_string()
}

impl TileArchive {
    /// Assemble an archive from records, computing the digest.
    pub fn new(tiles: Vec<Record>, tick_counter: u64) -> Self {
        let hash = compute_hash(&tiles, tick_counter);
        Self {
            tiles,
            tick_counter,
            hash,
        }
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("archives should always be JSON-serializable")
    }

    /// Deserialize from a JSON string. The digest is *not* verified here;
    /// it is checked when the archive is restored.
    ///
    /// # Errors
    ///
    /// Returns an error when `json` is not a valid archive document.
    pub fn from_json(json: &str) -> Result<Self, anyhow::Error> {
        Ok(serde_json::from_str(json)?)
    }
}

// ---------------------------------------------------------------------------
// RestoreReport
// ---------------------------------------------------------------------------

/// What a restore actually did.
#[derive(Debug, Clone, Default)]
pub struct RestoreReport {
    /// Tiles re-created and attached.
    pub restored: usize,
    /// Identifiers the registry did not recognize, one entry per skipped
    /// record.
    pub skipped: Vec<String>,
}

// ---------------------------------------------------------------------------
// TickLoop archive methods
// ---------------------------------------------------------------------------

impl TickLoop {
    /// Capture every attached tile as a full save record.
    ///
    /// # Panics
    ///
    /// Panics if the grid hosts a tile whose variant is not in this loop's
    /// registry -- such a tile could never have been created through the
    /// registry in the first place.
    pub fn capture_archive(&self) -> TileArchive {
        let tiles: Vec<Record> = self
            .grid()
            .iter()
            .map(|(_id, tile)| codec::save(self.registry(), tile))
            .collect();
        TileArchive::new(tiles, self.tick_count())
    }

    /// Replace the grid's contents with the archive's tiles.
    ///
    /// The digest is verified first and every record is constructed before
    /// any existing tile is touched, so a failing restore leaves the loop
    /// exactly as it was. Records with unknown identifiers are skipped and
    /// listed in the returned report. Existing tiles are closed through
    /// the normal close path before the archived tiles attach.
    ///
    /// # Errors
    ///
    /// Returns an error when the digest does not match the payload
    /// (corruption or tampering) or when a record is malformed.
    pub fn restore_archive(&mut self, archive: &TileArchive) -> Result<RestoreReport, anyhow::Error> {
        let expected = compute_hash(&archive.tiles, archive.tick_counter);
        if expected != archive.hash {
            return Err(anyhow::anyhow!(
                "archive hash mismatch: recorded {} but recomputed {}. \
                 The archive may be corrupted or tampered with.",
                archive.hash,
                expected
            ));
        }

        // Build every tile before mutating the grid.
        let mut staged: Vec<Box<dyn Tile>> = Vec::with_capacity(archive.tiles.len());
        let mut skipped = Vec::new();
        for record in &archive.tiles {
            let identifier = record
                .string(TAG_ID)
                .map_err(|e| anyhow::anyhow!("archived record is malformed: {e}"))?;
            match self.registry().resolve(identifier) {
                Some(factory) => {
                    let tile = factory(record).map_err(|e| {
                        anyhow::anyhow!("archived record for '{identifier}' is malformed: {e}")
                    })?;
                    staged.push(tile);
                }
                None => {
                    tracing::warn!(%identifier, "skipping archived tile with unknown identifier");
                    skipped.push(identifier.to_owned());
                }
            }
        }

        self.grid_mut().close_all();
        let restored = staged.len();
        for tile in staged {
            self.grid_mut().add_tile(tile);
        }
        self.set_tick_counter(archive.tick_counter);

        tracing::debug!(restored, skipped = skipped.len(), "archive restored");
        Ok(RestoreReport { restored, skipped })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_blake3_hex() {
        let archive = TileArchive::new(Vec::new(), 0);
        assert_eq!(archive.hash.len(), 64);
        assert!(archive.hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn digest_depends_on_payload() {
        let empty = TileArchive::new(Vec::new(), 0);
        let later = TileArchive::new(Vec::new(), 1);
        assert_ne!(empty.hash, later.hash);

        let mut record = Record::new();
        record.set_string(TAG_ID, "Chest");
        let with_tile = TileArchive::new(vec![record], 0);
        assert_ne!(empty.hash, with_tile.hash);
    }

    #[test]
    fn json_roundtrip_preserves_the_archive() {
        let mut record = Record::new();
        record.set_string(TAG_ID, "Chest");
        let archive = TileArchive::new(vec![record], 42);

        let restored = TileArchive::from_json(&archive.to_json()).unwrap();
        assert_eq!(restored.tick_counter, 42);
        assert_eq!(restored.hash, archive.hash);
        assert_eq!(restored.tiles, archive.tiles);
    }
}
