//! The tagged key/value compound tiles serialize to and from.
//!
//! A [`Record`] is a thin wrapper over a `serde_json` object: a
//! self-describing tree of named string, integer, and nested-compound
//! values. The wrapper pins down the access rules this crate relies on --
//! required keys surface shape errors as [`TileError`], optional keys read
//! as `Option`, and integers are checked against the 32-bit range the disk
//! format promises.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::TileError;

/// Reserved key: the variant's canonical save identifier (string).
pub const TAG_ID: &str = "id";
/// Reserved key: x coordinate (32-bit integer).
pub const TAG_X: &str = "x";
/// Reserved key: y coordinate (32-bit integer).
pub const TAG_Y: &str = "y";
/// Reserved key: z coordinate (32-bit integer).
pub const TAG_Z: &str = "z";

/// The keys owned by the base save path. Variant save hooks must not
/// write these.
pub const RESERVED_KEYS: [&str; 4] = [TAG_ID, TAG_X, TAG_Y, TAG_Z];

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// A tagged compound: ordered named values forming one persisted tile.
///
/// Serializes transparently as a JSON object, so records embed directly in
/// larger serialized structures (archives, nested subtrees).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(serde_json::Map<String, Value>);

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self(serde_json::Map::new())
    }

    /// Number of direct keys in this record.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no keys at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `key` is present, regardless of its value kind.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterate the record's keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    // -- writers ------------------------------------------------------------

    /// Set `key` to a 32-bit integer, replacing any previous value.
    pub fn set_int(&mut self, key: &str, value: i32) {
        self.0.insert(key.to_owned(), Value::from(value));
    }

    /// Set `key` to a string, replacing any previous value.
    pub fn set_string(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_owned(), Value::String(value.into()));
    }

    /// Set `key` to a nested compound, replacing any previous value.
    pub fn set_record(&mut self, key: &str, value: Record) {
        self.0.insert(key.to_owned(), Value::Object(value.0));
    }

    /// Copy every key of `other` into this record. Keys already present
    /// are overwritten (last write wins).
    pub fn merge_from(&mut self, other: &Record) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    // -- required readers ---------------------------------------------------

    /// Read a required 32-bit integer.
    ///
    /// # Errors
    ///
    /// [`TileError::MissingKey`] if absent, [`TileError::KeyKind`] if the
    /// value is not an integer, [`TileError::IntOutOfRange`] if it does not
    /// fit in `i32`.
    pub fn int(&self, key: &str) -> Result<i32, TileError> {
        let value = self.0.get(key).ok_or_else(|| TileError::MissingKey {
            key: key.to_owned(),
        })?;
        let wide = match value {
            Value::Number(n) => n.as_i64().ok_or_else(|| TileError::KeyKind {
                key: key.to_owned(),
                expected: "an integer",
                found: "a non-integer number",
            })?,
            other => {
                return Err(TileError::KeyKind {
                    key: key.to_owned(),
                    expected: "an integer",
                    found: kind_name(other),
                })
            }
        };
        i32::try_from(wide).map_err(|_| TileError::IntOutOfRange {
            key: key.to_owned(),
            value: wide,
        })
    }

    /// Read a required string.
    ///
    /// # Errors
    ///
    /// [`TileError::MissingKey`] if absent, [`TileError::KeyKind`] if the
    /// value is not a string.
    pub fn string(&self, key: &str) -> Result<&str, TileError> {
        let value = self.0.get(key).ok_or_else(|| TileError::MissingKey {
            key: key.to_owned(),
        })?;
        value.as_str().ok_or_else(|| TileError::KeyKind {
            key: key.to_owned(),
            expected: "a string",
            found: kind_name(value),
        })
    }

    // -- optional readers ---------------------------------------------------

    /// Read an optional 32-bit integer. Absent, non-integer, and
    /// out-of-range values all read as `None` -- variant loaders substitute
    /// their own defaults.
    pub fn opt_int(&self, key: &str) -> Option<i32> {
        let wide = self.0.get(key)?.as_i64()?;
        i32::try_from(wide).ok()
    }

    /// Read an optional string. Absent and non-string values read as `None`.
    pub fn opt_string(&self, key: &str) -> Option<&str> {
        self.0.get(key)?.as_str()
    }

    /// Clone an optional nested compound. Absent and non-compound values
    /// read as `None`.
    pub fn opt_record(&self, key: &str) -> Option<Record> {
        match self.0.get(key)? {
            Value::Object(map) => Some(Record(map.clone())),
            _ => None,
        }
    }
}

/// Human-readable kind of a tagged value, for error messages.
fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a compound",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
