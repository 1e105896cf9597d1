//! Sign: four lines of text, nothing else.

use std::any::Any;

use crate::record::Record;
use crate::spawn::SpawnContext;
use crate::tile::{Tile, TileBase, TileVariant};
use crate::TileError;

/// Number of text lines on a sign.
pub const LINE_COUNT: usize = 4;

/// Record keys for the text lines, top to bottom.
const TAG_LINES: [&str; LINE_COUNT] = ["Text1", "Text2", "Text3", "Text4"];

/// A sign tile. Lines missing from a record read as empty, and every line
/// is written back on save, so a sign always produces a minimal record.
#[derive(Debug)]
pub struct Sign {
    base: TileBase,
    lines: [String; LINE_COUNT],
}

impl Sign {
    /// The text of line `index` (0-based, top to bottom).
    ///
    /// # Panics
    ///
    /// Panics when `index` is not below [`LINE_COUNT`].
    pub fn line(&self, index: usize) -> &str {
        &self.lines[index]
    }

    /// Replace the text of line `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index` is not below [`LINE_COUNT`].
    pub fn set_line(&mut self, index: usize, text: impl Into<String>) {
        self.lines[index] = text.into();
    }

    /// All four lines, top to bottom.
    pub fn lines(&self) -> &[String; LINE_COUNT] {
        &self.lines
    }
}

impl Tile for Sign {
    fn base(&self) -> &TileBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut TileBase {
        &mut self.base
    }

    fn read_save_data(&mut self, record: &Record) -> Result<(), TileError> {
        for (line, tag) in self.lines.iter_mut().zip(TAG_LINES) {
            *line = record.opt_string(tag).unwrap_or_default().to_owned();
        }
        Ok(())
    }

    fn write_save_data(&self, record: &mut Record) {
        for (line, tag) in self.lines.iter().zip(TAG_LINES) {
            record.set_string(tag, line.clone());
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TileVariant for Sign {
    const SAVE_ID: &'static str = "Sign";

    fn from_record(record: &Record) -> Result<Self, TileError> {
        let mut sign = Self {
            base: TileBase::from_record(record)?,
            lines: Default::default(),
        };
        sign.read_save_data(record)?;
        Ok(sign)
    }

    fn spawn_data(_ctx: &SpawnContext<'_>, record: &mut Record) {
        // A placed sign starts blank; the lines exist from the first save.
        for tag in TAG_LINES {
            record.set_string(tag, "");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
