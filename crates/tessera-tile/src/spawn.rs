//! Contextual parameters for spawning a brand-new tile.
//!
//! When a tile comes into existence through gameplay rather than through a
//! save file, the only inputs are circumstances: where the block was
//! placed, which way it faces, the item that placed it, who placed it.
//! [`SpawnContext`] carries exactly those four, and
//! [`codec::spawn_record`](crate::codec::spawn_record) turns them into the
//! record a constructor can load.

use crate::pos::{BlockPos, Facing};
use crate::record::Record;

// ---------------------------------------------------------------------------
// SpawnContext
// ---------------------------------------------------------------------------

/// The read-only inputs available when a tile is created in-world.
#[derive(Debug, Clone, Copy)]
pub struct SpawnContext<'a> {
    /// Where the tile is being placed.
    pub pos: BlockPos,
    /// The face the placement targeted, when one applies.
    pub face: Option<Facing>,
    /// The item that triggered the placement, when one did.
    pub item: Option<&'a ItemStack>,
    /// The actor doing the placing, when there is one.
    pub actor: Option<ActorId>,
}

impl<'a> SpawnContext<'a> {
    /// A bare context: position only.
    pub fn at(pos: BlockPos) -> Self {
        Self {
            pos,
            face: None,
            item: None,
            actor: None,
        }
    }

    /// Attach the targeted face.
    pub fn with_face(mut self, face: Facing) -> Self {
        self.face = Some(face);
        self
    }

    /// Attach the triggering item.
    pub fn with_item(mut self, item: &'a ItemStack) -> Self {
        self.item = Some(item);
        self
    }

    /// Attach the placing actor.
    pub fn with_actor(mut self, actor: ActorId) -> Self {
        self.actor = Some(actor);
        self
    }
}

// ---------------------------------------------------------------------------
// ItemStack
// ---------------------------------------------------------------------------

/// The slice of an item this subsystem reads: its identifier, an optional
/// custom display name, and an optional attached-data subtree that is
/// copied verbatim into spawn records.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStack {
    id: String,
    custom_name: Option<String>,
    attached_data: Option<Record>,
}

impl ItemStack {
    /// An item with no custom name and no attached data.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            custom_name: None,
            attached_data: None,
        }
    }

    /// Give the item a custom display name.
    pub fn with_custom_name(mut self, name: impl Into<String>) -> Self {
        self.custom_name = Some(name.into());
        self
    }

    /// Give the item an attached-data subtree.
    pub fn with_attached_data(mut self, data: Record) -> Self {
        self.attached_data = Some(data);
        self
    }

    /// The item identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The custom display name, if the item carries one.
    pub fn custom_name(&self) -> Option<&str> {
        self.custom_name.as_deref()
    }

    /// The attached-data subtree, if the item carries one.
    pub fn attached_data(&self) -> Option<&Record> {
        self.attached_data.as_ref()
    }
}

// ---------------------------------------------------------------------------
// ActorId
// ---------------------------------------------------------------------------

/// An opaque reference to the actor responsible for a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorId(pub u64);

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_builders_compose() {
        let item = ItemStack::new("tessera:chest").with_custom_name("Loot");
        let ctx = SpawnContext::at(BlockPos::new(1, 2, 3))
            .with_face(Facing::North)
            .with_item(&item)
            .with_actor(ActorId(7));
        assert_eq!(ctx.pos, BlockPos::new(1, 2, 3));
        assert_eq!(ctx.face, Some(Facing::North));
        assert_eq!(ctx.item.unwrap().custom_name(), Some("Loot"));
        assert_eq!(ctx.actor, Some(ActorId(7)));
    }

    #[test]
    fn item_without_extras_reads_as_none() {
        let item = ItemStack::new("tessera:stone");
        assert_eq!(item.id(), "tessera:stone");
        assert_eq!(item.custom_name(), None);
        assert!(item.attached_data().is_none());
    }
}
