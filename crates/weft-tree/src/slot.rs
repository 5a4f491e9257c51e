use crate::NodeId;

/// Named cell for saving a cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    Slot0,
    Slot1,
    Slot2,
    Slot3,
    Slot4,
}

impl Slot {
    pub const ALL: [Self; 5] = [Self::Slot0, Self::Slot1, Self::Slot2, Self::Slot3, Self::Slot4];
}

/// Single-use storage behind the [`Slot`]s: taking a position out empties the slot.
#[derive(Debug, Default)]
pub(crate) struct Slots {
    saved: [Option<NodeId>; Slot::ALL.len()],
}

impl Slots {
    pub(crate) fn store(&mut self, slot: Slot, node: NodeId) -> Option<NodeId> {
        self.saved[slot as usize].replace(node)
    }

    pub(crate) fn take(&mut self, slot: Slot) -> Option<NodeId> {
        self.saved[slot as usize].take()
    }
}
