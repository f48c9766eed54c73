//! A single inventory slot.

use serde::Serialize;

/// Item identifier. `EMPTY` marks an unoccupied slot.
pub type ItemId = u32;

/// Reserved item id for an empty slot.
pub const EMPTY: ItemId = 0;

/// An item id paired with a quantity.
///
/// `item_id == EMPTY` is the only emptiness signal; the amount of an empty
/// cell is kept at zero by every inventory transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Cell {
    /// Item held by this slot.
    pub item_id: ItemId,
    /// Number of items in the stack.
    pub amount: u32,
}

impl Cell {
    /// An unoccupied slot.
    pub const EMPTY: Self = Self {
        item_id: EMPTY,
        amount: 0,
    };

    /// Create a cell holding `amount` of `item_id`.
    pub fn new(item_id: ItemId, amount: u32) -> Self {
        Self { item_id, amount }
    }

    /// Whether the slot holds nothing.
    pub fn is_empty(&self) -> bool {
        self.item_id == EMPTY
    }

    /// Whether the slot holds the given item.
    pub fn holds(&self, item_id: ItemId) -> bool {
        self.item_id == item_id
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::EMPTY;
    }

    /// Remove one unit, clearing the slot once the stack runs out.
    pub(crate) fn take_one(&mut self) {
        self.amount -= 1;
        if self.amount < 1 {
            self.clear();
        }
    }
}
