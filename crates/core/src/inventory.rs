//! Grid inventory with a held-stack hand.
//!
//! The inventory owns a fixed row-major set of cells plus one hand cell. Two
//! interactions drive every change:
//!
//! - primary: merge the whole hand into a matching stack, drop it into an
//!   empty cell, or swap with a different stack;
//! - secondary: move a single unit from the hand, split a stack in half into an
//!   empty hand, or swap.

use std::fmt;
use std::mem;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::cell::{Cell, ItemId};
use crate::config::{ConfigError, InventoryConfig};

/// Which of the two interactions is being applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    /// Whole-stack merge, deposit or swap.
    Primary,
    /// Single-unit merge or deposit, half split, or swap.
    Secondary,
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interaction::Primary => f.write_str("primary"),
            Interaction::Secondary => f.write_str("secondary"),
        }
    }
}

/// The branch an accepted interaction took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "branch", rename_all = "snake_case")]
pub enum Transition {
    /// Hand units were added to a stack of the same item.
    Merged {
        /// Units moved from the hand into the cell.
        moved: u32,
    },
    /// Hand units were placed into an empty cell.
    Deposited {
        /// Units moved from the hand into the cell.
        moved: u32,
    },
    /// Half of the cell's stack was lifted into the empty hand.
    Split {
        /// Units now held by the hand.
        taken: u32,
    },
    /// Cell and hand exchanged their contents.
    Swapped,
}

/// Reasons an interaction is rejected. A rejected call never mutates state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InteractError {
    /// The index does not address a cell.
    #[error("cell index {index} out of range (inventory has {len} cells)")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Number of cells in the inventory.
        len: usize,
    },
    /// A single unit was requested from an empty hand.
    #[error("hand holds nothing to place")]
    EmptyHand,
    /// The target stack is already at the configured cap.
    #[error("cell {index} is already at the stack cap")]
    StackFull {
        /// Index of the full cell.
        index: usize,
    },
    /// Seeding needs an empty hand.
    #[error("hand already holds a stack")]
    HandOccupied,
    /// A seed stack must name an item and carry at least one unit.
    #[error("seed stack {item_id} x{amount} is empty")]
    EmptySeed {
        /// Requested item id.
        item_id: ItemId,
        /// Requested amount.
        amount: u32,
    },
}

/// Fixed set of cells plus the hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    cells: Vec<Cell>,
    hand: Cell,
    config: InventoryConfig,
}

impl Inventory {
    /// Create the reference inventory: 27 empty cells, no stack cap.
    pub fn new() -> Self {
        Self::build(InventoryConfig::default())
    }

    /// Create an empty inventory from a validated configuration.
    pub fn with_config(config: InventoryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: InventoryConfig) -> Self {
        Self {
            cells: vec![Cell::EMPTY; config.cell_count],
            hand: Cell::EMPTY,
            config,
        }
    }

    /// Seed several cells in order, consuming and returning the inventory.
    pub fn seeded<I>(mut self, entries: I) -> Result<Self, InteractError>
    where
        I: IntoIterator<Item = (usize, ItemId, u32)>,
    {
        for (index, item_id, amount) in entries {
            self.seed(index, item_id, amount)?;
        }
        Ok(self)
    }

    /// Give a cell initial contents by holding the stack and placing it.
    ///
    /// Follows the same rules as [`Inventory::primary_interact`], so seeding a
    /// cell that holds a different item swaps and leaves that item in the hand.
    /// An empty stack is refused without touching the target.
    pub fn seed(
        &mut self,
        index: usize,
        item_id: ItemId,
        amount: u32,
    ) -> Result<Transition, InteractError> {
        if !self.hand.is_empty() {
            return Err(InteractError::HandOccupied);
        }
        self.check_index(index)?;
        let stack = Cell::new(item_id, amount);
        if stack.is_empty() || amount == 0 {
            return Err(InteractError::EmptySeed { item_id, amount });
        }

        self.set_hand(stack);
        let result = self.primary_interact(index);
        if result.is_err() {
            self.hand.clear();
        }
        result
    }

    /// Apply either interaction to the cell at `index`.
    pub fn interact(
        &mut self,
        interaction: Interaction,
        index: usize,
    ) -> Result<Transition, InteractError> {
        match interaction {
            Interaction::Primary => self.primary_interact(index),
            Interaction::Secondary => self.secondary_interact(index),
        }
    }

    /// Whole-stack interaction: merge, deposit into an empty cell, or swap.
    pub fn primary_interact(&mut self, index: usize) -> Result<Transition, InteractError> {
        let result = self.apply_primary(index);
        log_outcome(Interaction::Primary, index, &result);
        result
    }

    /// Single-unit interaction: merge one, deposit one, split in half, or swap.
    pub fn secondary_interact(&mut self, index: usize) -> Result<Transition, InteractError> {
        let result = self.apply_secondary(index);
        log_outcome(Interaction::Secondary, index, &result);
        result
    }

    fn apply_primary(&mut self, index: usize) -> Result<Transition, InteractError> {
        let config = self.config;
        let (cell, hand) = self.slot_and_hand(index)?;

        if cell.holds(hand.item_id) {
            let moved = config.room_for(cell.amount, hand.amount);
            if moved == 0 && hand.amount > 0 {
                return Err(InteractError::StackFull { index });
            }
            cell.amount += moved;
            hand.amount -= moved;
            if hand.amount == 0 {
                hand.clear();
            }
            return Ok(Transition::Merged { moved });
        }

        if cell.is_empty() {
            let moved = config.room_for(0, hand.amount);
            *cell = Cell::new(hand.item_id, moved);
            hand.amount -= moved;
            if hand.amount == 0 {
                hand.clear();
            }
            return Ok(Transition::Deposited { moved });
        }

        mem::swap(cell, hand);
        Ok(Transition::Swapped)
    }

    fn apply_secondary(&mut self, index: usize) -> Result<Transition, InteractError> {
        let config = self.config;
        let (cell, hand) = self.slot_and_hand(index)?;

        // An empty cell also "matches" an empty hand; both cases need a unit to move.
        let merging = cell.holds(hand.item_id);
        if merging || cell.is_empty() {
            if hand.amount == 0 {
                return Err(InteractError::EmptyHand);
            }
            if config.room_for(cell.amount, 1) == 0 {
                return Err(InteractError::StackFull { index });
            }
            cell.item_id = hand.item_id;
            cell.amount += 1;
            hand.take_one();
            return Ok(if merging {
                Transition::Merged { moved: 1 }
            } else {
                Transition::Deposited { moved: 1 }
            });
        }

        if hand.is_empty() && cell.amount > 1 {
            let half = cell.amount / 2;
            *hand = Cell::new(cell.item_id, half);
            cell.amount -= half;
            return Ok(Transition::Split { taken: half });
        }

        // A single-unit stack with an empty hand lands here too: it is lifted whole.
        mem::swap(cell, hand);
        Ok(Transition::Swapped)
    }

    fn check_index(&self, index: usize) -> Result<(), InteractError> {
        if index < self.cells.len() {
            Ok(())
        } else {
            Err(InteractError::OutOfRange {
                index,
                len: self.cells.len(),
            })
        }
    }

    fn slot_and_hand(&mut self, index: usize) -> Result<(&mut Cell, &mut Cell), InteractError> {
        let len = self.cells.len();
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(InteractError::OutOfRange { index, len })?;
        Ok((cell, &mut self.hand))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cell at `index`, if it exists.
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// The stack currently held.
    pub fn hand(&self) -> &Cell {
        &self.hand
    }

    /// Replace the held stack.
    ///
    /// A zero amount or an `EMPTY` id normalizes to an empty hand.
    pub fn set_hand(&mut self, hand: Cell) {
        self.hand = if hand.is_empty() || hand.amount == 0 {
            Cell::EMPTY
        } else {
            hand
        };
    }

    /// Number of cells (the hand is not counted).
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Sum of every amount in the cells and the hand.
    pub fn total_amount(&self) -> u64 {
        self.cells
            .iter()
            .chain(std::iter::once(&self.hand))
            .map(|cell| u64::from(cell.amount))
            .sum()
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, cell) in self.cells.iter().enumerate() {
            writeln!(f, "cell {index}: {} {}", cell.item_id, cell.amount)?;
        }
        write!(f, "hand: {} {}", self.hand.item_id, self.hand.amount)
    }
}

fn log_outcome(interaction: Interaction, index: usize, result: &Result<Transition, InteractError>) {
    match result {
        Ok(transition) => debug!(%interaction, index, ?transition, "interaction applied"),
        Err(err) => debug!(%interaction, index, %err, "interaction rejected"),
    }
}
