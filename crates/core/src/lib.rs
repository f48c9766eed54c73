#![warn(missing_docs)]
//! Inventory state machine: cells, the hand, and the interactions between them.

pub mod cell;
pub mod config;
pub mod inventory;

pub use cell::{Cell, ItemId, EMPTY};
pub use config::{ConfigError, InventoryConfig, DEFAULT_CELL_COUNT};
pub use inventory::{InteractError, Interaction, Inventory, Transition};
