//! Construction parameters for an [`Inventory`](crate::Inventory).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Slot count of the reference inventory (three rows of nine).
pub const DEFAULT_CELL_COUNT: usize = 27;

/// Errors raised when an inventory configuration is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An inventory needs at least one cell.
    #[error("inventory must have at least one cell")]
    NoCells,
    /// A stack cap of zero would make every deposit fail.
    #[error("max_stack must be greater than zero")]
    ZeroStackCap,
}

/// Shape and stacking rules of an inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Number of cells in the grid.
    pub cell_count: usize,
    /// Largest amount a single cell may hold. `None` means unlimited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_stack: Option<u32>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            cell_count: DEFAULT_CELL_COUNT,
            max_stack: None,
        }
    }
}

impl InventoryConfig {
    /// Check that an inventory can be built from this configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_count == 0 {
            return Err(ConfigError::NoCells);
        }
        if self.max_stack == Some(0) {
            return Err(ConfigError::ZeroStackCap);
        }
        Ok(())
    }

    /// How many of `offered` units fit on top of a stack of `current`.
    pub(crate) fn room_for(&self, current: u32, offered: u32) -> u32 {
        let limit = self.max_stack.unwrap_or(u32::MAX);
        offered.min(limit.saturating_sub(current))
    }
}
