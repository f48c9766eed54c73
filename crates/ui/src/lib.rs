#![warn(missing_docs)]
//! Presentation layer for the inventory: grid geometry, egui painting and
//! pointer-to-cell resolution.

pub mod layout;
pub mod view;

pub use layout::{atlas_tile, GridLayout, LayoutError};
pub use view::{item_color, InteractOutcome, InventoryView, SpriteAtlas};
