//! Screen geometry of the inventory grid.
//!
//! Cell rectangles are derived from the index on demand; nothing here is
//! stored alongside the inventory state.

use egui::{pos2, vec2, Pos2, Rect};
use serde::{Deserialize, Serialize};
use stashgrid_core::{ItemId, EMPTY};
use thiserror::Error;

/// Errors that make a layout unusable for hit-testing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Rows need at least one cell.
    #[error("row_size must be greater than zero")]
    ZeroRowSize,
    /// Cells need a positive, finite size.
    #[error("cell_size must be positive and finite (got {0})")]
    BadCellSize(f32),
    /// Gaps cannot be negative.
    #[error("gap must be zero or positive and finite (got {0})")]
    BadGap(f32),
}

/// Row-major grid placement in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GridLayout {
    /// Cells per row.
    pub row_size: usize,
    /// Edge length of a square cell.
    pub cell_size: f32,
    /// Spacing between neighbouring cells.
    pub gap: f32,
    /// Top-left corner of cell 0.
    pub origin: [f32; 2],
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            row_size: 9,
            cell_size: 64.0,
            gap: 2.0,
            origin: [200.0, 200.0],
        }
    }
}

impl GridLayout {
    /// Check that the layout can place and resolve cells.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.row_size == 0 {
            return Err(LayoutError::ZeroRowSize);
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(LayoutError::BadCellSize(self.cell_size));
        }
        if !(self.gap.is_finite() && self.gap >= 0.0) {
            return Err(LayoutError::BadGap(self.gap));
        }
        Ok(())
    }

    fn stride(&self) -> f32 {
        self.cell_size + self.gap
    }

    fn origin(&self) -> Pos2 {
        pos2(self.origin[0], self.origin[1])
    }

    /// Screen rectangle of the cell at `index`.
    pub fn hitbox(&self, index: usize) -> Rect {
        let column = (index % self.row_size) as f32;
        let row = (index / self.row_size) as f32;
        let min = self.origin() + vec2(column, row) * self.stride();
        Rect::from_min_size(min, vec2(self.cell_size, self.cell_size))
    }

    /// Index of the cell under `point`, if any.
    ///
    /// Edges are half-open: a cell contains its top and left edge but not its
    /// bottom and right edge. Points in the gaps resolve to nothing.
    pub fn cell_at(&self, point: Pos2, cell_count: usize) -> Option<usize> {
        let local = point - self.origin();
        if !(local.x >= 0.0 && local.y >= 0.0) {
            return None;
        }

        let stride = self.stride();
        let column = (local.x / stride).floor();
        let row = (local.y / stride).floor();
        if local.x - column * stride >= self.cell_size || local.y - row * stride >= self.cell_size {
            return None;
        }

        let (column, row) = (column as usize, row as usize);
        if column >= self.row_size {
            return None;
        }
        let index = row.checked_mul(self.row_size)?.checked_add(column)?;
        (index < cell_count).then_some(index)
    }

    /// Where the held stack is drawn: one cell centered on the cursor.
    pub fn hand_rect(&self, cursor: Pos2) -> Rect {
        Rect::from_center_size(cursor, vec2(self.cell_size, self.cell_size))
    }

    /// Bounding box of a grid with `cell_count` cells.
    pub fn bounds(&self, cell_count: usize) -> Rect {
        if cell_count == 0 {
            return Rect::from_min_size(self.origin(), egui::Vec2::ZERO);
        }
        let columns = cell_count.min(self.row_size);
        let rows = cell_count.div_ceil(self.row_size);
        let size = vec2(columns as f32, rows as f32) * self.stride() - vec2(self.gap, self.gap);
        Rect::from_min_size(self.origin(), size)
    }
}

/// Source rectangle of an item sprite in a row-major atlas.
///
/// Item id 1 occupies the first tile. Returns `None` for [`EMPTY`] or an
/// atlas without columns.
pub fn atlas_tile(item_id: ItemId, atlas_columns: u32, tile_px: f32) -> Option<Rect> {
    if item_id == EMPTY || atlas_columns == 0 {
        return None;
    }
    let tile = item_id - 1;
    let column = (tile % atlas_columns) as f32;
    let row = (tile / atlas_columns) as f32;
    Some(Rect::from_min_size(
        pos2(column * tile_px, row * tile_px),
        vec2(tile_px, tile_px),
    ))
}
