//! egui presentation of an inventory: painting and pointer handling.

use egui::{
    vec2, Align2, Color32, Context, FontId, LayerId, Painter, PointerButton, Pos2, Rect, Stroke,
    TextureId,
};
use stashgrid_core::{Cell, InteractError, Interaction, Inventory, ItemId, Transition};
use tracing::trace;

use crate::layout::{atlas_tile, GridLayout, LayoutError};

const PANEL_BACKGROUND: Color32 = Color32::from_rgb(10, 10, 10);
const CELL_BACKGROUND: Color32 = Color32::from_rgb(20, 20, 20);
const CELL_BORDER: Color32 = Color32::from_rgb(60, 60, 60);
const LABEL_COLOR: Color32 = Color32::WHITE;
const SWATCH_INSET: f32 = 8.0;
const LABEL_FONT_SIZE: f32 = 14.0;

/// Result of one pointer press that landed on a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractOutcome {
    /// Interaction mapped from the pressed button.
    pub interaction: Interaction,
    /// Cell under the pointer.
    pub index: usize,
    /// What the inventory did with it.
    pub result: Result<Transition, InteractError>,
}

/// Item sprites packed row-major into one texture, item id 1 first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteAtlas {
    /// Texture already registered with egui.
    pub texture: TextureId,
    /// Tiles per atlas row.
    pub columns: u32,
    /// Tile rows in the texture.
    pub rows: u32,
}

impl SpriteAtlas {
    /// Normalized UV rectangle of an item's tile, or `None` when the atlas has
    /// no tile for it.
    pub fn uv(&self, item_id: ItemId) -> Option<Rect> {
        if self.rows == 0 {
            return None;
        }
        let tile = atlas_tile(item_id, self.columns, 1.0)?;
        if tile.min.y >= self.rows as f32 {
            return None;
        }
        let scale = vec2(1.0 / self.columns as f32, 1.0 / self.rows as f32);
        Some(Rect::from_min_max(
            (tile.min.to_vec2() * scale).to_pos2(),
            (tile.max.to_vec2() * scale).to_pos2(),
        ))
    }
}

/// Draws an inventory and feeds pointer presses back into it.
#[derive(Debug, Clone, Default)]
pub struct InventoryView {
    layout: GridLayout,
    atlas: Option<SpriteAtlas>,
}

impl InventoryView {
    /// Create a view with the given grid placement.
    pub fn new(layout: GridLayout) -> Result<Self, LayoutError> {
        layout.validate()?;
        Ok(Self {
            layout,
            atlas: None,
        })
    }

    /// Draw item sprites from `atlas` instead of flat swatches.
    pub fn with_atlas(mut self, atlas: SpriteAtlas) -> Self {
        self.atlas = Some(atlas);
        self
    }

    /// Grid placement used for painting and hit-testing.
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Handle this frame's input, then paint on the background layer.
    pub fn show(&self, ctx: &Context, inventory: &mut Inventory) -> Vec<InteractOutcome> {
        let outcomes = self.handle_input(ctx, inventory);
        let cursor = ctx.input(|input| input.pointer.hover_pos());
        let painter = ctx.layer_painter(LayerId::background());
        self.paint(&painter, inventory, cursor);
        outcomes
    }

    /// Apply every primary/secondary press of this frame, in event order.
    ///
    /// Only presses count; releases and drags are ignored. Presses that miss
    /// every cell are dropped.
    pub fn handle_input(&self, ctx: &Context, inventory: &mut Inventory) -> Vec<InteractOutcome> {
        let presses: Vec<(Interaction, Pos2)> = ctx.input(|input| {
            input
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::PointerButton {
                        pos,
                        button,
                        pressed: true,
                        ..
                    } => interaction_for(*button).map(|interaction| (interaction, *pos)),
                    _ => None,
                })
                .collect()
        });

        let mut outcomes = Vec::with_capacity(presses.len());
        for (interaction, pos) in presses {
            let Some(index) = self.layout.cell_at(pos, inventory.cell_count()) else {
                trace!(%interaction, x = pos.x, y = pos.y, "press outside inventory grid");
                continue;
            };
            let result = inventory.interact(interaction, index);
            outcomes.push(InteractOutcome {
                interaction,
                index,
                result,
            });
        }
        outcomes
    }

    /// Paint every cell, then the held stack at the cursor.
    pub fn paint(&self, painter: &Painter, inventory: &Inventory, cursor: Option<Pos2>) {
        let panel = self
            .layout
            .bounds(inventory.cell_count())
            .expand(self.layout.gap);
        painter.rect_filled(panel, 4.0, PANEL_BACKGROUND);

        for (index, cell) in inventory.cells().iter().enumerate() {
            let rect = self.layout.hitbox(index);
            painter.rect_filled(rect, 0.0, CELL_BACKGROUND);
            painter.rect_stroke(rect, 0.0, Stroke::new(1.0, CELL_BORDER));
            if !cell.is_empty() {
                self.paint_stack(painter, rect, cell);
            }
        }

        let hand = inventory.hand();
        if let Some(cursor) = cursor.filter(|_| !hand.is_empty()) {
            self.paint_stack(painter, self.layout.hand_rect(cursor), hand);
        }
    }

    fn paint_stack(&self, painter: &Painter, rect: Rect, cell: &Cell) {
        let sprite = rect.shrink(SWATCH_INSET);
        let tile = self
            .atlas
            .and_then(|atlas| atlas.uv(cell.item_id).map(|uv| (atlas.texture, uv)));
        match tile {
            Some((texture, uv)) => {
                painter.image(texture, sprite, uv, Color32::WHITE);
            }
            None => {
                painter.rect_filled(sprite, 2.0, item_color(cell.item_id));
            }
        }
        painter.text(
            rect.left_top(),
            Align2::LEFT_TOP,
            cell.amount.to_string(),
            FontId::monospace(LABEL_FONT_SIZE),
            LABEL_COLOR,
        );
    }
}

fn interaction_for(button: PointerButton) -> Option<Interaction> {
    match button {
        PointerButton::Primary => Some(Interaction::Primary),
        PointerButton::Secondary => Some(Interaction::Secondary),
        _ => None,
    }
}

/// Stable swatch color for an item id.
pub fn item_color(item_id: ItemId) -> Color32 {
    // Knuth multiplicative hash.
    let hash = item_id.wrapping_mul(2_654_435_761);
    let [r, g, b, _] = hash.to_be_bytes();
    Color32::from_rgb(r | 0x40, g | 0x40, b | 0x40)
}
