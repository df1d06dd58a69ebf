//! Canvas-2D rendering
//!
//! Draws one frame of the tile stream: board clear, column separators,
//! gradient-filled tiles modulated by their fade opacity, and the score.
//! No game logic lives here.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::sim::GameState;

/// Tile gradient start color
const TILE_COLOR_TOP: &str = "#2F3C7E";
/// Tile gradient end color
const TILE_COLOR_BOTTOM: &str = "#FF6F61";
/// Separator and score color
const BORDER_COLOR: &str = "#FBEAEB";

/// Owns the 2D context for the game canvas
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;
        Ok(Self { canvas, ctx })
    }

    /// Draw the current frame
    pub fn render(&self, state: &GameState) -> Result<(), JsValue> {
        let width = f64::from(self.canvas.width());
        let height = f64::from(self.canvas.height());
        self.ctx.clear_rect(0.0, 0.0, width, height);

        self.draw_separators(state, height)?;

        for tile in &state.tiles {
            self.draw_tile(tile)?;
        }

        self.draw_score(state.score)?;
        Ok(())
    }

    fn draw_separators(&self, state: &GameState, height: f64) -> Result<(), JsValue> {
        self.ctx.set_stroke_style_str(BORDER_COLOR);
        self.ctx.set_line_width(1.0);
        for col in 1..state.board.columns {
            let x = f64::from(state.board.column_x(col));
            self.ctx.begin_path();
            self.ctx.move_to(x, 0.0);
            self.ctx.line_to(x, height);
            self.ctx.stroke();
        }
        Ok(())
    }

    fn draw_tile(&self, tile: &crate::sim::Tile) -> Result<(), JsValue> {
        let x = f64::from(tile.pos.x);
        let y = f64::from(tile.pos.y);
        let w = f64::from(tile.width);
        let h = f64::from(tile.height);

        let gradient = self.ctx.create_linear_gradient(x, y, x + w, y + h);
        gradient.add_color_stop(0.0, TILE_COLOR_TOP)?;
        gradient.add_color_stop(1.0, TILE_COLOR_BOTTOM)?;
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.set_global_alpha(f64::from(tile.opacity));
        self.ctx.fill_rect(x, y, w, h);
        self.ctx.set_global_alpha(1.0);
        Ok(())
    }

    fn draw_score(&self, score: u32) -> Result<(), JsValue> {
        self.ctx.set_fill_style_str(BORDER_COLOR);
        self.ctx.set_font("24px sans-serif");
        self.ctx.fill_text(&format!("Score: {score}"), 12.0, 32.0)?;
        Ok(())
    }
}
