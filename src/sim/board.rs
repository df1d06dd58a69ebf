//! Board geometry
//!
//! The playing surface is a fixed grid of columns spanning the canvas.
//! Tiles are one column wide and a quarter of the canvas tall (minus the
//! vertical gap). Pure geometry, no failure modes.

use serde::{Deserialize, Serialize};

/// Fixed board geometry for one session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Board {
    /// Canvas width in pixels
    pub width: f32,
    /// Canvas height in pixels
    pub height: f32,
    /// Number of columns
    pub columns: u32,
    /// Vertical gap between stacked tiles
    pub vertical_gap: f32,
}

impl Board {
    pub fn new(width: f32, height: f32, columns: u32, vertical_gap: f32) -> Self {
        Self {
            width,
            height,
            columns: columns.max(1),
            vertical_gap,
        }
    }

    /// Width of a single tile (columns butt against each other, no separator)
    #[inline]
    pub fn tile_width(&self) -> f32 {
        self.width / self.columns as f32
    }

    /// Height of a single tile (four rows fill the board, gap subtracted)
    #[inline]
    pub fn tile_height(&self) -> f32 {
        self.height / 4.0 - self.vertical_gap
    }

    /// Left pixel edge of a column
    #[inline]
    pub fn column_x(&self, column: u32) -> f32 {
        column.min(self.columns - 1) as f32 * self.tile_width()
    }

    /// Column index containing a pixel x coordinate (clamped to the board)
    pub fn column_at(&self, x: f32) -> u32 {
        if x <= 0.0 {
            return 0;
        }
        ((x / self.tile_width()) as u32).min(self.columns - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_pixel_round_trip() {
        let board = Board::new(400.0, 600.0, 4, 5.0);
        assert_eq!(board.tile_width(), 100.0);
        for col in 0..4 {
            let x = board.column_x(col);
            assert_eq!(board.column_at(x), col);
            assert_eq!(board.column_at(x + 50.0), col);
        }
    }

    #[test]
    fn test_column_at_clamps() {
        let board = Board::new(400.0, 600.0, 4, 5.0);
        assert_eq!(board.column_at(-10.0), 0);
        assert_eq!(board.column_at(400.0), 3);
        assert_eq!(board.column_at(9999.0), 3);
    }

    #[test]
    fn test_tile_height_subtracts_gap() {
        let board = Board::new(400.0, 600.0, 4, 5.0);
        assert_eq!(board.tile_height(), 600.0 / 4.0 - 5.0);
    }
}
