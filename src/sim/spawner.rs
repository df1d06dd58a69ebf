//! Tile placement policy
//!
//! New tiles enter just above the highest live tile and must not share a
//! column with the most recently spawned tile. Placement is best-effort:
//! sampling is bounded by the attempt budget and an exhausted budget skips
//! the spawn for that tick instead of stalling the loop.

use glam::Vec2;
use rand::Rng;

use super::board::Board;
use super::tile::Tile;

/// Column/position generator with the non-adjacency constraint
#[derive(Debug, Clone)]
pub struct Spawner {
    /// Column of the most recently spawned tile
    last_column: Option<u32>,
    /// Resampling budget per spawn
    attempts: u32,
}

impl Spawner {
    pub fn new(attempts: u32) -> Self {
        Self {
            last_column: None,
            attempts: attempts.max(1),
        }
    }

    /// Sample a column different from the previous spawn's column.
    ///
    /// Returns `None` when the budget runs out (e.g. a degenerate RNG keeps
    /// returning the excluded column). Never loops unbounded.
    pub fn pick_column(&mut self, columns: u32, rng: &mut impl Rng) -> Option<u32> {
        for _ in 0..self.attempts {
            let column = rng.random_range(0..columns);
            if Some(column) != self.last_column {
                self.last_column = Some(column);
                return Some(column);
            }
        }
        log::debug!("spawn skipped: no column found in {} attempts", self.attempts);
        None
    }

    /// Spawn one tile above the current stream.
    ///
    /// The vertical slot sits one tile-plus-gap above the highest live tile
    /// (never lower than one tile height above the top edge), and any
    /// candidate whose bounding box would overlap a live tile is resampled.
    pub fn spawn(&mut self, board: &Board, tiles: &[Tile], rng: &mut impl Rng) -> Option<Tile> {
        let w = board.tile_width();
        let h = board.tile_height();
        let y = spawn_y(board, tiles);

        for _ in 0..self.attempts {
            let column = rng.random_range(0..board.columns);
            if Some(column) == self.last_column {
                continue;
            }
            let candidate = Tile::new(Vec2::new(board.column_x(column), y), w, h);
            if tiles.iter().any(|t| candidate.overlaps(t)) {
                continue;
            }
            self.last_column = Some(column);
            return Some(candidate);
        }
        log::debug!("spawn skipped: no valid slot in {} attempts", self.attempts);
        None
    }

    /// Build the opening stream: `count` tiles stacked one row apart above
    /// the board, consecutive columns constrained pairwise. Columns that
    /// cannot be placed within the budget are skipped; the tick loop tops
    /// the stream up later.
    pub fn seed_initial(
        &mut self,
        board: &Board,
        count: usize,
        rng: &mut impl Rng,
    ) -> Vec<Tile> {
        let w = board.tile_width();
        let h = board.tile_height();
        let mut tiles = Vec::with_capacity(count);
        for i in 0..count {
            let Some(column) = self.pick_column(board.columns, rng) else {
                continue;
            };
            let y = -(i as f32 * (h + board.vertical_gap)) - h;
            tiles.push(Tile::new(Vec2::new(board.column_x(column), y), w, h));
        }
        tiles
    }
}

/// Vertical slot for the next spawn: just above the highest live tile
fn spawn_y(board: &Board, tiles: &[Tile]) -> f32 {
    let h = board.tile_height();
    let highest = tiles
        .iter()
        .map(|t| t.pos.y)
        .fold(f32::INFINITY, f32::min);
    if highest.is_finite() {
        (highest - h - board.vertical_gap).min(-h)
    } else {
        -h
    }
}
