//! Falling tile entity
//!
//! A tile is spawned above the visible board and falls until it is either
//! tapped (then fades out) or crosses the bottom edge untapped (then the
//! round is lost). `hit` flips true at most once and opacity only ever
//! decreases.

use glam::Vec2;

/// One falling target cell
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    /// Top-left corner; y is negative while the tile is above the board
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Set once by [`Tile::mark_hit`], never cleared
    pub hit: bool,
    /// 1.0 at spawn, steps toward 0 once hit
    pub opacity: f32,
}

impl Tile {
    pub fn new(pos: Vec2, width: f32, height: f32) -> Self {
        Self {
            pos,
            width,
            height,
            hit: false,
            opacity: 1.0,
        }
    }

    /// Move the tile down by `dy` pixels
    #[inline]
    pub fn advance(&mut self, dy: f32) {
        self.pos.y += dy;
    }

    /// Mark the tile as tapped. Idempotent; the fade starts on the next tick.
    pub fn mark_hit(&mut self) {
        self.hit = true;
    }

    /// Step the fade-out. Only hit tiles fade, and opacity floors at 0.
    pub fn update_opacity(&mut self, step: f32) {
        if self.hit && self.opacity > 0.0 {
            self.opacity = (self.opacity - step).max(0.0);
        }
    }

    /// Bounding-box hit test against a board-space point
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.pos.x
            && point.x <= self.pos.x + self.width
            && point.y >= self.pos.y
            && point.y <= self.pos.y + self.height
    }

    /// Bounding-box overlap against another tile
    pub fn overlaps(&self, other: &Tile) -> bool {
        self.pos.x < other.pos.x + other.width
            && self.pos.x + self.width > other.pos.x
            && self.pos.y < other.pos.y + other.height
            && self.pos.y + self.height > other.pos.y
    }

    /// Loss condition: bottom edge reached the board bottom while unhit
    #[inline]
    pub fn is_missed(&self, board_height: f32) -> bool {
        !self.hit && self.pos.y + self.height >= board_height
    }

    /// Pruning condition: faded out, or fully below the board
    #[inline]
    pub fn is_expired(&self, board_height: f32) -> bool {
        self.opacity <= 0.0 || self.pos.y >= board_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile_at(x: f32, y: f32) -> Tile {
        Tile::new(Vec2::new(x, y), 100.0, 145.0)
    }

    #[test]
    fn test_hit_is_one_way() {
        let mut tile = tile_at(0.0, 0.0);
        assert!(!tile.hit);
        tile.mark_hit();
        assert!(tile.hit);
        tile.mark_hit();
        assert!(tile.hit);
    }

    #[test]
    fn test_opacity_only_fades_after_hit() {
        let mut tile = tile_at(0.0, 0.0);
        tile.update_opacity(0.05);
        assert_eq!(tile.opacity, 1.0);

        tile.mark_hit();
        let mut last = tile.opacity;
        for _ in 0..30 {
            tile.update_opacity(0.05);
            assert!(tile.opacity <= last);
            last = tile.opacity;
        }
        assert_eq!(tile.opacity, 0.0);
    }

    #[test]
    fn test_opacity_reaches_zero_in_bounded_ticks() {
        let mut tile = tile_at(0.0, 0.0);
        tile.mark_hit();
        let mut ticks = 0;
        while tile.opacity > 0.0 {
            tile.update_opacity(0.05);
            ticks += 1;
            assert!(ticks <= 20, "fade must finish within 1/step ticks");
        }
        assert_eq!(ticks, 20);
    }

    #[test]
    fn test_contains_bounds() {
        let tile = tile_at(100.0, 200.0);
        assert!(tile.contains(Vec2::new(150.0, 250.0)));
        assert!(tile.contains(Vec2::new(100.0, 200.0)));
        assert!(tile.contains(Vec2::new(200.0, 345.0)));
        assert!(!tile.contains(Vec2::new(99.0, 250.0)));
        assert!(!tile.contains(Vec2::new(150.0, 346.0)));
    }

    #[test]
    fn test_missed_only_when_unhit() {
        let mut tile = tile_at(0.0, 500.0);
        assert!(tile.is_missed(600.0));
        tile.mark_hit();
        assert!(!tile.is_missed(600.0));
    }

    #[test]
    fn test_overlap() {
        let a = tile_at(0.0, 0.0);
        let b = tile_at(0.0, 100.0); // vertical overlap, same column
        let c = tile_at(0.0, 150.0); // clear of a (height 145)
        let d = tile_at(100.0, 0.0); // adjacent column, edges touch only
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(!a.overlaps(&d));
    }
}
