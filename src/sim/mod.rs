//! Game engine module
//!
//! All gameplay logic lives here. This module must stay platform-free:
//! - Seeded RNG only
//! - Tile stream kept in spawn order (stable hit-test traversal)
//! - No rendering or DOM dependencies

pub mod board;
pub mod spawner;
pub mod tick;
pub mod tile;

pub use board::Board;
pub use spawner::Spawner;
pub use tick::{GamePhase, GameState, TickInput, tick};
pub use tile::Tile;
