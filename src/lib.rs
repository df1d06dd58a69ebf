//! Tile Tap - a falling-tile reaction game for Telegram Mini Apps
//!
//! Core modules:
//! - `sim`: Platform-free game engine (board geometry, tile stream, spawner, tick loop)
//! - `renderer`: Canvas-2D rendering (wasm only)
//! - `backend`: HTTP interface to the points/tickets service
//! - `config`: Data-driven engine tuning
//! - `profile` / `leaderboard`: Player balance and top-player list

pub mod backend;
pub mod config;
pub mod leaderboard;
pub mod profile;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod sim;

pub use config::EngineConfig;
pub use leaderboard::Leaderboard;
pub use profile::Profile;

/// Engine defaults. Everything tunable at runtime lives in [`EngineConfig`];
/// these are the values the config falls back to.
pub mod consts {
    /// Number of board columns
    pub const COLUMNS: u32 = 4;
    /// Live tiles the stream is topped up to each tick
    pub const TARGET_TILES: usize = 4;
    /// Vertical gap between stacked tiles (pixels)
    pub const VERTICAL_GAP: f32 = 5.0;
    /// Starting fall speed, pixels per 60 Hz frame
    pub const BASE_SPEED: f32 = 4.0;
    /// Speed gained per 60 Hz frame while running
    pub const SPEED_INCREMENT: f32 = 0.0018;
    /// Opacity lost per tick once a tile is hit
    pub const OPACITY_STEP: f32 = 0.05;
    /// Resampling budget before a spawn is skipped
    pub const SPAWN_ATTEMPTS: u32 = 100;

    /// Reference frame rate the fall speed is expressed against
    pub const REFERENCE_FPS: f32 = 60.0;
}

/// Convert an elapsed wall-clock delta (seconds) to 60 fps-equivalent frames.
///
/// Tile speed and the speed ramp are expressed in pixels (or pixels of
/// increment) per reference frame, so a variable-rate display advances the
/// simulation by `speed * frames(dt)` each tick.
#[inline]
pub fn frames(dt: f32) -> f32 {
    dt * consts::REFERENCE_FPS
}
