//! Engine tuning
//!
//! The speed and fade constants drifted across revisions of the original
//! game, so they are data here rather than hard-coded. Read once from
//! LocalStorage at startup; a deployment can retune the engine by writing
//! the key, no rebuild needed.

use serde::{Deserialize, Serialize};

use crate::consts;

/// Tunable engine parameters for one session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of board columns
    pub columns: u32,
    /// Live tiles the stream is topped up to
    pub target_tiles: usize,
    /// Starting fall speed, pixels per 60 Hz frame
    pub base_speed: f32,
    /// Speed gained per 60 Hz frame
    pub speed_increment: f32,
    /// Opacity lost per tick once a tile is hit
    pub opacity_step: f32,
    /// Vertical gap between stacked tiles (pixels)
    pub vertical_gap: f32,
    /// Resampling budget before a spawn is skipped
    pub spawn_attempts: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            columns: consts::COLUMNS,
            target_tiles: consts::TARGET_TILES,
            base_speed: consts::BASE_SPEED,
            speed_increment: consts::SPEED_INCREMENT,
            opacity_step: consts::OPACITY_STEP,
            vertical_gap: consts::VERTICAL_GAP,
            spawn_attempts: consts::SPAWN_ATTEMPTS,
        }
    }
}

impl EngineConfig {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "tile_tap_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(config) = serde_json::from_str(&json) {
                    log::info!("Loaded engine config from LocalStorage");
                    return config;
                }
            }
        }

        log::info!("Using default engine config");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
