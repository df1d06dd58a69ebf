//! Per-frame game tick
//!
//! Advances one session of the tile game. The host calls [`tick`] once per
//! animation frame with the elapsed wall-clock delta; movement is normalized
//! to 60 fps-equivalent frames (see [`crate::frames`]) so fall speed stays
//! display-rate independent.
//!
//! Tap events are queued by the host between frames and drained at the top
//! of the tick, so an input is always fully applied before the physics step
//! reads the stream. A tick that fires after the round ended is a no-op.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::board::Board;
use super::spawner::Spawner;
use super::tile::Tile;
use crate::config::EngineConfig;
use crate::frames;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting on the start screen; no simulation runs
    Idle,
    /// Active round
    Running,
    /// Round ended (terminal; replay needs a fresh `GameState`)
    GameOver,
}

/// Input commands queued since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Tap points in board coordinates, oldest first
    pub taps: Vec<Vec2>,
}

impl TickInput {
    /// Queue a tap (called from the pointer event handlers)
    pub fn push_tap(&mut self, point: Vec2) {
        self.taps.push(point);
    }
}

/// One play-through's state, owned by the UI layer and passed into [`tick`]
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: EngineConfig,
    pub board: Board,
    /// Live tiles in spawn order (oldest first)
    pub tiles: Vec<Tile>,
    pub score: u32,
    /// Fall speed, pixels per 60 Hz frame; non-decreasing while Running
    pub speed: f32,
    pub phase: GamePhase,
    pub time_ticks: u64,
    spawner: Spawner,
    rng: Pcg32,
}

impl GameState {
    /// Create a fresh session with the opening tile stack
    pub fn new(seed: u64, board: Board, config: EngineConfig) -> Self {
        let mut spawner = Spawner::new(config.spawn_attempts);
        let mut rng = Pcg32::seed_from_u64(seed);
        let tiles = spawner.seed_initial(&board, config.target_tiles, &mut rng);
        Self {
            speed: config.base_speed,
            config,
            board,
            tiles,
            score: 0,
            phase: GamePhase::Idle,
            time_ticks: 0,
            spawner,
            rng,
        }
    }

    /// Move from the start screen into the round
    pub fn start(&mut self) {
        if self.phase == GamePhase::Idle {
            self.phase = GamePhase::Running;
        }
    }

    /// Whether the loop should keep simulating
    pub fn running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Apply one tap: first unhit tile containing the point, oldest first.
    /// A tap landing on an already-hit tile that is still fading is a no-op
    /// (a quick double-tap must not read as a miss). Only a tap over empty
    /// board ends the round (strict mode). Returns false when the round
    /// ended.
    fn apply_tap(&mut self, point: Vec2) -> bool {
        let mut over_fading = false;
        for tile in &mut self.tiles {
            if !tile.contains(point) {
                continue;
            }
            if tile.hit {
                over_fading = true;
                continue;
            }
            tile.mark_hit();
            self.score += 1;
            return true;
        }
        if over_fading {
            return true;
        }
        self.phase = GamePhase::GameOver;
        false
    }
}

/// Advance the session by one animation frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Stale callbacks after game over (or before start) do nothing
    if state.phase != GamePhase::Running {
        return;
    }

    state.time_ticks += 1;
    let frames = frames(dt.max(0.0));

    // Drain queued taps before the physics step. A miss is terminal and
    // discards the rest of the queue.
    for &tap in &input.taps {
        if !state.apply_tap(tap) {
            return;
        }
    }

    // Advance and fade
    let dy = state.speed * frames;
    for tile in &mut state.tiles {
        tile.advance(dy);
        tile.update_opacity(state.config.opacity_step);
    }

    // Loss: an unhit tile crossed the bottom edge. Score stays as-is.
    if state
        .tiles
        .iter()
        .any(|t| t.is_missed(state.board.height))
    {
        state.phase = GamePhase::GameOver;
        return;
    }

    // Prune faded / departed tiles
    let board_height = state.board.height;
    state.tiles.retain(|t| !t.is_expired(board_height));

    // Top the stream back up. A skipped spawn leaves it short until a
    // later tick; never an error.
    while state.tiles.len() < state.config.target_tiles {
        match state.spawner.spawn(&state.board, &state.tiles, &mut state.rng) {
            Some(tile) => state.tiles.push(tile),
            None => break,
        }
    }

    // Difficulty ramp
    state.speed += state.config.speed_increment * frames;
}
