//! Neon Snake - A grid snake arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, scoring, particles)
//! - `engine`: Frame-driven engine that gates ticks and notifies collaborators
//! - `renderer`: Draw-list extraction (and Canvas2D painting on the web)
//! - `input`: Key/gesture mapping to engine commands
//! - `audio`: Sound cues and haptics
//! - `best_score` / `settings`: Persisted player data

pub mod audio;
pub mod best_score;
pub mod engine;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use best_score::{MemoryStore, ScoreStore, StorageError};
pub use engine::{Engine, GameListener};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Cell edge length in pixels
    pub const CELL_SIZE: i32 = 20;
    /// Grid dimensions (cells)
    pub const COLS: i32 = 20;
    pub const ROWS: i32 = 20;
    /// Canvas dimensions derived from the grid
    pub const CANVAS_WIDTH: i32 = CELL_SIZE * COLS;
    pub const CANVAS_HEIGHT: i32 = CELL_SIZE * ROWS;

    /// Starting tick interval (ms)
    pub const BASE_SPEED_MS: u32 = 150;
    /// Fastest allowed tick interval (ms)
    pub const MIN_SPEED_MS: u32 = 70;
    /// Interval reduction per food eaten (ms)
    pub const SPEED_STEP_MS: u32 = 3;
    /// Extra step multiplier applied by speed food
    pub const SPEED_FOOD_FACTOR: u32 = 3;

    /// Two foods eaten closer than this keep the combo going (ms)
    pub const COMBO_WINDOW_MS: f64 = 3000.0;
    /// Score multiplier cap
    pub const MAX_MULTIPLIER: u32 = 5;

    /// Snake length at spawn
    pub const START_LENGTH: usize = 3;

    /// Particle physics (per frame)
    pub const PARTICLE_GRAVITY: f32 = 0.1;
    pub const PARTICLE_DECAY: f32 = 0.03;
    /// Live particle cap
    pub const MAX_PARTICLES: usize = 512;

    /// Feedback pulses
    pub const EAT_SHAKE: f32 = 0.3;
    pub const DEATH_SHAKE: f32 = 1.0;
    pub const SHAKE_DECAY: f32 = 0.9;
    pub const EAT_SCALE_DECAY: f32 = 0.1;

    /// Minimum pointer travel (px) for a touch to count as a swipe
    pub const SWIPE_THRESHOLD: f32 = 15.0;
}

/// Pixel-space centre of a grid cell
#[inline]
pub fn cell_center(x: i32, y: i32) -> Vec2 {
    let half = consts::CELL_SIZE as f32 / 2.0;
    Vec2::new(
        (x * consts::CELL_SIZE) as f32 + half,
        (y * consts::CELL_SIZE) as f32 + half,
    )
}
