//! Block Dodge - A dodge-the-falling-blocks arcade game
//!
//! Core modules:
//! - `sim`: Simulation (entities, spawning, collisions, state machine)
//! - `renderer`: WebGPU rendering pipeline
//! - `highscores`: Persisted best score
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::{HighScoreStore, MemoryStore};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical drawing surface size
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 20.0;
    /// Horizontal speed in units per tick
    pub const PLAYER_SPEED: f32 = 6.0;
    /// Gap between the player's bottom edge and the canvas bottom
    pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;

    pub const STARTING_LIVES: u8 = 3;

    /// Points awarded for each obstacle that leaves the bottom of the canvas
    pub const POINTS_PER_DODGE: u64 = 10;
    /// Level goes up every time the score hits a multiple of this
    pub const POINTS_PER_LEVEL: u64 = 100;

    /// Spawn gap (ms) = max(BASE - level * STEP, MIN)
    pub const SPAWN_GAP_BASE_MS: f64 = 600.0;
    pub const SPAWN_GAP_STEP_MS: f64 = 60.0;
    pub const SPAWN_GAP_MIN_MS: f64 = 160.0;

    /// Obstacle width range before the level bonus
    pub const OBSTACLE_MIN_WIDTH: f32 = 30.0;
    pub const OBSTACLE_MAX_WIDTH: f32 = 90.0;
    /// Extra width per level, capped
    pub const OBSTACLE_WIDTH_PER_LEVEL: f32 = 5.0;
    pub const OBSTACLE_WIDTH_BONUS_CAP: f32 = 60.0;
    pub const OBSTACLE_MIN_HEIGHT: f32 = 20.0;
    pub const OBSTACLE_MAX_HEIGHT: f32 = 60.0;
    /// Fall speed range (units per tick) before the level bonus
    pub const OBSTACLE_MIN_SPEED: f32 = 1.5;
    pub const OBSTACLE_MAX_SPEED: f32 = 3.0;
    pub const OBSTACLE_SPEED_PER_LEVEL: f32 = 0.4;

    /// Cosmetic horizontal wobble applied to falling obstacles
    pub const JITTER_INTERVAL_MS: f64 = 120.0;
    pub const JITTER_AMPLITUDE: f32 = 0.6;
}
