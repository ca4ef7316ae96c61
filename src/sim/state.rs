//! Game state and core simulation types
//!
//! Everything one session mutates lives in [`GameState`]; the renderer only
//! ever sees a [`Snapshot`](super::snapshot::Snapshot) built from it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::tuning::Tuning;

/// Current phase of the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Freshly reset, nothing running (splash screen)
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// Lives ran out
    GameOver,
}

/// Something that happened during a tick (consumed by audio and logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A new obstacle entered above the canvas
    Spawned { id: u32 },
    /// An obstacle left the bottom of the canvas
    Dodged { id: u32, score: u64 },
    /// Score crossed a level boundary
    LevelUp { level: u32 },
    /// An obstacle hit the player
    Hit { id: u32, lives: u8 },
    /// Lives reached zero
    GameOver { score: u64, new_high_score: bool },
}

/// The player's block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Horizontal speed in units per tick
    pub speed: f32,
}

impl Player {
    /// Place a player centered horizontally near the bottom of the canvas
    pub fn new(tuning: &Tuning) -> Self {
        let x = (tuning.canvas_width - tuning.player_width) / 2.0;
        let y = tuning.canvas_height - tuning.player_height - tuning.player_bottom_margin;
        Self {
            rect: Rect::new(x, y, tuning.player_width, tuning.player_height),
            speed: tuning.player_speed,
        }
    }

    /// Move by `dir` steps (-1 left, +1 right) and clamp to the canvas
    pub fn steer(&mut self, dir: f32, canvas_width: f32) {
        self.rect.pos.x += dir * self.speed;
        self.clamp_to(canvas_width);
    }

    /// Keep the player fully inside `[0, canvas_width]`
    pub fn clamp_to(&mut self, canvas_width: f32) {
        let max_x = (canvas_width - self.rect.size.x).max(0.0);
        self.rect.pos.x = self.rect.pos.x.clamp(0.0, max_x);
    }
}

/// A falling block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub rect: Rect,
    /// Fall speed in units per tick
    pub speed: f32,
    /// Top edge has dropped below the player (render hint only)
    pub passed: bool,
}

impl Obstacle {
    pub fn new(id: u32, x: f32, y: f32, w: f32, h: f32, speed: f32) -> Self {
        Self {
            id,
            rect: Rect::new(x, y, w, h),
            speed,
            passed: false,
        }
    }

    /// Advance one tick
    pub fn fall(&mut self) {
        self.rect.pos.y += self.speed;
    }
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn randomness, reseeded from `seed` on reset
    #[serde(skip, default = "default_rng")]
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    /// Starts at 1, no upper bound
    pub level: u32,
    pub lives: u8,
    /// Best score loaded from persistence at reset
    pub high_score: u64,
    /// Timestamp (ms) of the last spawn
    pub last_spawn: f64,
    /// Timestamp (ms) of the last cosmetic wobble
    pub last_jitter: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Next entity ID
    next_id: u32,
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

impl GameState {
    /// Create an idle session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(&tuning),
            phase: GamePhase::Idle,
            score: 0,
            level: 1,
            lives: tuning.starting_lives,
            high_score: 0,
            last_spawn: 0.0,
            last_jitter: 0.0,
            time_ticks: 0,
            obstacles: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Throw away the current session and start a new idle one.
    ///
    /// Tuning is kept; `high_score` is whatever the caller loaded.
    pub fn reset(&mut self, seed: u64, high_score: u64) {
        let tuning = std::mem::take(&mut self.tuning);
        *self = Self::with_tuning(seed, tuning);
        self.high_score = high_score;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Canvas bounds as a rectangle
    pub fn canvas(&self) -> Rect {
        Rect::new(0.0, 0.0, self.tuning.canvas_width, self.tuning.canvas_height)
    }

    /// Center of the player (handy for HUD/demo code)
    pub fn player_center(&self) -> Vec2 {
        self.player.rect.center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_player_starts_centered_at_bottom() {
        let state = GameState::new(1);
        let p = &state.player.rect;
        assert_eq!(p.left(), (400.0 - 50.0) / 2.0);
        assert_eq!(p.bottom(), 600.0 - 10.0);
    }

    #[test]
    fn test_steer_clamps_both_sides() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);

        player.rect.pos.x = 2.0;
        player.steer(-1.0, tuning.canvas_width);
        assert_eq!(player.rect.pos.x, 0.0);

        player.rect.pos.x = tuning.canvas_width - tuning.player_width - 1.0;
        player.steer(1.0, tuning.canvas_width);
        assert_eq!(player.rect.pos.x, tuning.canvas_width - tuning.player_width);
    }

    #[test]
    fn test_reset_keeps_tuning_and_high_score() {
        let tuning = Tuning {
            starting_lives: 5,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(1, tuning);
        state.score = 120;
        state.phase = GamePhase::GameOver;
        state.next_entity_id();

        state.reset(2, 300);
        assert_eq!(state.seed, 2);
        assert_eq!(state.lives, 5);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 300);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.next_entity_id(), 1);
    }
}
