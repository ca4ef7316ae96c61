//! Read-only view of a session for the renderer and HUD

use super::rect::Rect;
use super::state::{GamePhase, GameState};
use crate::consts::OBSTACLE_MIN_SPEED;

/// Speed span mapped onto the full color ramp
const INTENSITY_SPEED_RANGE: f32 = 6.0;

/// How an obstacle should be drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleView {
    pub rect: Rect,
    /// 0 = slowest, 1 = fastest
    pub intensity: f32,
    pub passed: bool,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub canvas: Rect,
    pub player: Rect,
    pub obstacles: Vec<ObstacleView>,
    pub score: u64,
    pub level: u32,
    pub lives: u8,
    pub high_score: u64,
    pub phase: GamePhase,
}

/// Map fall speed to a 0..1 color intensity
pub fn speed_intensity(speed: f32) -> f32 {
    ((speed - OBSTACLE_MIN_SPEED) / INTENSITY_SPEED_RANGE).clamp(0.0, 1.0)
}

impl Snapshot {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            canvas: state.canvas(),
            player: state.player.rect,
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    rect: o.rect,
                    intensity: speed_intensity(o.speed),
                    passed: o.passed,
                })
                .collect(),
            score: state.score,
            level: state.level,
            lives: state.lives,
            high_score: state.high_score,
            phase: state.phase,
        }
    }

    /// Best score to display, counting a run in progress that beats it
    pub fn display_high_score(&self) -> u64 {
        self.high_score.max(self.score)
    }
}
