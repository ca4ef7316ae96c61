//! Data-driven game balance
//!
//! Every number the simulation depends on lives here so tests and demo modes
//! can run against an alternative balance without touching the sim code.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance knobs for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub canvas_width: f32,
    pub canvas_height: f32,

    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub player_bottom_margin: f32,
    pub starting_lives: u8,

    pub points_per_dodge: u64,
    pub points_per_level: u64,

    pub spawn_gap_base_ms: f64,
    pub spawn_gap_step_ms: f64,
    pub spawn_gap_min_ms: f64,

    pub obstacle_width: (f32, f32),
    pub obstacle_width_per_level: f32,
    pub obstacle_width_bonus_cap: f32,
    pub obstacle_height: (f32, f32),
    pub obstacle_speed: (f32, f32),
    pub obstacle_speed_per_level: f32,

    pub jitter_interval_ms: f64,
    /// 0 disables the wobble
    pub jitter_amplitude: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            player_bottom_margin: PLAYER_BOTTOM_MARGIN,
            starting_lives: STARTING_LIVES,
            points_per_dodge: POINTS_PER_DODGE,
            points_per_level: POINTS_PER_LEVEL,
            spawn_gap_base_ms: SPAWN_GAP_BASE_MS,
            spawn_gap_step_ms: SPAWN_GAP_STEP_MS,
            spawn_gap_min_ms: SPAWN_GAP_MIN_MS,
            obstacle_width: (OBSTACLE_MIN_WIDTH, OBSTACLE_MAX_WIDTH),
            obstacle_width_per_level: OBSTACLE_WIDTH_PER_LEVEL,
            obstacle_width_bonus_cap: OBSTACLE_WIDTH_BONUS_CAP,
            obstacle_height: (OBSTACLE_MIN_HEIGHT, OBSTACLE_MAX_HEIGHT),
            obstacle_speed: (OBSTACLE_MIN_SPEED, OBSTACLE_MAX_SPEED),
            obstacle_speed_per_level: OBSTACLE_SPEED_PER_LEVEL,
            jitter_interval_ms: JITTER_INTERVAL_MS,
            jitter_amplitude: JITTER_AMPLITUDE,
        }
    }
}

impl Tuning {
    /// Minimum time between two spawns at the given level
    pub fn spawn_gap_ms(&self, level: u32) -> f64 {
        (self.spawn_gap_base_ms - level as f64 * self.spawn_gap_step_ms).max(self.spawn_gap_min_ms)
    }

    /// Extra obstacle width granted at the given level
    pub fn width_bonus(&self, level: u32) -> f32 {
        (level as f32 * self.obstacle_width_per_level).min(self.obstacle_width_bonus_cap)
    }

    /// Extra fall speed granted at the given level
    pub fn speed_bonus(&self, level: u32) -> f32 {
        level as f32 * self.obstacle_speed_per_level
    }

    /// Turn off the cosmetic wobble (reduced motion)
    pub fn without_jitter(mut self) -> Self {
        self.jitter_amplitude = 0.0;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_gap_shrinks_then_floors() {
        let tuning = Tuning::default();
        assert_eq!(tuning.spawn_gap_ms(1), 540.0);
        assert_eq!(tuning.spawn_gap_ms(5), 300.0);
        assert_eq!(tuning.spawn_gap_ms(8), 160.0);
        assert_eq!(tuning.spawn_gap_ms(40), 160.0);
    }

    #[test]
    fn test_width_bonus_capped() {
        let tuning = Tuning::default();
        assert_eq!(tuning.width_bonus(1), 5.0);
        assert_eq!(tuning.width_bonus(12), 60.0);
        assert_eq!(tuning.width_bonus(100), 60.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{"starting_lives": 5}"#).unwrap();
        assert_eq!(tuning.starting_lives, 5);
        assert_eq!(tuning.canvas_width, CANVAS_WIDTH);
    }
}
