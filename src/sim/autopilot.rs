//! Demo-mode controller
//!
//! Steers the player away from the obstacle that will land on it soonest and
//! otherwise drifts back toward the middle of the canvas. Not perfect on
//! purpose: it only looks at one threat at a time.

use super::state::GameState;
use super::tick::TickInput;

/// Extra clearance kept around threats
const MARGIN: f32 = 6.0;
/// How far above the player a block must be before it is ignored (ticks)
const LOOKAHEAD_TICKS: f32 = 90.0;

/// Choose held directions for this frame
pub fn steer(state: &GameState) -> TickInput {
    let player = state.player.rect;
    let canvas_width = state.tuning.canvas_width;

    // Soonest obstacle whose column overlaps ours
    let threat = state
        .obstacles
        .iter()
        .filter(|o| {
            o.rect.bottom() <= player.top() + player.size.y
                && o.rect.right() + MARGIN > player.left()
                && o.rect.left() - MARGIN < player.right()
        })
        .map(|o| {
            let eta = (player.top() - o.rect.bottom()).max(0.0) / o.speed.max(0.01);
            (o, eta)
        })
        .filter(|(_, eta)| *eta < LOOKAHEAD_TICKS)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let target_x = match threat {
        Some((o, _)) => {
            let go_left = o.rect.left() - MARGIN - player.size.x;
            let go_right = o.rect.right() + MARGIN;
            let left_ok = go_left >= 0.0;
            let right_ok = go_right + player.size.x <= canvas_width;
            match (left_ok, right_ok) {
                (true, true) => {
                    if (player.left() - go_left).abs() <= (go_right - player.left()).abs() {
                        go_left
                    } else {
                        go_right
                    }
                }
                (true, false) => go_left,
                (false, true) => go_right,
                // No room either way; hug whichever wall is closer
                (false, false) => {
                    if o.rect.center().x > canvas_width / 2.0 {
                        0.0
                    } else {
                        canvas_width - player.size.x
                    }
                }
            }
        }
        None => (canvas_width - player.size.x) / 2.0,
    };

    let dx = target_x - player.left();
    let dead_zone = state.player.speed / 2.0;
    TickInput {
        left: dx < -dead_zone,
        right: dx > dead_zone,
        pause: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GamePhase, Obstacle};
    use crate::sim::tick::tick;

    #[test]
    fn test_idles_at_center() {
        let state = GameState::new(1);
        let input = steer(&state);
        assert!(!input.left && !input.right);
    }

    #[test]
    fn test_dodges_block_overhead() {
        let mut state = GameState::new(1);
        let p = state.player.rect;
        let id = state.next_entity_id();
        // Block slightly right of center, directly above
        state
            .obstacles
            .push(Obstacle::new(id, p.left() + 10.0, p.top() - 100.0, 40.0, 20.0, 3.0));
        let input = steer(&state);
        assert!(input.left);
        assert!(!input.right);
    }

    #[test]
    fn test_ignores_block_already_below() {
        let mut state = GameState::new(1);
        state.player.rect.pos.x = 0.0;
        let p = state.player.rect;
        let id = state.next_entity_id();
        state
            .obstacles
            .push(Obstacle::new(id, 0.0, p.bottom() + 5.0, 40.0, 20.0, 3.0));
        // Nothing to dodge, so head back to the middle
        let input = steer(&state);
        assert!(input.right);
    }

    #[test]
    fn test_autopilot_outlasts_standing_still() {
        fn survive(seed: u64, autopilot: bool) -> u64 {
            let mut state = GameState::new(seed);
            state.phase = GamePhase::Running;
            let mut now = 0.0;
            while state.phase == GamePhase::Running && state.time_ticks < 20_000 {
                now += 1000.0 / 60.0;
                let input = if autopilot {
                    steer(&state)
                } else {
                    TickInput::default()
                };
                tick(&mut state, &input, now);
            }
            state.time_ticks
        }

        let seeds = [1u64, 2, 3, 4, 5];
        let with: u64 = seeds.iter().map(|&s| survive(s, true)).sum();
        let without: u64 = seeds.iter().map(|&s| survive(s, false)).sum();
        assert!(with > without, "autopilot {with} vs idle {without}");
    }
}
