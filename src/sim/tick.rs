//! Per-frame simulation tick
//!
//! One call advances the session by exactly one rendering frame. Speeds are in
//! units per tick, timestamps are monotonic milliseconds.

use super::spawner::maybe_spawn;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left direction held
    pub left: bool,
    /// Right direction held
    pub right: bool,
    /// Pause/resume toggle (also starts an idle session)
    pub pause: bool,
}

impl TickInput {
    /// Net horizontal direction: -1, 0 or +1
    pub fn direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Apply the pause/start key to the state machine.
///
/// Idle starts running, running and paused swap, game over ignores it.
pub fn toggle_pause(state: &mut GameState) {
    state.phase = match state.phase {
        GamePhase::Idle => {
            log::info!("Session started (seed {})", state.seed);
            GamePhase::Running
        }
        GamePhase::Running => {
            log::info!("Paused at score {}", state.score);
            GamePhase::Paused
        }
        GamePhase::Paused => {
            log::info!("Resumed");
            GamePhase::Running
        }
        GamePhase::GameOver => GamePhase::GameOver,
    };
}

/// Advance the game state by one frame at timestamp `now` (ms).
///
/// Does nothing unless the session is running. When lives run out the phase
/// becomes [`GamePhase::GameOver`], `high_score` is raised if beaten and the
/// rest of the frame is skipped.
pub fn tick(state: &mut GameState, input: &TickInput, now: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.pause {
        toggle_pause(state);
    }

    if state.phase != GamePhase::Running {
        return events;
    }

    state.time_ticks += 1;
    let canvas_width = state.tuning.canvas_width;
    let canvas_height = state.tuning.canvas_height;

    // Player movement
    state.player.steer(input.direction(), canvas_width);

    // Spawning
    if let Some(id) = maybe_spawn(state, now) {
        events.push(GameEvent::Spawned { id });
    }

    // Falling, scoring and level progression
    let player_bottom = state.player.rect.bottom();
    let mut dodged = Vec::new();
    state.obstacles.retain_mut(|o| {
        o.fall();
        if o.rect.top() > player_bottom {
            o.passed = true;
        }
        if o.rect.top() > canvas_height {
            dodged.push(o.id);
            false
        } else {
            true
        }
    });
    for id in dodged {
        state.score += state.tuning.points_per_dodge;
        events.push(GameEvent::Dodged {
            id,
            score: state.score,
        });
        if state.score % state.tuning.points_per_level == 0 {
            state.level += 1;
            log::info!("Level up: {} (score {})", state.level, state.score);
            events.push(GameEvent::LevelUp { level: state.level });
        }
    }

    // Cosmetic wobble, serialized with the rest of the obstacle updates
    apply_jitter(state, now);

    // Collisions
    let player = state.player.rect;
    let mut i = 0;
    while i < state.obstacles.len() {
        if !state.obstacles[i].rect.overlaps(&player) {
            i += 1;
            continue;
        }

        let hit = state.obstacles.remove(i);
        state.lives = state.lives.saturating_sub(1);
        log::debug!("Hit by obstacle {}, {} lives left", hit.id, state.lives);
        events.push(GameEvent::Hit {
            id: hit.id,
            lives: state.lives,
        });

        if state.lives == 0 {
            let new_high_score = state.score > state.high_score;
            if new_high_score {
                state.high_score = state.score;
            }
            state.phase = GamePhase::GameOver;
            log::info!(
                "Game over: score {}, level {}{}",
                state.score,
                state.level,
                if new_high_score { " (new high score)" } else { "" }
            );
            events.push(GameEvent::GameOver {
                score: state.score,
                new_high_score,
            });
            return events;
        }
    }

    events
}

/// Nudge every obstacle sideways once per jitter interval
fn apply_jitter(state: &mut GameState, now: f64) {
    let amplitude = state.tuning.jitter_amplitude;
    if amplitude == 0.0 || now - state.last_jitter < state.tuning.jitter_interval_ms {
        return;
    }
    state.last_jitter = now;

    let canvas_width = state.tuning.canvas_width;
    let phase = (now / 150.0) as f32;
    for o in &mut state.obstacles {
        let nudge = (phase + o.id as f32).sin() * amplitude;
        let max_x = (canvas_width - o.rect.size.x).max(0.0);
        o.rect.pos.x = (o.rect.pos.x + nudge).clamp(0.0, max_x);
    }
}
