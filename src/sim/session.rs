//! Session lifecycle around the tick
//!
//! Owns the game state and the high score store, and is the only place that
//! talks to persistence: one load per reset, at most one save per game over.

use super::snapshot::Snapshot;
use super::state::{GameEvent, GamePhase, GameState};
use super::tick::{TickInput, tick, toggle_pause};
use crate::highscores::HighScoreStore;
use crate::tuning::Tuning;

/// One player's run of games against a persisted best score
pub struct Session<S: HighScoreStore> {
    pub state: GameState,
    store: S,
}

impl<S: HighScoreStore> Session<S> {
    /// Create an idle session, loading the high score once
    pub fn new(store: S, tuning: Tuning, seed: u64) -> Self {
        let mut session = Self {
            state: GameState::with_tuning(seed, tuning),
            store,
        };
        session.reset(seed);
        session
    }

    /// Drop the current game and go back to idle
    pub fn reset(&mut self, seed: u64) {
        let high_score = self.store.load();
        self.state.reset(seed, high_score);
    }

    /// Explicit start: reset and begin running from any phase
    pub fn start(&mut self, seed: u64) {
        self.reset(seed);
        self.state.phase = GamePhase::Running;
        log::info!(
            "New game (seed {}, high score {})",
            seed,
            self.state.high_score
        );
    }

    /// Pause/resume key; starts an idle session, ignored after game over
    pub fn toggle_pause(&mut self) {
        toggle_pause(&mut self.state);
    }

    /// Run one frame and persist a beaten high score on game over
    pub fn frame(&mut self, input: &TickInput, now: f64) -> Vec<GameEvent> {
        let events = tick(&mut self.state, input, now);
        for event in &events {
            if let GameEvent::GameOver {
                score,
                new_high_score: true,
            } = *event
            {
                self.store.save(score);
            }
        }
        events
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// True while frames should keep being scheduled
    pub fn wants_frames(&self) -> bool {
        self.state.is_running()
    }

    /// Immutable view for the renderer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_state(&self.state)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Swap the balance used by future resets (e.g. reduced motion)
    pub fn set_tuning(&mut self, tuning: Tuning) {
        self.state.tuning = tuning;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;
    use crate::sim::state::Obstacle;

    fn session_with_high(high: u64) -> Session<MemoryStore> {
        Session::new(
            MemoryStore::with_value(high),
            Tuning::default().without_jitter(),
            1,
        )
    }

    /// Put `count` obstacles on top of the player
    fn stack_hits(session: &mut Session<MemoryStore>, count: usize) {
        let p = session.state.player.rect;
        for _ in 0..count {
            let id = session.state.next_entity_id();
            session
                .state
                .obstacles
                .push(Obstacle::new(id, p.left(), p.top(), 10.0, 10.0, 0.0));
        }
        session.state.last_spawn = f64::MAX / 2.0;
    }

    #[test]
    fn test_new_session_loads_high_score_and_idles() {
        let session = session_with_high(70);
        assert_eq!(session.phase(), GamePhase::Idle);
        assert_eq!(session.state.high_score, 70);
        assert!(!session.wants_frames());
    }

    #[test]
    fn test_start_from_any_phase() {
        let mut session = session_with_high(0);
        session.start(2);
        assert_eq!(session.phase(), GamePhase::Running);

        session.state.phase = GamePhase::GameOver;
        session.state.score = 80;
        session.start(3);
        assert_eq!(session.phase(), GamePhase::Running);
        assert_eq!(session.state.score, 0);
        assert_eq!(session.state.lives, 3);
    }

    #[test]
    fn test_toggle_pause_cannot_leave_game_over() {
        let mut session = session_with_high(0);
        session.start(2);
        session.state.phase = GamePhase::GameOver;
        session.toggle_pause();
        assert_eq!(session.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_new_high_score_saved_once() {
        let mut session = session_with_high(30);
        session.start(5);
        session.state.score = 50;
        session.state.lives = 1;
        stack_hits(&mut session, 2);

        session.frame(&TickInput::default(), 16.0);
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.store().value, Some(50));
        assert_eq!(session.store().saves, 1);

        // Further frames after game over never save again
        session.frame(&TickInput::default(), 32.0);
        session.frame(&TickInput::default(), 48.0);
        assert_eq!(session.store().saves, 1);
    }

    #[test]
    fn test_lower_score_not_saved() {
        let mut session = session_with_high(500);
        session.start(5);
        session.state.score = 50;
        session.state.lives = 1;
        stack_hits(&mut session, 1);

        session.frame(&TickInput::default(), 16.0);
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.store().saves, 0);
        assert_eq!(session.store().value, Some(500));
    }

    #[test]
    fn test_equal_score_not_saved() {
        let mut session = session_with_high(50);
        session.start(5);
        session.state.score = 50;
        session.state.lives = 1;
        stack_hits(&mut session, 1);

        session.frame(&TickInput::default(), 16.0);
        assert_eq!(session.store().saves, 0);
    }

    #[test]
    fn test_never_saved_while_running() {
        let mut session = session_with_high(0);
        session.start(8);
        let mut now = 0.0;
        while session.phase() == GamePhase::Running && now < 60_000.0 {
            now += 16.0;
            let before = session.store().saves;
            session.frame(&TickInput::default(), now);
            if session.phase() == GamePhase::Running {
                assert_eq!(session.store().saves, before);
            }
        }
    }

    #[test]
    fn test_high_score_carries_into_next_game() {
        let mut session = session_with_high(0);
        session.start(5);
        session.state.score = 120;
        session.state.lives = 1;
        stack_hits(&mut session, 1);
        session.frame(&TickInput::default(), 16.0);

        session.start(6);
        assert_eq!(session.state.high_score, 120);
        assert_eq!(session.state.score, 0);
    }
}
