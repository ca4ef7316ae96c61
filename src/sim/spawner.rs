//! Time-gated obstacle generation
//!
//! Spawns get more frequent, wider and faster as the level goes up. The random
//! source is passed in so tests can drive it with a fixed generator.

use rand::Rng;

use super::state::{GameState, Obstacle};
use crate::tuning::Tuning;

/// Decide whether an obstacle is due at `now` and roll one if so.
///
/// Returns `None` while `now - last_spawn` is still inside the level's gap.
/// The obstacle starts just above the visible area and always fits the canvas
/// horizontally. The caller assigns the id and records `now` as the new
/// spawn time.
pub fn roll_obstacle<R: Rng + ?Sized>(
    now: f64,
    last_spawn: f64,
    level: u32,
    tuning: &Tuning,
    rng: &mut R,
) -> Option<Obstacle> {
    if now - last_spawn < tuning.spawn_gap_ms(level) {
        return None;
    }

    let (min_w, max_w) = tuning.obstacle_width;
    let w = rng.random_range(min_w..=max_w) + tuning.width_bonus(level);
    let max_x = (tuning.canvas_width - w).max(0.0);
    let x = rng.random_range(0.0..=max_x);

    let (min_h, max_h) = tuning.obstacle_height;
    let h = rng.random_range(min_h..=max_h);

    let (min_speed, max_speed) = tuning.obstacle_speed;
    let speed = rng.random_range(min_speed..=max_speed) + tuning.speed_bonus(level);

    Some(Obstacle::new(0, x, -h, w, h, speed))
}

/// Spawn into the session if the gap has elapsed.
///
/// Returns the new obstacle's id when one was added.
pub fn maybe_spawn(state: &mut GameState, now: f64) -> Option<u32> {
    let mut obstacle = roll_obstacle(
        now,
        state.last_spawn,
        state.level,
        &state.tuning,
        &mut state.rng,
    )?;

    let id = state.next_entity_id();
    obstacle.id = id;
    state.obstacles.push(obstacle);
    state.last_spawn = now;
    log::trace!("Spawned obstacle {} at t={:.0}ms", id, now);
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_gap_scenario() {
        let mut state = GameState::new(7);
        assert_eq!(state.level, 1);
        assert_eq!(state.last_spawn, 0.0);

        assert!(maybe_spawn(&mut state, 700.0).is_some());
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.last_spawn, 700.0);

        // Gap at level 1 is 540ms
        assert!(maybe_spawn(&mut state, 750.0).is_none());
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.last_spawn, 700.0);

        assert!(maybe_spawn(&mut state, 1240.0).is_some());
        assert_eq!(state.obstacles.len(), 2);
    }

    #[test]
    fn test_spawn_exactly_at_gap() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(roll_obstacle(539.9, 0.0, 1, &tuning, &mut rng).is_none());
        assert!(roll_obstacle(540.0, 0.0, 1, &tuning, &mut rng).is_some());
    }

    #[test]
    fn test_spawned_ids_are_unique() {
        let mut state = GameState::new(3);
        let a = maybe_spawn(&mut state, 1000.0).unwrap();
        let b = maybe_spawn(&mut state, 2000.0).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_obstacle_ranges_across_levels() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);

        for level in [1u32, 3, 8, 20] {
            for _ in 0..200 {
                let o = roll_obstacle(1.0e9, 0.0, level, &tuning, &mut rng).unwrap();
                let bonus = (level as f32 * 5.0).min(60.0);
                let w = o.rect.size.x;
                let h = o.rect.size.y;

                assert!(w >= 30.0 + bonus && w <= 90.0 + bonus, "width {w} at level {level}");
                assert!((20.0..=60.0).contains(&h));
                assert!(o.rect.left() >= 0.0);
                assert!(o.rect.right() <= tuning.canvas_width + 1e-3);
                // Starts fully above the visible area
                assert_eq!(o.rect.bottom(), 0.0);

                let speed_bonus = level as f32 * 0.4;
                assert!(o.speed >= 1.5 + speed_bonus - 1e-4);
                assert!(o.speed <= 3.0 + speed_bonus + 1e-4);
                assert!(!o.passed);
            }
        }
    }

    #[test]
    fn test_same_seed_same_obstacles() {
        let tuning = Tuning::default();
        let mut a = Pcg32::seed_from_u64(99);
        let mut b = Pcg32::seed_from_u64(99);
        for _ in 0..20 {
            let oa = roll_obstacle(1000.0, 0.0, 2, &tuning, &mut a).unwrap();
            let ob = roll_obstacle(1000.0, 0.0, 2, &tuning, &mut b).unwrap();
            assert_eq!(oa.rect, ob.rect);
            assert_eq!(oa.speed, ob.speed);
        }
    }
}
