//! Shape generation for 2D primitives

use super::vertex::{Vertex, colors};
use crate::sim::{GamePhase, ObstacleView, Rect, Snapshot};

/// Alpha multiplier for obstacles that already dropped past the player
const PASSED_ALPHA: f32 = 0.55;

/// Blend cool (slow) to hot (fast) by intensity
pub fn obstacle_color(intensity: f32, passed: bool) -> [f32; 4] {
    let t = intensity.clamp(0.0, 1.0);
    let cool = colors::OBSTACLE_COOL;
    let hot = colors::OBSTACLE_HOT;
    let alpha = if passed { PASSED_ALPHA } else { 1.0 };
    [
        cool[0] + (hot[0] - cool[0]) * t,
        cool[1] + (hot[1] - cool[1]) * t,
        cool[2] + (hot[2] - cool[2]) * t,
        alpha,
    ]
}

/// Generate vertices for a filled axis-aligned rectangle (two triangles)
pub fn rect(r: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let (l, t, rt, b) = (r.left(), r.top(), r.right(), r.bottom());
    [
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
        Vertex::new(rt, t, color),
        Vertex::new(rt, t, color),
        Vertex::new(l, b, color),
        Vertex::new(rt, b, color),
    ]
}

fn obstacle(view: &ObstacleView) -> [Vertex; 6] {
    rect(&view.rect, obstacle_color(view.intensity, view.passed))
}

/// Dimming layer drawn over everything outside of live play
fn overlay_color(phase: GamePhase) -> Option<[f32; 4]> {
    match phase {
        GamePhase::Running => None,
        GamePhase::Idle => Some(colors::OVERLAY_IDLE),
        GamePhase::Paused => Some(colors::OVERLAY_PAUSED),
        GamePhase::GameOver => Some(colors::OVERLAY_GAME_OVER),
    }
}

/// Build the whole frame in canvas coordinates
pub fn frame(snapshot: &Snapshot) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((snapshot.obstacles.len() + 2) * 6);

    for view in &snapshot.obstacles {
        vertices.extend_from_slice(&obstacle(view));
    }
    vertices.extend_from_slice(&rect(&snapshot.player, colors::PLAYER));

    if let Some(color) = overlay_color(snapshot.phase) {
        vertices.extend_from_slice(&rect(&snapshot.canvas, color));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;
    use crate::sim::state::Obstacle;

    #[test]
    fn test_rect_covers_corners() {
        let v = rect(&Rect::new(1.0, 2.0, 3.0, 4.0), [1.0; 4]);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert!(xs.iter().all(|&x| x == 1.0 || x == 4.0));
        assert!(ys.iter().all(|&y| y == 2.0 || y == 6.0));
    }

    #[test]
    fn test_obstacle_color_ramp() {
        assert_eq!(obstacle_color(0.0, false), colors::OBSTACLE_COOL);
        let hot = obstacle_color(1.0, false);
        for (got, want) in hot.iter().zip(colors::OBSTACLE_HOT) {
            assert!((got - want).abs() < 1e-6);
        }
        assert_eq!(obstacle_color(0.5, true)[3], PASSED_ALPHA);
    }

    #[test]
    fn test_frame_vertex_counts_per_phase() {
        let mut state = GameState::new(1);
        for i in 0..3 {
            let id = state.next_entity_id();
            state
                .obstacles
                .push(Obstacle::new(id, i as f32 * 50.0, 0.0, 20.0, 20.0, 2.0));
        }

        // Idle: obstacles + player + overlay
        assert_eq!(frame(&Snapshot::from_state(&state)).len(), 5 * 6);

        state.phase = GamePhase::Running;
        assert_eq!(frame(&Snapshot::from_state(&state)).len(), 4 * 6);

        state.phase = GamePhase::GameOver;
        let verts = frame(&Snapshot::from_state(&state));
        assert_eq!(verts.len(), 5 * 6);
        assert_eq!(verts.last().unwrap().color, colors::OVERLAY_GAME_OVER);
    }
}
