//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Timestamps are passed in, never read from a clock
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod rect;
pub mod session;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use rect::{Rect, collide};
pub use session::Session;
pub use snapshot::{ObstacleView, Snapshot, speed_intensity};
pub use spawner::{maybe_spawn, roll_obstacle};
pub use state::{GameEvent, GamePhase, GameState, Obstacle, Player};
pub use tick::{TickInput, tick, toggle_pause};
