//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per frame)
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod lanes;
pub mod obstacle;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod vehicle;

pub use collision::{Rect, overlaps};
pub use difficulty::{Difficulty, LevelUp, lane_count_for_level};
pub use lanes::LaneLayout;
pub use obstacle::{Obstacle, ObstacleKind};
pub use state::{GameEvent, GameState, LevelUpAnimation};
pub use tick::{Command, tick};
pub use vehicle::Vehicle;
