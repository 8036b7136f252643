//! Lane Rush - A lane-dodging arcade driving game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (vehicle, obstacles, difficulty, game state)
//! - `tuning`: Data-driven game balance
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser input mapping
//! - `ui`: HUD text
//! - `audio`: Procedural sound effects

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// These are the defaults baked into [`Tuning::default`]; the simulation
/// itself always reads the values from its `Tuning`.
pub mod consts {
    /// Simulation rate the balance numbers were tuned for
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Playfield dimensions (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 400.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Vehicle bounding box
    pub const VEHICLE_WIDTH: f32 = 40.0;
    pub const VEHICLE_HEIGHT: f32 = 60.0;
    /// Distance from the vehicle's top edge to the bottom of the playfield
    pub const VEHICLE_BOTTOM_OFFSET: f32 = 100.0;

    /// Vehicle speed bounds (pixels per tick)
    pub const MIN_VELOCITY: f32 = 2.0;
    pub const MAX_VELOCITY: f32 = 12.0;
    pub const VELOCITY_STEP: f32 = 0.5;
    /// Fraction of the remaining distance to the target lane covered each tick
    pub const LANE_EASING: f32 = 0.1;

    /// Lane counts
    pub const MAX_LANES: usize = 6;
    pub const MIN_LANES: usize = 2;

    /// Obstacle bounding box
    pub const OBSTACLE_WIDTH: f32 = 40.0;
    pub const OBSTACLE_HEIGHT: f32 = 60.0;

    /// Score units gained per tick per unit of velocity, before `SCORE_SCALE`
    pub const DISTANCE_PER_VELOCITY: f64 = 0.0008;
    /// Internal score units per displayed kilometre
    pub const SCORE_SCALE: f64 = 10.0;
    /// Score units per level
    pub const LEVEL_DISTANCE: f64 = 150.0;
    /// Level-up celebration length (3 seconds)
    pub const LEVEL_UP_DURATION_TICKS: u32 = 3 * TICKS_PER_SECOND;
}
