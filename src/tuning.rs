//! Data-driven game balance
//!
//! Every tuned number the simulation reads lives here. Defaults reproduce the
//! classic feel at 60 ticks per second; a partial JSON object can override any
//! subset of fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance parameters for one game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Vehicle ===
    pub vehicle_width: f32,
    pub vehicle_height: f32,
    pub vehicle_bottom_offset: f32,
    pub min_velocity: f32,
    pub max_velocity: f32,
    pub velocity_step: f32,
    pub lane_easing: f32,

    // === Lanes ===
    pub max_lanes: usize,
    pub min_lanes: usize,
    /// A lane is removed every this many levels
    pub levels_per_lane_drop: u32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub initial_obstacle_speed: f32,
    /// Share of the vehicle's velocity added to a new obstacle's speed
    pub relative_speed_factor: f32,
    pub initial_spawn_interval: u32,

    // === Scoring ===
    pub distance_per_velocity: f64,
    pub score_scale: f64,

    // === Levels ===
    pub level_distance: f64,
    pub level_up_duration: u32,
    pub level_speed_step: f32,
    pub level_interval_step: u32,
    pub level_interval_floor: u32,

    // === Distance milestones ===
    pub milestone_distance: f64,
    pub milestone_speed_step: f32,
    pub milestone_speed_cap: f32,
    pub milestone_interval_step: u32,
    pub milestone_interval_floor: u32,

    // === Signals ===
    pub engine_tick_interval: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            vehicle_width: VEHICLE_WIDTH,
            vehicle_height: VEHICLE_HEIGHT,
            vehicle_bottom_offset: VEHICLE_BOTTOM_OFFSET,
            min_velocity: MIN_VELOCITY,
            max_velocity: MAX_VELOCITY,
            velocity_step: VELOCITY_STEP,
            lane_easing: LANE_EASING,

            max_lanes: MAX_LANES,
            min_lanes: MIN_LANES,
            levels_per_lane_drop: 2,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            initial_obstacle_speed: 5.0,
            relative_speed_factor: 0.5,
            initial_spawn_interval: 60,

            distance_per_velocity: DISTANCE_PER_VELOCITY,
            score_scale: SCORE_SCALE,

            level_distance: LEVEL_DISTANCE,
            level_up_duration: LEVEL_UP_DURATION_TICKS,
            level_speed_step: 1.0,
            level_interval_step: 3,
            level_interval_floor: 25,

            milestone_distance: 50.0,
            milestone_speed_step: 0.5,
            milestone_speed_cap: 12.0,
            milestone_interval_step: 2,
            milestone_interval_floor: 30,

            engine_tick_interval: 8,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning object and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json).map_err(TuningError::Parse)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check the parameters describe a playable game
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        let positive = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("vehicle_width", self.vehicle_width),
            ("vehicle_height", self.vehicle_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("min_velocity", self.min_velocity),
        ];
        for (field, value) in positive {
            // Written this way so NaN is rejected too
            if !(value > 0.0) {
                return invalid(field, "must be greater than zero");
            }
        }

        if self.max_velocity < self.min_velocity {
            return invalid("max_velocity", "must not be below min_velocity");
        }
        if !(self.lane_easing > 0.0 && self.lane_easing <= 1.0) {
            return invalid("lane_easing", "must be in (0, 1]");
        }
        if self.min_lanes == 0 {
            return invalid("min_lanes", "must be at least 1");
        }
        if self.max_lanes < self.min_lanes {
            return invalid("max_lanes", "must not be below min_lanes");
        }
        if self.levels_per_lane_drop == 0 {
            return invalid("levels_per_lane_drop", "must be at least 1");
        }
        if self.initial_spawn_interval == 0 {
            return invalid("initial_spawn_interval", "must be at least 1");
        }
        if self.level_interval_floor == 0 {
            return invalid("level_interval_floor", "must be at least 1");
        }
        if self.milestone_interval_floor == 0 {
            return invalid("milestone_interval_floor", "must be at least 1");
        }
        if !(self.level_distance > 0.0) {
            return invalid("level_distance", "must be greater than zero");
        }
        if !(self.milestone_distance > 0.0) {
            return invalid("milestone_distance", "must be greater than zero");
        }
        if !(self.score_scale > 0.0) {
            return invalid("score_scale", "must be greater than zero");
        }
        if self.level_up_duration == 0 {
            return invalid("level_up_duration", "must be at least 1");
        }
        Ok(())
    }

    /// Score gained per tick at the given velocity
    pub fn score_per_tick(&self, velocity: f32) -> f64 {
        velocity as f64 * self.distance_per_velocity * self.score_scale
    }
}

/// Why a tuning file was rejected
#[derive(Debug)]
pub enum TuningError {
    /// Not valid JSON, or a field had the wrong type
    Parse(serde_json::Error),
    /// A field is outside the playable range
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "failed to parse tuning: {e}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}
