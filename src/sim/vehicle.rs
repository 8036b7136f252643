//! The player's vehicle

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::lanes::LaneLayout;
use crate::tuning::Tuning;

/// The player's car
///
/// `target_lane` is the discrete lane the player asked for; `pos.x` eases
/// toward that lane's position every tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    /// Top-left corner
    pos: Vec2,
    size: Vec2,
    target_lane: usize,
    /// Pixels per tick, always within `[min_velocity, max_velocity]`
    velocity: f32,
    min_velocity: f32,
    max_velocity: f32,
    velocity_step: f32,
    easing: f32,
}

impl Vehicle {
    /// Place the car horizontally centred, near the bottom, aiming at the middle lane
    pub fn new(tuning: &Tuning, lane_count: usize) -> Self {
        let size = Vec2::new(tuning.vehicle_width, tuning.vehicle_height);
        Self {
            pos: Vec2::new(
                tuning.playfield_width / 2.0 - size.x / 2.0,
                tuning.playfield_height - tuning.vehicle_bottom_offset,
            ),
            size,
            target_lane: lane_count / 2,
            velocity: tuning.min_velocity,
            min_velocity: tuning.min_velocity,
            max_velocity: tuning.max_velocity,
            velocity_step: tuning.velocity_step,
            easing: tuning.lane_easing,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn target_lane(&self) -> usize {
        self.target_lane
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Ease toward the target lane in `lanes`, then re-clamp velocity
    pub fn advance(&mut self, lanes: &LaneLayout) {
        if let Some(target_x) = lanes.position(self.target_lane) {
            self.pos.x += (target_x - self.pos.x) * self.easing;
        }
        self.velocity = self.velocity.clamp(self.min_velocity, self.max_velocity);
    }

    /// Shift the target lane one step left; no-op at lane 0
    pub fn move_left(&mut self) {
        if self.target_lane > 0 {
            self.target_lane -= 1;
        }
    }

    /// Shift the target lane one step right; no-op at the last lane
    pub fn move_right(&mut self, lane_count: usize) {
        if self.target_lane + 1 < lane_count {
            self.target_lane += 1;
        }
    }

    pub fn accelerate(&mut self) {
        self.velocity = (self.velocity + self.velocity_step).min(self.max_velocity);
    }

    pub fn decelerate(&mut self) {
        self.velocity = (self.velocity - self.velocity_step).max(self.min_velocity);
    }

    /// Pull the target lane back inside a layout that just shrank
    pub fn clamp_target_lane(&mut self, lane_count: usize) {
        if self.target_lane >= lane_count {
            self.target_lane = lane_count.saturating_sub(1);
        }
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }
}
