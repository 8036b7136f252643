//! Lane layout
//!
//! A layout is the ordered list of x coordinates where an entity of a given
//! width sits centred in each lane. It is replaced wholesale whenever the lane
//! count changes, never edited in place.

use serde::{Deserialize, Serialize};

/// Ordered lane positions (left edge of a lane-centred entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneLayout {
    positions: Vec<f32>,
    lane_width: f32,
}

impl LaneLayout {
    /// Compute the layout for `lane_count` lanes spread over `total_width`
    pub fn compute(lane_count: usize, total_width: f32, entity_width: f32) -> Self {
        let lane_width = total_width / lane_count.max(1) as f32;
        let positions = (0..lane_count)
            .map(|i| i as f32 * lane_width + lane_width / 2.0 - entity_width / 2.0)
            .collect();
        Self {
            positions,
            lane_width,
        }
    }

    /// Number of lanes
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position for a lane index, `None` if out of range
    pub fn position(&self, lane: usize) -> Option<f32> {
        self.positions.get(lane).copied()
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Width of a single lane
    pub fn lane_width(&self) -> f32 {
        self.lane_width
    }

    /// X coordinates of the dividers between adjacent lanes
    pub fn divider_xs(&self) -> impl Iterator<Item = f32> + '_ {
        (1..self.len()).map(|i| i as f32 * self.lane_width)
    }
}
