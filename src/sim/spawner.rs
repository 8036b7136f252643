//! Obstacle spawning
//!
//! Every `spawn_interval` ticks one obstacle appears above a random lane of
//! the *current* layout, with a random kind. Its speed is fixed at creation:
//! the base speed plus half the vehicle's velocity, so driving faster makes
//! traffic arrive faster.

use glam::Vec2;
use rand::Rng;

use super::lanes::LaneLayout;
use super::obstacle::{Obstacle, ObstacleKind};
use super::state::GameState;
use crate::tuning::Tuning;

/// Whether a spawn is due on this frame
pub fn spawn_due(frame: u64, spawn_interval: u32) -> bool {
    spawn_interval > 0 && frame % spawn_interval as u64 == 0
}

/// Speed a new obstacle gets
pub fn obstacle_speed(speed_base: f32, vehicle_velocity: f32, tuning: &Tuning) -> f32 {
    speed_base + vehicle_velocity * tuning.relative_speed_factor
}

/// Build an obstacle in `lane` of `lanes`
///
/// Lane positions are laid out for the vehicle's width, so an obstacle of a
/// different width is shifted to stay centred in its lane. Returns `None` if
/// the lane does not exist in the layout.
pub fn create_obstacle(
    id: u32,
    kind: ObstacleKind,
    lane: usize,
    lanes: &LaneLayout,
    speed: f32,
    tuning: &Tuning,
) -> Option<Obstacle> {
    let x = lanes.position(lane)? + (tuning.vehicle_width - tuning.obstacle_width) / 2.0;
    Some(Obstacle::new(
        id,
        kind,
        lane,
        x,
        Vec2::new(tuning.obstacle_width, tuning.obstacle_height),
        speed,
    ))
}

/// Spawn an obstacle if one is due this frame, returning its id
///
/// Also applies the distance-milestone ramp, which is evaluated on spawn
/// frames only.
pub fn maybe_spawn(state: &mut GameState) -> Option<u32> {
    if !spawn_due(state.frame, state.difficulty.spawn_interval()) {
        return None;
    }

    let lane = state.rng.random_range(0..state.lanes.len());
    let kind = ObstacleKind::ALL[state.rng.random_range(0..ObstacleKind::ALL.len())];
    let speed = obstacle_speed(
        state.difficulty.obstacle_speed_base(),
        state.vehicle.velocity(),
        &state.tuning,
    );
    let id = state.next_entity_id();
    let obstacle = create_obstacle(id, kind, lane, &state.lanes, speed, &state.tuning)?;
    log::debug!(
        "Spawned {:?} #{} in lane {} at speed {:.1}",
        kind,
        id,
        lane,
        speed
    );
    state.obstacles.push(obstacle);

    if state.difficulty.check_milestone(state.score, &state.tuning) {
        log::debug!(
            "Distance milestone: speed {}, interval {}",
            state.difficulty.obstacle_speed_base(),
            state.difficulty.spawn_interval()
        );
    }

    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_due() {
        assert!(!spawn_due(59, 60));
        assert!(spawn_due(60, 60));
        assert!(spawn_due(120, 60));
        assert!(!spawn_due(121, 60));
        assert!(!spawn_due(10, 0));
    }

    #[test]
    fn test_relative_speed() {
        let tuning = Tuning::default();
        let lanes = LaneLayout::compute(3, 400.0, 40.0);
        let speed = obstacle_speed(5.0, 10.0, &tuning);
        let obs = create_obstacle(1, ObstacleKind::Car, 2, &lanes, speed, &tuning)
            .expect("lane 2 exists");
        assert_eq!(obs.speed(), 10.0);
        assert_eq!(obs.lane(), 2);
        assert_eq!(obs.pos().x, lanes.position(2).unwrap());
        assert_eq!(obs.pos().y, -tuning.obstacle_height);
    }

    #[test]
    fn test_narrow_obstacle_centred_in_lane() {
        let tuning = Tuning {
            obstacle_width: 30.0,
            ..Tuning::default()
        };
        let lanes = LaneLayout::compute(4, 400.0, tuning.vehicle_width);
        let obs = create_obstacle(1, ObstacleKind::Tree, 1, &lanes, 5.0, &tuning)
            .expect("lane 1 exists");
        let lane_centre = lanes.position(1).unwrap() + tuning.vehicle_width / 2.0;
        assert_eq!(obs.pos().x + obs.size().x / 2.0, lane_centre);
        assert_eq!(obs.pos().x, lanes.position(1).unwrap() + 5.0);
    }

    #[test]
    fn test_missing_lane() {
        let tuning = Tuning::default();
        let lanes = LaneLayout::compute(2, 400.0, 40.0);
        assert!(create_obstacle(1, ObstacleKind::Box, 2, &lanes, 5.0, &tuning).is_none());
    }

    #[test]
    fn test_maybe_spawn_only_on_interval() {
        let mut state = GameState::new(42);
        state.frame = 59;
        assert_eq!(maybe_spawn(&mut state), None);
        state.frame = 60;
        let id = maybe_spawn(&mut state).expect("spawn due");
        assert_eq!(state.obstacles().len(), 1);
        let obs = &state.obstacles()[0];
        assert_eq!(obs.id(), id);
        assert!(obs.lane() < state.lanes().len());
        assert_eq!(obs.speed(), 5.0 + 2.0 * 0.5);
    }

    #[test]
    fn test_spawns_use_every_lane_and_kind() {
        let mut state = GameState::new(1234);
        let mut lanes = std::collections::HashSet::new();
        let mut kinds = std::collections::HashSet::new();
        for i in 1..=500 {
            state.frame = i * 60;
            maybe_spawn(&mut state);
        }
        for obs in state.obstacles() {
            lanes.insert(obs.lane());
            kinds.insert(obs.kind());
        }
        assert_eq!(lanes.len(), 6);
        assert_eq!(kinds.len(), ObstacleKind::ALL.len());
    }

    #[test]
    fn test_milestone_applied_on_spawn() {
        let mut state = GameState::new(3);
        state.score = 51.0;
        state.frame = 60;
        maybe_spawn(&mut state);
        assert_eq!(state.difficulty().obstacle_speed_base(), 5.5);
        assert_eq!(state.difficulty().spawn_interval(), 58);
    }
}
