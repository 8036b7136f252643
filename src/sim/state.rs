//! Game state and core simulation types
//!
//! One `GameState` is one session. It is never reset in place: a new game is
//! a new `GameState`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::{Difficulty, LevelUp};
use super::lanes::LaneLayout;
use super::obstacle::Obstacle;
use super::vehicle::Vehicle;
use crate::tuning::{Tuning, TuningError};

/// Signals emitted by the simulation for presentation collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Periodic engine pulse while driving
    EngineTick,
    /// An obstacle left the bottom of the playfield
    ObstacleScored,
    /// A new level was reached
    LevelUp { level: u32 },
    /// Any continuous engine sound must stop
    EngineStop,
    /// The vehicle hit an obstacle; the run is over
    Collision,
}

/// Level-up celebration timer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelUpAnimation {
    active: bool,
    elapsed: u32,
}

impl LevelUpAnimation {
    /// (Re)start the animation from the beginning
    pub fn start(&mut self) {
        self.active = true;
        self.elapsed = 0;
    }

    /// Advance one tick, deactivating once `duration` ticks have elapsed
    pub fn advance(&mut self, duration: u32) {
        if self.active {
            self.elapsed += 1;
            if self.elapsed >= duration {
                self.active = false;
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Progress in `[0, 1)`, `None` when not showing
    pub fn progress(&self, duration: u32) -> Option<f32> {
        self.active
            .then(|| self.elapsed as f32 / duration.max(1) as f32)
    }

    /// Banner scale for a progress value
    ///
    /// Grows from 0.5 to 0.85 over the first 70%, then jumps to 1.2 and
    /// shrinks back toward 1.0 over the remaining 30%.
    pub fn scale_at(progress: f32) -> f32 {
        if progress > 0.7 {
            1.2 - (progress - 0.7) * 0.67
        } else {
            0.5 + progress * 0.5
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub(crate) seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) tuning: Tuning,
    /// Current lane layout, shared by the vehicle and the spawner
    pub(crate) lanes: LaneLayout,
    pub(crate) vehicle: Vehicle,
    /// Live obstacles (sorted by id for determinism)
    pub(crate) obstacles: Vec<Obstacle>,
    pub(crate) difficulty: Difficulty,
    /// Distance score in internal units (10 per displayed km)
    pub(crate) score: f64,
    /// Simulation tick counter
    pub(crate) frame: u64,
    pub(crate) is_over: bool,
    pub(crate) level_up: LevelUpAnimation,
    pub(crate) last_engine_tick: u64,
    /// Events raised since the last drain
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game with default balance
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a new game with explicit balance
    ///
    /// The tuning is validated first; a game is never built on parameters
    /// that could divide by zero or leave no lanes.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    /// `tuning` must already be valid
    fn build(seed: u64, tuning: Tuning) -> Self {
        let difficulty = Difficulty::new(&tuning);
        let lanes = LaneLayout::compute(
            difficulty.lane_count(),
            tuning.playfield_width,
            tuning.vehicle_width,
        );
        let vehicle = Vehicle::new(&tuning, lanes.len());

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            lanes,
            vehicle,
            obstacles: Vec::new(),
            difficulty,
            score: 0.0,
            frame: 0,
            is_over: false,
            level_up: LevelUpAnimation::default(),
            last_engine_tick: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub(crate) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Commit a level-up if the score has earned one
    ///
    /// On a transition: restarts the celebration, swaps in a new lane layout
    /// when the lane count changed (pulling the vehicle's target lane into
    /// range), and raises `GameEvent::LevelUp`. Repeated calls at the same
    /// score do nothing.
    pub fn check_level_up(&mut self) -> Option<LevelUp> {
        let up = self.difficulty.check_level_up(self.score, &self.tuning)?;

        self.level_up.start();
        if let Some(lane_count) = up.lane_count {
            self.lanes = LaneLayout::compute(
                lane_count,
                self.tuning.playfield_width,
                self.tuning.vehicle_width,
            );
            self.vehicle.clamp_target_lane(lane_count);
            log::debug!("Lane layout now {:?}", self.lanes.positions());
        }
        log::info!(
            "Level {}: {} lanes, obstacle speed {}, spawn every {} ticks",
            up.level,
            self.lanes.len(),
            self.difficulty.obstacle_speed_base(),
            self.difficulty.spawn_interval()
        );
        self.events.push(GameEvent::LevelUp { level: up.level });
        Some(up)
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Read-only queries for presentation ===

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Internal score units
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Distance travelled in kilometres
    pub fn distance_km(&self) -> f64 {
        self.score / self.tuning.score_scale
    }

    pub fn level(&self) -> u32 {
        self.difficulty.level()
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn lanes(&self) -> &LaneLayout {
        &self.lanes
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    pub fn level_up_animation(&self) -> &LevelUpAnimation {
        &self.level_up
    }

    /// Level-up celebration progress in `[0, 1)`, `None` when not showing
    pub fn level_up_progress(&self) -> Option<f32> {
        self.level_up.progress(self.tuning.level_up_duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let state = GameState::new(7);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lanes().len(), 6);
        assert_eq!(state.vehicle().target_lane(), 3);
        assert!(state.obstacles().is_empty());
        assert!(!state.is_over());
        assert_eq!(state.level_up_progress(), None);
    }

    #[test]
    fn test_with_tuning_rejects_invalid() {
        let tuning = Tuning {
            levels_per_lane_drop: 0,
            ..Tuning::default()
        };
        let err = GameState::with_tuning(1, tuning).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "levels_per_lane_drop",
                ..
            }
        ));

        let no_lanes = Tuning {
            min_lanes: 0,
            max_lanes: 0,
            ..Tuning::default()
        };
        assert!(GameState::with_tuning(1, no_lanes).is_err());
    }

    #[test]
    fn test_with_tuning_accepts_valid() {
        let tuning = Tuning {
            max_lanes: 4,
            ..Tuning::default()
        };
        let state = GameState::with_tuning(1, tuning).expect("valid tuning");
        assert_eq!(state.lanes().len(), 4);
    }

    #[test]
    fn test_check_level_up_idempotent() {
        let mut state = GameState::new(7);
        state.score = 150.0;

        assert!(state.check_level_up().is_some());
        assert_eq!(state.level(), 2);
        assert_eq!(state.level_up_progress(), Some(0.0));
        state.level_up.advance(180);
        let elapsed = state.level_up.elapsed();

        assert!(state.check_level_up().is_none());
        // Second call must not restart the celebration
        assert_eq!(state.level_up.elapsed(), elapsed);
        assert_eq!(state.difficulty().obstacle_speed_base(), 6.0);

        let level_ups = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::LevelUp { .. }))
            .count();
        assert_eq!(level_ups, 1);
    }

    #[test]
    fn test_lane_swap_clamps_vehicle() {
        let mut state = GameState::new(7);
        for _ in 0..5 {
            state.vehicle.move_right(state.lanes.len());
        }
        assert_eq!(state.vehicle().target_lane(), 5);

        state.score = 300.0;
        let up = state.check_level_up().expect("level up");
        assert_eq!(up.level, 3);
        assert_eq!(state.lanes().len(), 5);
        assert_eq!(state.vehicle().target_lane(), 4);
    }

    #[test]
    fn test_animation_runs_for_duration() {
        let mut anim = LevelUpAnimation::default();
        anim.start();
        for _ in 0..179 {
            anim.advance(180);
        }
        assert!(anim.is_active());
        anim.advance(180);
        assert!(!anim.is_active());
        assert_eq!(anim.progress(180), None);
    }

    #[test]
    fn test_scale_curve() {
        assert_eq!(LevelUpAnimation::scale_at(0.0), 0.5);
        assert!((LevelUpAnimation::scale_at(0.7) - 0.85).abs() < 1e-6);
        assert!(LevelUpAnimation::scale_at(0.71) > 1.19);
        assert!(LevelUpAnimation::scale_at(0.99) < LevelUpAnimation::scale_at(0.8));
    }

    #[test]
    fn test_distance_km() {
        let mut state = GameState::new(1);
        state.score = 96.0;
        assert!((state.distance_km() - 9.6).abs() < 1e-9);
    }
}
