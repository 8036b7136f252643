//! Difficulty and level progression
//!
//! The level is derived from distance: `floor(score / level_distance) + 1`.
//! Each new level speeds obstacles up, spawns them more often, and every
//! `levels_per_lane_drop` levels removes a lane down to `min_lanes`.
//!
//! A second, independent ramp fires at every distance milestone. Both ramps
//! stack on the same `obstacle_speed_base` and `spawn_interval`.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Outcome of a level transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    /// Newly committed level
    pub level: u32,
    /// New lane count, if it changed
    pub lane_count: Option<usize>,
}

/// Lane count for a level: one lane fewer every `levels_per_lane_drop` levels
pub fn lane_count_for_level(level: u32, tuning: &Tuning) -> usize {
    let dropped = (level.saturating_sub(1) / tuning.levels_per_lane_drop) as usize;
    tuning
        .max_lanes
        .saturating_sub(dropped)
        .max(tuning.min_lanes)
}

/// Level derived from a score
pub fn level_for_score(score: f64, tuning: &Tuning) -> u32 {
    (score / tuning.level_distance).floor() as u32 + 1
}

/// Current difficulty parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    level: u32,
    lane_count: usize,
    /// Base pixels per tick for newly spawned obstacles
    obstacle_speed_base: f32,
    /// Ticks between spawns
    spawn_interval: u32,
    /// Highest distance milestone already applied
    milestone: u64,
}

impl Difficulty {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            level: 1,
            lane_count: lane_count_for_level(1, tuning),
            obstacle_speed_base: tuning.initial_obstacle_speed,
            spawn_interval: tuning.initial_spawn_interval,
            milestone: 0,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    pub fn obstacle_speed_base(&self) -> f32 {
        self.obstacle_speed_base
    }

    pub fn spawn_interval(&self) -> u32 {
        self.spawn_interval
    }

    /// Commit a new level if the score has reached one
    ///
    /// Calling this again with an unchanged score is a no-op.
    pub fn check_level_up(&mut self, score: f64, tuning: &Tuning) -> Option<LevelUp> {
        let candidate = level_for_score(score, tuning);
        if candidate <= self.level {
            return None;
        }
        self.level = candidate;

        let lanes = lane_count_for_level(candidate, tuning);
        let lane_count = (lanes != self.lane_count).then(|| {
            self.lane_count = lanes;
            lanes
        });

        self.obstacle_speed_base += tuning.level_speed_step;
        self.spawn_interval = self
            .spawn_interval
            .saturating_sub(tuning.level_interval_step)
            .max(tuning.level_interval_floor);

        Some(LevelUp {
            level: candidate,
            lane_count,
        })
    }

    /// Apply the milestone ramp once if the score entered a new milestone
    ///
    /// Speed is raised toward its cap and the interval lowered toward its
    /// floor; neither is ever pushed back past a value set by a level-up.
    pub fn check_milestone(&mut self, score: f64, tuning: &Tuning) -> bool {
        let reached = (score / tuning.milestone_distance).floor() as u64;
        if reached <= self.milestone {
            return false;
        }
        self.milestone = reached;

        if self.obstacle_speed_base < tuning.milestone_speed_cap {
            self.obstacle_speed_base = (self.obstacle_speed_base + tuning.milestone_speed_step)
                .min(tuning.milestone_speed_cap);
        }
        if self.spawn_interval > tuning.milestone_interval_floor {
            self.spawn_interval = self
                .spawn_interval
                .saturating_sub(tuning.milestone_interval_step)
                .max(tuning.milestone_interval_floor);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_count_table() {
        let tuning = Tuning::default();
        let expected = [6, 6, 5, 5, 4, 4, 3, 3, 2, 2, 2, 2];
        for (i, &lanes) in expected.iter().enumerate() {
            let level = i as u32 + 1;
            assert_eq!(lane_count_for_level(level, &tuning), lanes, "level {level}");
        }
        assert_eq!(lane_count_for_level(1000, &tuning), 2);
    }

    #[test]
    fn test_level_for_score() {
        let tuning = Tuning::default();
        assert_eq!(level_for_score(0.0, &tuning), 1);
        assert_eq!(level_for_score(149.99, &tuning), 1);
        assert_eq!(level_for_score(150.0, &tuning), 2);
        assert_eq!(level_for_score(451.0, &tuning), 4);
    }

    #[test]
    fn test_level_up_is_idempotent() {
        let tuning = Tuning::default();
        let mut diff = Difficulty::new(&tuning);

        let up = diff.check_level_up(150.0, &tuning);
        assert_eq!(
            up,
            Some(LevelUp {
                level: 2,
                lane_count: None
            })
        );
        assert_eq!(diff.obstacle_speed_base(), 6.0);
        assert_eq!(diff.spawn_interval(), 57);

        assert_eq!(diff.check_level_up(150.0, &tuning), None);
        assert_eq!(diff.obstacle_speed_base(), 6.0);
        assert_eq!(diff.spawn_interval(), 57);
    }

    #[test]
    fn test_level_three_drops_a_lane() {
        let tuning = Tuning::default();
        let mut diff = Difficulty::new(&tuning);
        diff.check_level_up(150.0, &tuning);
        let up = diff.check_level_up(300.0, &tuning).expect("level 3");
        assert_eq!(up.level, 3);
        assert_eq!(up.lane_count, Some(5));
        assert_eq!(diff.lane_count(), 5);
    }

    #[test]
    fn test_level_never_decreases() {
        let tuning = Tuning::default();
        let mut diff = Difficulty::new(&tuning);
        diff.check_level_up(800.0, &tuning);
        assert_eq!(diff.level(), 6);
        assert_eq!(diff.check_level_up(10.0, &tuning), None);
        assert_eq!(diff.level(), 6);
    }

    #[test]
    fn test_spawn_interval_floor() {
        let tuning = Tuning::default();
        let mut diff = Difficulty::new(&tuning);
        for level in 1..40 {
            diff.check_level_up(level as f64 * 150.0, &tuning);
        }
        assert_eq!(diff.spawn_interval(), 25);
    }

    #[test]
    fn test_milestone_once_per_crossing() {
        let tuning = Tuning::default();
        let mut diff = Difficulty::new(&tuning);
        assert!(!diff.check_milestone(49.9, &tuning));
        assert!(diff.check_milestone(50.1, &tuning));
        assert_eq!(diff.obstacle_speed_base(), 5.5);
        assert_eq!(diff.spawn_interval(), 58);
        assert!(!diff.check_milestone(60.0, &tuning));
        assert_eq!(diff.obstacle_speed_base(), 5.5);
    }

    #[test]
    fn test_milestone_respects_caps() {
        let tuning = Tuning::default();
        let mut diff = Difficulty::new(&tuning);
        for m in 1..100 {
            diff.check_milestone(m as f64 * 50.0, &tuning);
        }
        assert_eq!(diff.obstacle_speed_base(), 12.0);
        assert_eq!(diff.spawn_interval(), 30);
    }

    #[test]
    fn test_milestone_never_lowers_level_speed() {
        let tuning = Tuning::default();
        let mut diff = Difficulty::new(&tuning);
        // Eleven level-ups push the base past the milestone cap
        for level in 1..=11 {
            diff.check_level_up(level as f64 * 150.0, &tuning);
        }
        let before = diff.obstacle_speed_base();
        assert!(before > tuning.milestone_speed_cap);
        diff.check_milestone(1600.0, &tuning);
        assert_eq!(diff.obstacle_speed_base(), before);
    }
}
