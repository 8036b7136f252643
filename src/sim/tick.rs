//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. The host calls
//! [`tick`] once per rendered frame; player commands are applied directly to
//! the state between ticks with [`GameState::apply`].

use serde::{Deserialize, Serialize};

use super::spawner;
use super::state::{GameEvent, GameState};

/// Discrete player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Accelerate,
    Decelerate,
}

impl GameState {
    /// Apply a player command immediately
    ///
    /// Ignored once the game is over.
    pub fn apply(&mut self, command: Command) {
        if self.is_over {
            return;
        }
        match command {
            Command::MoveLeft => self.vehicle.move_left(),
            Command::MoveRight => self.vehicle.move_right(self.lanes.len()),
            Command::Accelerate => self.vehicle.accelerate(),
            Command::Decelerate => self.vehicle.decelerate(),
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState) {
    if state.is_over {
        return;
    }

    state.frame += 1;

    // Vehicle eases toward its lane in the current layout
    state.vehicle.advance(&state.lanes);

    // Distance accrues with speed
    state.score += state.tuning.score_per_tick(state.vehicle.velocity());

    spawner::maybe_spawn(state);

    if state.frame - state.last_engine_tick >= state.tuning.engine_tick_interval {
        state.events.push(GameEvent::EngineTick);
        state.last_engine_tick = state.frame;
    }

    // Move obstacles; those that leave the bottom count as dodged
    let playfield_height = state.tuning.playfield_height;
    let mut scored = 0;
    state.obstacles.retain_mut(|obstacle| {
        obstacle.advance();
        let gone = obstacle.is_off_screen(playfield_height);
        if gone {
            scored += 1;
        }
        !gone
    });
    state
        .events
        .extend(std::iter::repeat_n(GameEvent::ObstacleScored, scored));

    state.level_up.advance(state.tuning.level_up_duration);

    state.check_level_up();

    check_collision(state);
}

/// End the game on the first obstacle overlapping the vehicle
fn check_collision(state: &mut GameState) {
    let car = state.vehicle.bounding_box();
    let Some(hit) = state
        .obstacles
        .iter()
        .find(|obstacle| obstacle.bounding_box().overlaps(&car))
    else {
        return;
    };

    log::info!(
        "Game over: hit {:?} #{} at {:.1} km, level {}, frame {}",
        hit.kind(),
        hit.id(),
        state.distance_km(),
        state.level(),
        state.frame
    );
    state.is_over = true;
    state.events.push(GameEvent::EngineStop);
    state.events.push(GameEvent::Collision);
}
