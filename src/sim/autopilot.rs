//! Demo-mode driver
//!
//! Picks one command per tick from the visible obstacles. Used by the
//! attract mode in the browser and by the headless native run.

use super::state::GameState;
use super::tick::Command;

/// Gap (pixels) below which the lane ahead counts as blocked
const DANGER_GAP: f32 = 120.0;

/// Free road ahead of the car in each lane of the current layout
///
/// Measured from the car's top edge to the bottom edge of the nearest
/// obstacle that has not yet passed it. Negative when an obstacle already
/// overlaps the car's rows. `f32::INFINITY` for an empty lane.
pub fn lane_clearance(state: &GameState) -> Vec<f32> {
    let car = state.vehicle().bounding_box();
    let width = car.width;

    state
        .lanes()
        .positions()
        .iter()
        .map(|&x| {
            state
                .obstacles()
                .iter()
                .map(|o| o.bounding_box())
                .filter(|b| b.y < car.bottom() && b.x < x + width && x < b.right())
                .map(|b| car.y - b.bottom())
                .fold(f32::INFINITY, f32::min)
        })
        .collect()
}

/// Suggest the next command, or `None` to hold
pub fn suggest(state: &GameState) -> Option<Command> {
    if state.is_over() {
        return None;
    }

    let clearance = lane_clearance(state);
    let current = state.vehicle().target_lane();
    let here = *clearance.get(current)?;

    // Most open lane, ties going to the one nearest the car
    let best = clearance
        .iter()
        .enumerate()
        .max_by(|(a, ca), (b, cb)| {
            ca.total_cmp(cb)
                .then_with(|| current.abs_diff(*b).cmp(&current.abs_diff(*a)))
        })
        .map(|(lane, _)| lane)?;

    if clearance[best] > here {
        let next = if best < current { current - 1 } else { current + 1 };
        // Never steer into a lane with something alongside
        if clearance[next] > 0.0 {
            return Some(if best < current {
                Command::MoveLeft
            } else {
                Command::MoveRight
            });
        }
    }

    let vehicle = state.vehicle();
    let tuning = state.tuning();
    if here < DANGER_GAP {
        (vehicle.velocity() > tuning.min_velocity).then_some(Command::Decelerate)
    } else {
        (vehicle.velocity() < tuning.max_velocity).then_some(Command::Accelerate)
    }
}
