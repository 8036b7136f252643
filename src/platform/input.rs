//! Keyboard and touch mapping

use crate::sim::Command;

/// Horizontal travel (CSS pixels) per lane change while swiping
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Forward to the simulation
    Drive(Command),
    ToggleMute,
    ToggleAutopilot,
    Restart,
}

impl KeyAction {
    /// Map a `KeyboardEvent.key` value
    ///
    /// Arrow keys and WASD drive; letters are case-insensitive.
    pub fn from_key(key: &str) -> Option<Self> {
        let action = match key {
            "ArrowLeft" => Self::Drive(Command::MoveLeft),
            "ArrowRight" => Self::Drive(Command::MoveRight),
            "ArrowUp" => Self::Drive(Command::Accelerate),
            "ArrowDown" => Self::Drive(Command::Decelerate),
            "Enter" => Self::Restart,
            _ => {
                let mut chars = key.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                match c.to_ascii_lowercase() {
                    'a' => Self::Drive(Command::MoveLeft),
                    'd' => Self::Drive(Command::MoveRight),
                    'w' => Self::Drive(Command::Accelerate),
                    's' => Self::Drive(Command::Decelerate),
                    'm' => Self::ToggleMute,
                    'p' => Self::ToggleAutopilot,
                    'r' => Self::Restart,
                    _ => return None,
                }
            }
        };
        Some(action)
    }

    /// Whether the browser default (page scroll) should be suppressed
    pub fn prevents_default(&self) -> bool {
        matches!(self, Self::Drive(_))
    }
}

/// Single-finger horizontal swipe detection
///
/// A long drag changes lanes once per [`SWIPE_THRESHOLD`] of travel: each
/// time the finger passes the threshold a command fires and the anchor moves
/// to the finger.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    anchor: Option<f32>,
}

impl SwipeTracker {
    pub fn begin(&mut self, x: f32) {
        self.anchor = Some(x);
    }

    /// Feed a `touchmove` position, returning a lane change once the finger
    /// has travelled past the threshold since the anchor
    pub fn moved(&mut self, x: f32) -> Option<Command> {
        let anchor = self.anchor?;
        let delta = x - anchor;
        let command = if delta > SWIPE_THRESHOLD {
            Command::MoveRight
        } else if delta < -SWIPE_THRESHOLD {
            Command::MoveLeft
        } else {
            return None;
        };
        self.anchor = Some(x);
        Some(command)
    }

    /// Finger lifted or the touch was cancelled
    pub fn end(&mut self) {
        self.anchor = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.anchor.is_some()
    }
}
