//! Obstacle entity

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;

/// Obstacle types
///
/// The simulation treats every kind identically; the kind only selects how
/// the renderer draws it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Car,
    Tree,
    Wall,
    Animal,
    Box,
}

impl ObstacleKind {
    /// Every kind, in spawn-table order
    pub const ALL: [ObstacleKind; 5] = [
        ObstacleKind::Car,
        ObstacleKind::Tree,
        ObstacleKind::Wall,
        ObstacleKind::Animal,
        ObstacleKind::Box,
    ];
}

/// A hazard falling down one lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    id: u32,
    kind: ObstacleKind,
    /// Lane index at spawn time
    lane: usize,
    /// Top-left corner
    pos: Vec2,
    size: Vec2,
    /// Pixels per tick, fixed at spawn
    speed: f32,
}

impl Obstacle {
    /// Create an obstacle whose bottom edge sits on the top of the playfield
    pub fn new(id: u32, kind: ObstacleKind, lane: usize, x: f32, size: Vec2, speed: f32) -> Self {
        Self::at(id, kind, lane, Vec2::new(x, -size.y), size, speed)
    }

    /// Create an obstacle at an arbitrary position
    pub(crate) fn at(
        id: u32,
        kind: ObstacleKind,
        lane: usize,
        pos: Vec2,
        size: Vec2,
        speed: f32,
    ) -> Self {
        Self {
            id,
            kind,
            lane,
            pos,
            size,
            speed,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn kind(&self) -> ObstacleKind {
        self.kind
    }

    pub fn lane(&self) -> usize {
        self.lane
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Move down by this obstacle's speed
    pub fn advance(&mut self) {
        self.pos.y += self.speed;
    }

    /// True once the top edge has passed below the playfield
    pub fn is_off_screen(&self, playfield_height: f32) -> bool {
        self.pos.y > playfield_height
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle(speed: f32) -> Obstacle {
        Obstacle::new(1, ObstacleKind::Tree, 0, 50.0, Vec2::new(40.0, 60.0), speed)
    }

    #[test]
    fn test_spawns_above_playfield() {
        let obs = obstacle(5.0);
        assert_eq!(obs.pos(), Vec2::new(50.0, -60.0));
        assert_eq!(obs.bounding_box().bottom(), 0.0);
    }

    #[test]
    fn test_advance_uses_fixed_speed() {
        let mut obs = obstacle(7.5);
        for _ in 0..4 {
            obs.advance();
        }
        assert_eq!(obs.pos().y, -60.0 + 30.0);
        assert_eq!(obs.speed(), 7.5);
        assert_eq!(obs.pos().x, 50.0);
    }

    #[test]
    fn test_off_screen_strictly_past_bottom() {
        let mut obs = obstacle(660.0);
        obs.advance();
        // Top edge exactly on the bottom boundary is still on screen
        assert_eq!(obs.pos().y, 600.0);
        assert!(!obs.is_off_screen(600.0));
        obs.advance();
        assert!(obs.is_off_screen(600.0));
    }

    #[test]
    fn test_all_kinds_distinct() {
        let set: std::collections::HashSet<_> = ObstacleKind::ALL.iter().collect();
        assert_eq!(set.len(), ObstacleKind::ALL.len());
    }
}
