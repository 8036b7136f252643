//! Scene tessellation
//!
//! Turns a [`GameState`] snapshot into one triangle list per frame. Draw
//! order: road, lane markers, obstacles, player, level-up overlay.

use glam::Vec2;

use super::shapes::{circle, dashed_vline, ellipse, line, rect, rect_outline};
use super::vertex::{Vertex, colors};
use crate::settings::Settings;
use crate::sim::{GameState, LevelUpAnimation, Obstacle, ObstacleKind, Vehicle};

/// Lane marker dash and gap lengths
pub const DASH_PATTERN: (f32, f32) = (20.0, 10.0);
const MARKER_WIDTH: f32 = 3.0;
/// Marker scroll per tick per unit of velocity
const MARKER_SCROLL: f64 = 0.5;

/// Size of the level-up card before scaling
const BANNER_SIZE: Vec2 = Vec2::new(140.0, 80.0);

const SEGMENTS: u32 = 20;

/// Sprite art is laid out on a 40x60 grid and stretched to the entity size
const ART_SIZE: Vec2 = Vec2::new(40.0, 60.0);

/// Dash offset for the lane markers at `frame`
///
/// Always in `(-period, 0]`, so dashes slide down the screen.
pub fn dash_offset(frame: u64, velocity: f32) -> f32 {
    let period = (DASH_PATTERN.0 + DASH_PATTERN.1) as f64;
    -((frame as f64 * velocity as f64 * MARKER_SCROLL) % period) as f32
}

/// Maps art-grid coordinates onto an entity's box
struct Sprite {
    origin: Vec2,
    scale: Vec2,
}

impl Sprite {
    fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            origin: pos,
            scale: size / ART_SIZE,
        }
    }

    fn at(&self, x: f32, y: f32) -> Vec2 {
        self.origin + Vec2::new(x, y) * self.scale
    }

    fn span(&self, w: f32, h: f32) -> Vec2 {
        Vec2::new(w, h) * self.scale
    }

    fn rect(&self, out: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        rect(out, self.at(x, y), self.span(w, h), color);
    }

    fn circle(&self, out: &mut Vec<Vertex>, x: f32, y: f32, r: f32, color: [f32; 4]) {
        circle(out, self.at(x, y), r * self.scale.x, color, SEGMENTS);
    }
}

/// Build the full frame
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let tuning = state.tuning();
    let field = Vec2::new(tuning.playfield_width, tuning.playfield_height);
    let mut out = Vec::with_capacity(1024);

    rect(&mut out, Vec2::ZERO, field, colors::ROAD);

    let offset = if settings.effective_lane_markers() {
        dash_offset(state.frame(), state.vehicle().velocity())
    } else {
        0.0
    };
    for x in state.lanes().divider_xs() {
        dashed_vline(
            &mut out,
            x,
            0.0,
            field.y,
            MARKER_WIDTH,
            DASH_PATTERN,
            offset,
            colors::LANE_MARKER,
        );
    }

    for obstacle in state.obstacles() {
        draw_obstacle(&mut out, obstacle);
    }

    draw_player(&mut out, state.vehicle());

    if let Some(progress) = state.level_up_progress() {
        let scale = if settings.effective_banner_zoom() {
            LevelUpAnimation::scale_at(progress)
        } else {
            1.0
        };
        draw_level_up(&mut out, field, scale);
    }

    out
}

/// Draw one obstacle in the style of its kind
pub fn draw_obstacle(out: &mut Vec<Vertex>, obstacle: &Obstacle) {
    let sprite = Sprite::new(obstacle.pos(), obstacle.size());
    match obstacle.kind() {
        ObstacleKind::Car => draw_traffic(out, &sprite),
        ObstacleKind::Tree => draw_tree(out, &sprite),
        ObstacleKind::Wall => draw_wall(out, &sprite),
        ObstacleKind::Animal => draw_animal(out, &sprite),
        ObstacleKind::Box => draw_box(out, &sprite),
    }
}

fn draw_traffic(out: &mut Vec<Vertex>, s: &Sprite) {
    s.rect(out, 0.0, 0.0, 40.0, 60.0, colors::TRAFFIC_BODY);
    s.rect(out, 5.0, 15.0, 30.0, 20.0, colors::WINDOW);
    // Front tires only; it is driving away from us
    s.rect(out, 8.0, 0.0, 8.0, 10.0, colors::TIRE);
    s.rect(out, 24.0, 0.0, 8.0, 10.0, colors::TIRE);
}

fn draw_tree(out: &mut Vec<Vertex>, s: &Sprite) {
    s.rect(out, 12.0, 30.0, 16.0, 30.0, colors::TRUNK);
    s.circle(out, 20.0, 20.0, 18.0, colors::LEAVES);
    s.circle(out, 10.0, 25.0, 12.0, colors::LEAVES_DARK);
    s.circle(out, 30.0, 25.0, 12.0, colors::LEAVES_DARK);
}

fn draw_wall(out: &mut Vec<Vertex>, s: &Sprite) {
    s.rect(out, 0.0, 0.0, 40.0, 60.0, colors::CONCRETE);
    for row in 0..3 {
        let y = row as f32 * 20.0 + 5.0;
        rect_outline(out, s.at(5.0, y), s.span(30.0, 15.0), 2.0, colors::MORTAR);
    }
    s.rect(out, 0.0, 0.0, 40.0, 5.0, colors::HIGHLIGHT);
}

fn draw_animal(out: &mut Vec<Vertex>, s: &Sprite) {
    // Body and head
    ellipse(out, s.at(20.0, 35.0), s.span(12.0, 18.0), 0.0, colors::FUR, SEGMENTS);
    s.circle(out, 20.0, 15.0, 10.0, colors::FUR);
    // Ears
    ellipse(out, s.at(15.0, 5.0), s.span(4.0, 10.0), -0.3, colors::EARS, SEGMENTS);
    ellipse(out, s.at(25.0, 5.0), s.span(4.0, 10.0), 0.3, colors::EARS, SEGMENTS);
    // Eyes
    s.circle(out, 17.0, 12.0, 2.0, colors::EYES);
    s.circle(out, 23.0, 12.0, 2.0, colors::EYES);
    // Tail
    s.rect(out, 28.0, 30.0, 8.0, 15.0, colors::FUR);
}

fn draw_box(out: &mut Vec<Vertex>, s: &Sprite) {
    s.rect(out, 0.0, 0.0, 40.0, 60.0, colors::CARDBOARD);
    rect_outline(out, s.at(0.0, 0.0), s.span(40.0, 60.0), 2.0, colors::CARDBOARD_EDGE);
    line(out, s.at(5.0, 5.0), s.at(35.0, 55.0), 2.0, colors::CARDBOARD_EDGE);
    line(out, s.at(35.0, 5.0), s.at(5.0, 55.0), 2.0, colors::CARDBOARD_EDGE);
}

/// Draw the player's car
pub fn draw_player(out: &mut Vec<Vertex>, vehicle: &Vehicle) {
    let s = Sprite::new(vehicle.pos(), vehicle.size());
    s.rect(out, 0.0, 0.0, 40.0, 60.0, colors::PLAYER_BODY);
    s.rect(out, 5.0, 15.0, 30.0, 20.0, colors::WINDOW);
    for (x, y) in [(8.0, 0.0), (24.0, 0.0), (8.0, 50.0), (24.0, 50.0)] {
        s.rect(out, x, y, 8.0, 10.0, colors::TIRE);
    }
}

/// Dim the road and draw the banner card; the text is laid over it by the page
fn draw_level_up(out: &mut Vec<Vertex>, field: Vec2, scale: f32) {
    rect(out, Vec2::ZERO, field, colors::VEIL);

    let size = BANNER_SIZE * scale;
    let min = field / 2.0 - size / 2.0;
    rect(out, min, size, colors::BANNER);
    rect_outline(out, min, size, 3.0 * scale, colors::BANNER_BORDER);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(vertices: &[Vertex]) -> (Vec2, Vec2) {
        vertices.iter().fold(
            (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
            |(lo, hi), v| {
                let p = Vec2::from(v.position);
                (lo.min(p), hi.max(p))
            },
        )
    }

    #[test]
    fn test_dash_offset() {
        assert_eq!(dash_offset(0, 5.0), 0.0);
        assert_eq!(dash_offset(10, 2.0), -10.0);
        assert_eq!(dash_offset(7, 10.0), -5.0);
        for frame in 0..500 {
            let o = dash_offset(frame, 7.5);
            assert!(o <= 0.0 && o > -30.0);
        }
    }

    #[test]
    fn test_every_kind_stays_near_its_box() {
        let size = Vec2::new(40.0, 60.0);
        for kind in ObstacleKind::ALL {
            let obstacle = Obstacle::new(1, kind, 0, 100.0, size, 5.0);
            let mut out = Vec::new();
            draw_obstacle(&mut out, &obstacle);
            assert!(!out.is_empty(), "{kind:?}");
            assert_eq!(out.len() % 3, 0);

            let (lo, hi) = bounds(&out);
            let min = obstacle.pos() - Vec2::splat(6.0);
            let max = obstacle.pos() + size + Vec2::splat(6.0);
            assert!(lo.cmpge(min).all() && hi.cmple(max).all(), "{kind:?}");
        }
    }

    #[test]
    fn test_kinds_look_different() {
        let first_color = |kind| {
            let obstacle = Obstacle::new(1, kind, 0, 0.0, Vec2::new(40.0, 60.0), 5.0);
            let mut out = Vec::new();
            draw_obstacle(&mut out, &obstacle);
            out[0].color
        };
        let colors: Vec<[f32; 4]> = ObstacleKind::ALL.iter().map(|&k| first_color(k)).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_scene_layers() {
        let state = GameState::new(3);
        let settings = Settings::default();
        let out = build_scene(&state, &settings);
        // Road first, player last
        assert_eq!(out[0].color, colors::ROAD);
        assert_eq!(out.last().map(|v| v.color), Some(colors::TIRE));
        let (lo, hi) = bounds(&out);
        assert_eq!(lo, Vec2::ZERO);
        assert_eq!(hi, Vec2::new(400.0, 600.0));
    }

    #[test]
    fn test_overlay_only_while_celebrating() {
        let mut state = GameState::new(4);
        let settings = Settings::default();
        let plain = build_scene(&state, &settings).len();

        state.score = 150.0;
        state.check_level_up();
        let celebrating = build_scene(&state, &settings);
        assert!(celebrating.len() > plain);
        assert!(celebrating.iter().any(|v| v.color == colors::BANNER));
    }

    #[test]
    fn test_static_markers_with_reduced_motion() {
        let mut state = GameState::new(5);
        state.frame = 7;
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let still = build_scene(&state, &settings);
        state.frame = 0;
        let start = build_scene(&state, &settings);
        assert_eq!(still, start);
    }
}
