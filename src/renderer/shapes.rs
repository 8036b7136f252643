//! Shape generation for 2D primitives
//!
//! Everything is emitted as triangle lists in playfield pixels (origin top
//! left, y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Append a quad from four corners in winding order
fn quad(out: &mut Vec<Vertex>, corners: [Vec2; 4], color: [f32; 4]) {
    let [a, b, c, d] = corners;
    for p in [a, b, c, c, d, a] {
        out.push(Vertex::new(p.x, p.y, color));
    }
}

/// Filled axis-aligned rectangle
pub fn rect(out: &mut Vec<Vertex>, min: Vec2, size: Vec2, color: [f32; 4]) {
    let max = min + size;
    quad(
        out,
        [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)],
        color,
    );
}

/// Rectangle border of `thickness`, centred on the edge like a canvas stroke
pub fn rect_outline(out: &mut Vec<Vertex>, min: Vec2, size: Vec2, thickness: f32, color: [f32; 4]) {
    let h = thickness / 2.0;
    let max = min + size;
    // Top, bottom, left, right
    rect(out, Vec2::new(min.x - h, min.y - h), Vec2::new(size.x + thickness, thickness), color);
    rect(out, Vec2::new(min.x - h, max.y - h), Vec2::new(size.x + thickness, thickness), color);
    rect(out, Vec2::new(min.x - h, min.y + h), Vec2::new(thickness, size.y - thickness), color);
    rect(out, Vec2::new(max.x - h, min.y + h), Vec2::new(thickness, size.y - thickness), color);
}

/// Thick line segment
pub fn line(out: &mut Vec<Vertex>, from: Vec2, to: Vec2, width: f32, color: [f32; 4]) {
    let dir = (to - from).normalize_or_zero();
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    quad(out, [from + perp, to + perp, to - perp, from - perp], color);
}

/// Vertical dashed line from `top` to `bottom`
///
/// `offset` shifts the pattern along the line the way a canvas
/// `lineDashOffset` does: a negative offset moves dashes downward.
#[allow(clippy::too_many_arguments)]
pub fn dashed_vline(
    out: &mut Vec<Vertex>,
    x: f32,
    top: f32,
    bottom: f32,
    width: f32,
    (dash, gap): (f32, f32),
    offset: f32,
    color: [f32; 4],
) {
    let period = dash + gap;
    if period <= 0.0 {
        return;
    }
    // First dash start at or above `top`
    let mut y = top - offset.rem_euclid(period);
    while y < bottom {
        let start = y.max(top);
        let end = (y + dash).min(bottom);
        if end > start {
            rect(
                out,
                Vec2::new(x - width / 2.0, start),
                Vec2::new(width, end - start),
                color,
            );
        }
        y += period;
    }
}

/// Generate vertices for a filled circle
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    ellipse(out, center, Vec2::splat(radius), 0.0, color, segments);
}

/// Filled ellipse with `radii`, rotated by `rotation` radians
pub fn ellipse(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radii: Vec2,
    rotation: f32,
    color: [f32; 4],
    segments: u32,
) {
    let rot = Vec2::from_angle(rotation);
    let point = |i: u32| {
        let theta = (i as f32 / segments as f32) * 2.0 * PI;
        center + rot.rotate(Vec2::new(radii.x * theta.cos(), radii.y * theta.sin()))
    };

    out.reserve((segments * 3) as usize);
    for i in 0..segments {
        let p1 = point(i);
        let p2 = point(i + 1);
        // Triangle from center to edge
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(p1.x, p1.y, color));
        out.push(Vertex::new(p2.x, p2.y, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_rect_covers_corners() {
        let mut out = Vec::new();
        rect(&mut out, Vec2::new(10.0, 20.0), Vec2::new(40.0, 60.0), WHITE);
        assert_eq!(out.len(), 6);
        let xs: Vec<f32> = out.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = out.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::INFINITY, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max), 50.0);
        assert_eq!(ys.iter().cloned().fold(f32::INFINITY, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max), 80.0);
    }

    #[test]
    fn test_dash_count() {
        let mut out = Vec::new();
        dashed_vline(&mut out, 100.0, 0.0, 600.0, 3.0, (20.0, 10.0), 0.0, WHITE);
        // 600 / 30 = 20 dashes
        assert_eq!(out.len(), 20 * 6);
    }

    #[test]
    fn test_dash_offset_clips() {
        let mut out = Vec::new();
        dashed_vline(&mut out, 100.0, 0.0, 600.0, 3.0, (20.0, 10.0), -25.0, WHITE);
        // Pattern moved down 25px: the first dash is cut at the top
        let min_y = out
            .iter()
            .map(|v| v.position[1])
            .fold(f32::INFINITY, f32::min);
        let max_y = out
            .iter()
            .map(|v| v.position[1])
            .fold(f32::NEG_INFINITY, f32::max);
        assert_eq!(min_y, 0.0);
        assert_eq!(max_y, 600.0);
        assert!(out.iter().all(|v| (98.5..=101.5).contains(&v.position[0])));
    }

    #[test]
    fn test_circle_radius() {
        let mut out = Vec::new();
        let center = Vec2::new(5.0, 5.0);
        circle(&mut out, center, 3.0, WHITE, 16);
        assert_eq!(out.len(), 48);
        for v in &out {
            let d = Vec2::from(v.position).distance(center);
            assert!(d < 3.0 + 1e-4);
        }
    }
}
