//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Build an opaque color from a `0xRRGGBB` literal
pub const fn rgb(hex: u32) -> [f32; 4] {
    rgba(hex, 1.0)
}

pub const fn rgba(hex: u32, alpha: f32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Colors for game elements
pub mod colors {
    use super::{rgb, rgba};

    pub const ROAD: [f32; 4] = rgb(0x2d3436);
    pub const LANE_MARKER: [f32; 4] = rgb(0xffd700);

    pub const PLAYER_BODY: [f32; 4] = rgb(0xff0000);
    pub const WINDOW: [f32; 4] = rgb(0x87ceeb);
    pub const TIRE: [f32; 4] = rgb(0x000000);

    pub const TRAFFIC_BODY: [f32; 4] = rgb(0x0099ff);
    pub const TRUNK: [f32; 4] = rgb(0x8b4513);
    pub const LEAVES: [f32; 4] = rgb(0x228b22);
    pub const LEAVES_DARK: [f32; 4] = rgb(0x1a6b1a);
    pub const CONCRETE: [f32; 4] = rgb(0x696969);
    pub const MORTAR: [f32; 4] = rgb(0x505050);
    pub const HIGHLIGHT: [f32; 4] = rgba(0xffffff, 0.1);
    pub const FUR: [f32; 4] = rgb(0x8b6f47);
    pub const EARS: [f32; 4] = rgb(0xa0826d);
    pub const EYES: [f32; 4] = rgb(0x000000);
    pub const CARDBOARD: [f32; 4] = rgb(0xdaa520);
    pub const CARDBOARD_EDGE: [f32; 4] = rgb(0x8b7500);

    pub const VEIL: [f32; 4] = rgba(0x000000, 0.5);
    pub const BANNER: [f32; 4] = rgba(0xffd700, 0.9);
    pub const BANNER_BORDER: [f32; 4] = rgb(0xffffff);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_colors() {
        assert_eq!(rgb(0xff0000), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(rgba(0x0000ff, 0.5), [0.0, 0.0, 1.0, 0.5]);
        assert_eq!(colors::ROAD[3], 1.0);
    }
}
