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

/// Colors for game elements (sRGB bytes)
pub mod colors {
    pub type Rgb = [u8; 3];

    pub const BACKGROUND: Rgb = [14, 16, 22];
    pub const FOREGROUND: Rgb = [240, 240, 240];
    pub const ACCENT: Rgb = [76, 201, 240];
    pub const ACCENT2: Rgb = [190, 255, 100];
    pub const OBSTACLE: Rgb = [255, 90, 90];
    pub const COLLECTIBLE: Rgb = [255, 210, 90];
    pub const MUTED: Rgb = [160, 170, 180];
    pub const CARD_A: Rgb = [80, 235, 255];
    pub const CARD_B: Rgb = [120, 140, 200];
    pub const BLACK: Rgb = [0, 0, 0];
    pub const INK: Rgb = [20, 20, 20];
    pub const INK_LIGHT: Rgb = [32, 32, 32];
    pub const SUBTLE: Rgb = [200, 210, 220];
    pub const GROUND: Rgb = [28, 34, 46];
    pub const GROUND_STRIPE: Rgb = [36, 44, 58];
    pub const PANEL: Rgb = [28, 34, 46];
    pub const TRACK: Rgb = [50, 56, 70];
    pub const BUTTON_DOWNLOAD: Rgb = [32, 120, 90];
    pub const BUTTON_RESTART: Rgb = [120, 40, 60];
    pub const RAIN_BRIGHT: Rgb = [22, 120, 140];
    pub const RAIN_DIM: Rgb = [24, 28, 36];

    /// Convert to linear RGBA for an sRGB render target
    pub fn linear(c: Rgb) -> [f32; 4] {
        let ch = |v: u8| (v as f32 / 255.0).powf(2.2);
        [ch(c[0]), ch(c[1]), ch(c[2]), 1.0]
    }

    /// CSS `rgb(...)` for the text overlay
    pub fn css(c: Rgb) -> String {
        format!("rgb({},{},{})", c[0], c[1], c[2])
    }
}
