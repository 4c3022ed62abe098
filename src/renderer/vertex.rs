//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// 2D vertex in screen pixels with an RGBA color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    /// Bytes between consecutive vertices in a buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
    /// Byte offset of `color` within a vertex
    pub const COLOR_OFFSET: usize = std::mem::size_of::<[f32; 2]>();

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Raw bytes of a vertex slice, ready for a GPU buffer upload
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Colors for game elements
pub mod colors {
    pub const SKY_TOP: [f32; 4] = [0.494, 0.753, 1.0, 1.0];
    pub const SKY_BOTTOM: [f32; 4] = [0.231, 0.549, 1.0, 1.0];
    pub const GROUND: [f32; 4] = [0.043, 0.231, 0.231, 1.0];
    pub const OBSTACLE: [f32; 4] = [0.722, 0.231, 0.369, 1.0];
    pub const PLAYER: [f32; 4] = [1.0, 0.867, 0.341, 1.0];
    pub const PARTICLE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const HUD_PANEL: [f32; 4] = [0.0, 0.0, 0.0, 0.25];
    pub const GAME_OVER_VEIL: [f32; 4] = [0.0, 0.0, 0.0, 0.5];
}
