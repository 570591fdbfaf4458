//! Vertex types for beam meshes

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

/// Colors for beam elements
pub mod colors {
    /// Weakest beams
    pub const BEAM_DIM: [f32; 4] = [0.35, 0.1, 0.6, 1.0];
    /// Beam at the emitter's base power
    pub const BEAM_BASE: [f32; 4] = [0.2, 0.8, 1.0, 1.0];
    /// Amplified beams approach white
    pub const BEAM_HOT: [f32; 4] = [1.0, 0.95, 0.85, 1.0];
    /// Hit-point glow
    pub const MARKER: [f32; 4] = [1.0, 0.85, 0.5, 1.0];
}
