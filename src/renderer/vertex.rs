//! Vertex format for uploading guide meshes

use bytemuck::{Pod, Zeroable};

use crate::sim::Geometry;

/// 3D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y, z],
            color,
        }
    }

    /// Byte stride of one vertex in a buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Flatten indexed geometry into a non-indexed triangle list
pub fn triangle_list(geometry: &Geometry, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(geometry.indices.len() * 3);
    for (_, tri) in geometry.triangles() {
        for p in tri {
            vertices.push(Vertex::new(p.x, p.y, p.z, color));
        }
    }
    vertices
}

/// Raw bytes ready for a vertex buffer upload
pub fn vertex_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Colors for guide meshes
pub mod colors {
    pub const RAY_CURVE: [f32; 4] = [0.3, 0.8, 1.0, 0.9];
    pub const RAY_CURVE_INVALID: [f32; 4] = [1.0, 0.3, 0.3, 0.6];
    pub const HIT_MARKER: [f32; 4] = [0.3, 1.0, 0.5, 0.8];
}
