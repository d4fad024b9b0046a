//! Indexed triangle mesh shared by the procedural generators.

use glam::Vec3;

/// Interleaved vertex uploaded for lit meshes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Unit normal.
    pub normal: [f32; 3],
}

/// CPU-side indexed triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Per-vertex unit normals, parallel to `positions`.
    pub normals: Vec<Vec3>,
    /// Triangle list, three indices per face, counter-clockwise when seen
    /// from outside.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Corner positions of triangle `face`.
    #[must_use]
    pub fn triangle(&self, face: usize) -> [Vec3; 3] {
        let base = face * 3;
        [
            self.positions[self.indices[base] as usize],
            self.positions[self.indices[base + 1] as usize],
            self.positions[self.indices[base + 2] as usize],
        ]
    }

    /// Interleave positions and normals for upload.
    #[must_use]
    pub fn vertices(&self) -> Vec<MeshVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .map(|(p, n)| MeshVertex {
                position: p.to_array(),
                normal: n.to_array(),
            })
            .collect()
    }

    /// Sum of the triangle areas.
    #[must_use]
    pub fn surface_area(&self) -> f32 {
        (0..self.triangle_count())
            .map(|face| triangle_area(self.triangle(face)))
            .sum()
    }
}

/// Area of a triangle.
#[inline]
#[must_use]
pub fn triangle_area([a, b, c]: [Vec3; 3]) -> f32 {
    0.5 * (b - a).cross(c - a).length()
}
