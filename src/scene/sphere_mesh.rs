//! UV sphere used as the instanced mesh.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::mesh::MeshData;

/// Generate a UV sphere of the given radius.
///
/// `width_segments` runs around the equator (min 3), `height_segments` from
/// pole to pole (min 2). Pole rows keep their duplicated vertices but skip
/// the degenerate triangles.
#[must_use]
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let width = width_segments.max(3);
    let height = height_segments.max(2);
    let stride = width + 1;

    let vertex_count = (stride * (height + 1)) as usize;
    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);

    for iy in 0..=height {
        let v = iy as f32 / height as f32;
        let (sin_theta, cos_theta) = (v * PI).sin_cos();
        for ix in 0..=width {
            let u = ix as f32 / width as f32;
            let (sin_phi, cos_phi) = (u * TAU).sin_cos();
            let normal = Vec3::new(-cos_phi * sin_theta, cos_theta, sin_phi * sin_theta);
            positions.push(normal * radius);
            normals.push(normal);
        }
    }

    let mut indices = Vec::new();
    for iy in 0..height {
        for ix in 0..width {
            let a = iy * stride + ix + 1;
            let b = iy * stride + ix;
            let c = (iy + 1) * stride + ix;
            let d = (iy + 1) * stride + ix + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    MeshData {
        positions,
        normals,
        indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_skip_pole_triangles() {
        let mesh = uv_sphere(0.2, 32, 16);
        assert_eq!(mesh.positions.len(), 33 * 17);
        // Two triangles per quad minus one per quad on each pole row.
        assert_eq!(mesh.triangle_count(), 32 * 16 * 2 - 2 * 32);
    }

    #[test]
    fn vertices_on_radius() {
        let mesh = uv_sphere(0.2, 32, 16);
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            assert!((p.length() - 0.2).abs() < 1e-5);
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn faces_wind_outward() {
        let mesh = uv_sphere(1.0, 12, 8);
        for face in 0..mesh.triangle_count() {
            let [a, b, c] = mesh.triangle(face);
            let normal = (b - a).cross(c - a);
            assert!(normal.dot(a + b + c) > 0.0, "face {face} winds inward");
        }
    }

    #[test]
    fn clamps_segment_counts() {
        let mesh = uv_sphere(1.0, 0, 0);
        assert_eq!(mesh.positions.len(), 4 * 3);
        assert!(mesh.triangle_count() > 0);
    }
}
