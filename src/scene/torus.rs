//! Torus surface generation.

use std::f32::consts::TAU;

use glam::Vec3;

use super::mesh::MeshData;
use crate::error::SceneError;

/// Ring torus lying in the XY plane, centered on the origin, with Z as its
/// axis of symmetry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusGeometry {
    /// Distance from the origin to the center of the tube.
    pub radius: f32,
    /// Tube radius.
    pub tube: f32,
    /// Segments around the tube cross-section.
    pub radial_segments: u32,
    /// Segments along the ring.
    pub tubular_segments: u32,
}

impl TorusGeometry {
    /// Validate the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Geometry`] if a radius is not positive or a
    /// segment count is zero.
    pub fn new(
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    ) -> Result<Self, SceneError> {
        if !(radius > 0.0 && tube > 0.0) {
            return Err(SceneError::Geometry(format!(
                "torus radii must be positive (radius {radius}, tube {tube})"
            )));
        }
        if radial_segments == 0 || tubular_segments == 0 {
            return Err(SceneError::Geometry(format!(
                "torus needs at least one segment each way \
                 ({radial_segments}x{tubular_segments})"
            )));
        }
        Ok(Self {
            radius,
            tube,
            radial_segments,
            tubular_segments,
        })
    }

    /// Point on the ring's core circle at ring angle `u`.
    #[must_use]
    pub fn core_point(&self, u: f32) -> Vec3 {
        Vec3::new(self.radius * u.cos(), self.radius * u.sin(), 0.0)
    }

    /// Build the triangle mesh. Seam vertices are duplicated so the grid
    /// is `(radial + 1) x (tubular + 1)`.
    #[must_use]
    pub fn build(&self) -> MeshData {
        let rows = self.radial_segments as usize + 1;
        let cols = self.tubular_segments as usize + 1;
        let mut positions = Vec::with_capacity(rows * cols);
        let mut normals = Vec::with_capacity(rows * cols);

        for j in 0..=self.radial_segments {
            let v = j as f32 / self.radial_segments as f32 * TAU;
            for i in 0..=self.tubular_segments {
                let u = i as f32 / self.tubular_segments as f32 * TAU;
                let ring = self.radius + self.tube * v.cos();
                let vertex = Vec3::new(
                    ring * u.cos(),
                    ring * u.sin(),
                    self.tube * v.sin(),
                );
                positions.push(vertex);
                normals.push((vertex - self.core_point(u)).normalize());
            }
        }

        let stride = self.tubular_segments + 1;
        let mut indices = Vec::with_capacity(
            self.radial_segments as usize * self.tubular_segments as usize * 6,
        );
        for j in 1..=self.radial_segments {
            for i in 1..=self.tubular_segments {
                let a = stride * j + i - 1;
                let b = stride * (j - 1) + i - 1;
                let c = stride * (j - 1) + i;
                let d = stride * j + i;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        MeshData {
            positions,
            normals,
            indices,
        }
    }

    /// Analytic surface area, `4π²Rr`.
    #[must_use]
    pub fn surface_area(&self) -> f32 {
        TAU * self.radius * TAU * self.tube
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_torus() -> TorusGeometry {
        TorusGeometry::new(50.0, 2.0, 20, 100).unwrap()
    }

    #[test]
    fn grid_and_index_counts() {
        let mesh = default_torus().build();
        assert_eq!(mesh.positions.len(), 21 * 101);
        assert_eq!(mesh.normals.len(), mesh.positions.len());
        assert_eq!(mesh.indices.len(), 20 * 100 * 6);
        let max = mesh.indices.iter().copied().max().unwrap() as usize;
        assert!(max < mesh.positions.len());
    }

    #[test]
    fn vertices_sit_on_the_tube() {
        let torus = default_torus();
        let mesh = torus.build();
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            let u = p.y.atan2(p.x);
            let from_core = *p - torus.core_point(u);
            assert!((from_core.length() - 2.0).abs() < 1e-3);
            assert!((n.length() - 1.0).abs() < 1e-4);
            assert!(n.dot(from_core) > 0.0);
        }
    }

    #[test]
    fn faces_wind_outward() {
        let torus = default_torus();
        let mesh = torus.build();
        for face in (0..mesh.triangle_count()).step_by(37) {
            let [a, b, c] = mesh.triangle(face);
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            let outward = centroid - torus.core_point(centroid.y.atan2(centroid.x));
            assert!(normal.dot(outward) > 0.0, "face {face} winds inward");
        }
    }

    #[test]
    fn area_approaches_analytic_value() {
        let torus = default_torus();
        let ratio = torus.build().surface_area() / torus.surface_area();
        assert!(ratio > 0.98 && ratio <= 1.0, "ratio {ratio}");
    }

    #[test]
    fn rejects_degenerate_parameters() {
        assert!(TorusGeometry::new(0.0, 2.0, 20, 100).is_err());
        assert!(TorusGeometry::new(50.0, -1.0, 20, 100).is_err());
        assert!(TorusGeometry::new(50.0, 2.0, 0, 100).is_err());
        assert!(TorusGeometry::new(50.0, 2.0, 20, 0).is_err());
        assert!(TorusGeometry::new(f32::NAN, 2.0, 20, 100).is_err());
    }
}
