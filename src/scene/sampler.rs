//! Area-weighted random sampling of points on a triangle mesh.

use glam::Vec3;
use rand::Rng;

use super::mesh::{triangle_area, MeshData};
use crate::error::SceneError;

/// Samples uniformly distributed points over a mesh surface.
///
/// Triangles are chosen with probability proportional to their area via a
/// cumulative-area table, then a point is drawn uniformly inside the chosen
/// triangle.
pub struct SurfaceSampler<'a> {
    mesh: &'a MeshData,
    cumulative_area: Vec<f32>,
}

impl<'a> SurfaceSampler<'a> {
    /// Precompute the cumulative area table.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Geometry`] if the mesh has no triangles or its
    /// total area is zero.
    pub fn new(mesh: &'a MeshData) -> Result<Self, SceneError> {
        let mut total = 0.0;
        let cumulative_area: Vec<f32> = (0..mesh.triangle_count())
            .map(|face| {
                total += triangle_area(mesh.triangle(face));
                total
            })
            .collect();

        if !(total > 0.0) {
            return Err(SceneError::Geometry(format!(
                "cannot sample a surface of area {total} ({} triangles)",
                mesh.triangle_count()
            )));
        }

        Ok(Self {
            mesh,
            cumulative_area,
        })
    }

    /// Total surface area.
    #[must_use]
    pub fn total_area(&self) -> f32 {
        self.cumulative_area.last().copied().unwrap_or(0.0)
    }

    /// Draw one `(position, face normal)` pair.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> (Vec3, Vec3) {
        let face = self.pick_face(rng.random::<f32>() * self.total_area());
        let [a, b, c] = self.mesh.triangle(face);

        let mut u = rng.random::<f32>();
        let mut v = rng.random::<f32>();
        if u + v > 1.0 {
            u = 1.0 - u;
            v = 1.0 - v;
        }

        let position = a * u + b * v + c * (1.0 - u - v);
        let normal = (b - a).cross(c - a).normalize_or_zero();
        (position, normal)
    }

    /// Index of the face whose cumulative-area bucket contains `x`.
    fn pick_face(&self, x: f32) -> usize {
        self.cumulative_area
            .partition_point(|&c| c <= x)
            .min(self.cumulative_area.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::scene::torus::TorusGeometry;

    /// Two triangles of area 0.5 and 1.5 sharing the edge `x + y = 1`.
    fn uneven_quad() -> MeshData {
        MeshData {
            positions: vec![
                Vec3::ZERO,
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(3.0, 1.0, 0.0),
            ],
            normals: vec![Vec3::Z; 4],
            indices: vec![0, 1, 2, 1, 3, 2],
        }
    }

    #[test]
    fn samples_lie_on_the_torus() {
        let torus = TorusGeometry::new(50.0, 2.0, 20, 100).unwrap();
        let mesh = torus.build();
        let sampler = SurfaceSampler::new(&mesh).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..2000 {
            let (p, n) = sampler.sample(&mut rng);
            let from_core = p - torus.core_point(p.y.atan2(p.x));
            // Flat facets stray slightly off the true tube.
            let d = from_core.length();
            assert!((1.9..=2.05).contains(&d), "distance {d}");
            assert!((n.length() - 1.0).abs() < 1e-4);
            assert!(n.dot(from_core) > 0.0);
        }
    }

    #[test]
    fn selection_is_area_weighted() {
        let mesh = uneven_quad();
        let sampler = SurfaceSampler::new(&mesh).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let n = 20_000;
        let first = (0..n)
            .filter(|_| {
                let (p, _) = sampler.sample(&mut rng);
                // First triangle is exactly x + y <= 1.
                p.x + p.y <= 1.0 + 1e-5
            })
            .count();
        let share = first as f32 / n as f32;
        assert!((share - 0.25).abs() < 0.02, "share {share}");
    }

    #[test]
    fn pick_face_boundaries() {
        let mesh = uneven_quad();
        let sampler = SurfaceSampler::new(&mesh).unwrap();
        assert_eq!(sampler.pick_face(0.0), 0);
        assert_eq!(sampler.pick_face(0.49), 0);
        assert_eq!(sampler.pick_face(0.5), 1);
        assert_eq!(sampler.pick_face(1.99), 1);
        assert_eq!(sampler.pick_face(10.0), 1);
        assert!((sampler.total_area() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn same_seed_same_points() {
        let mesh = uneven_quad();
        let sampler = SurfaceSampler::new(&mesh).unwrap();
        let mut a = StdRng::seed_from_u64(3);
        let mut b = StdRng::seed_from_u64(3);
        for _ in 0..10 {
            assert_eq!(sampler.sample(&mut a), sampler.sample(&mut b));
        }
    }

    #[test]
    fn rejects_empty_and_flat_meshes() {
        assert!(SurfaceSampler::new(&MeshData::default()).is_err());
        let flat = MeshData {
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::X * 2.0],
            normals: vec![Vec3::Z; 3],
            indices: vec![0, 1, 2],
        };
        assert!(SurfaceSampler::new(&flat).is_err());
    }
}
