//! Solid marker cube placed at the view camera.

use glam::{Quat, Vec3};

use crate::renderer::overlay::OverlayVertex;

/// Outward axis and the tangent pair whose cross product equals it.
const FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::Y, Vec3::Z),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::Z, Vec3::X),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::Y, Vec3::X),
];

/// Triangle-list cube of edge `size` centered at `center`, with its local
/// +Z axis turned toward `look_at`.
#[must_use]
pub fn marker_box(
    center: Vec3,
    look_at: Vec3,
    size: f32,
    color: [f32; 3],
) -> Vec<OverlayVertex> {
    let facing = (look_at - center).normalize_or_zero();
    let rotation = if facing == Vec3::ZERO {
        Quat::IDENTITY
    } else {
        Quat::from_rotation_arc(Vec3::Z, facing)
    };
    let half = size * 0.5;

    let mut vertices = Vec::with_capacity(36);
    for (normal, t1, t2) in FACES {
        let corner = |s1: f32, s2: f32| {
            let local = (normal + t1 * s1 + t2 * s2) * half;
            OverlayVertex::new(center + rotation * local, color)
        };
        let quad = [
            corner(-1.0, -1.0),
            corner(1.0, -1.0),
            corner(1.0, 1.0),
            corner(-1.0, 1.0),
        ];
        vertices.extend_from_slice(&[
            quad[0], quad[1], quad[2], quad[0], quad[2], quad[3],
        ]);
    }
    vertices
}
