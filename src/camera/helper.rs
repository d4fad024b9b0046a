//! Wireframe visualization of a camera's frustum.
//!
//! Points are defined in normalized device coordinates and unprojected
//! through the inverse view-projection, so the lines always match what the
//! camera actually sees.

use glam::{Mat4, Vec3};

use super::core::Camera;
use crate::renderer::overlay::OverlayVertex;
use crate::util::color::hex_to_linear;

const FRUSTUM: u32 = 0xffaa00;
const CONE: u32 = 0xff0000;
const UP: u32 = 0x00aaff;
const TARGET: u32 = 0xffffff;
const CROSS: u32 = 0x333333;

// NDC depth of the near and far planes.
const NEAR: f32 = 0.0;
const FAR: f32 = 1.0;

/// Line-list vertices outlining `camera`: near and far rectangles, side
/// edges, the cone from the eye, an "up" triangle above the near plane,
/// the center line, and crosshairs on both planes.
#[must_use]
pub fn camera_helper_lines(camera: &Camera) -> Vec<OverlayVertex> {
    let inverse = camera.build_matrix().inverse();
    let at = |x: f32, y: f32, z: f32| unproject(inverse, x, y, z);

    let p = camera.eye;
    let c = at(0.0, 0.0, NEAR);
    let t = at(0.0, 0.0, FAR);
    let [n1, n2, n3, n4] = corners(&at, NEAR);
    let [f1, f2, f3, f4] = corners(&at, FAR);
    let u1 = at(-0.7, 1.1, NEAR);
    let u2 = at(0.7, 1.1, NEAR);
    let u3 = at(0.0, 2.0, NEAR);
    let [cn1, cn2, cn3, cn4] = cross(&at, NEAR);
    let [cf1, cf2, cf3, cf4] = cross(&at, FAR);

    let frustum = hex_to_linear(FRUSTUM);
    let cone = hex_to_linear(CONE);
    let up = hex_to_linear(UP);
    let target = hex_to_linear(TARGET);
    let cross_color = hex_to_linear(CROSS);

    let lines = [
        // near
        (n1, n2, frustum),
        (n2, n4, frustum),
        (n4, n3, frustum),
        (n3, n1, frustum),
        // far
        (f1, f2, frustum),
        (f2, f4, frustum),
        (f4, f3, frustum),
        (f3, f1, frustum),
        // sides
        (n1, f1, frustum),
        (n2, f2, frustum),
        (n3, f3, frustum),
        (n4, f4, frustum),
        // cone
        (p, n1, cone),
        (p, n2, cone),
        (p, n3, cone),
        (p, n4, cone),
        // up
        (u1, u2, up),
        (u2, u3, up),
        (u3, u1, up),
        // target
        (c, t, target),
        (p, c, cross_color),
        // cross
        (cn1, cn2, cross_color),
        (cn3, cn4, cross_color),
        (cf1, cf2, cross_color),
        (cf3, cf4, cross_color),
    ];

    lines
        .iter()
        .flat_map(|&(a, b, color)| {
            [OverlayVertex::new(a, color), OverlayVertex::new(b, color)]
        })
        .collect()
}

fn unproject(inverse: Mat4, x: f32, y: f32, z: f32) -> Vec3 {
    inverse.project_point3(Vec3::new(x, y, z))
}

fn corners(at: &impl Fn(f32, f32, f32) -> Vec3, z: f32) -> [Vec3; 4] {
    [at(-1.0, -1.0, z), at(1.0, -1.0, z), at(-1.0, 1.0, z), at(1.0, 1.0, z)]
}

fn cross(at: &impl Fn(f32, f32, f32) -> Vec3, z: f32) -> [Vec3; 4] {
    [at(-1.0, 0.0, z), at(1.0, 0.0, z), at(0.0, -1.0, z), at(0.0, 1.0, z)]
}
