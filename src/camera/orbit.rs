//! Damped orbit controls around a fixed target.
//!
//! The eye lives on a sphere around the target, parameterized by radius,
//! azimuth `theta` about +Y and polar angle `phi` from +Y. Drag input
//! accumulates angular deltas which are bled into the spherical position a
//! fraction at a time on every [`OrbitControls::update`], so the camera keeps
//! gliding after the mouse stops.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use super::core::Camera;
use crate::options::CameraOptions;

/// Keeps `phi` off the poles, where the view matrix degenerates.
const POLE_EPSILON: f32 = 1e-6;
/// Smallest orbit radius regardless of configuration.
const MIN_RADIUS: f32 = 1e-3;
/// Per-notch zoom ratio before `zoom_speed` is applied.
const ZOOM_BASE: f32 = 0.95;

/// Spherical orbit camera controls with inertia. Panning is not supported;
/// the target stays fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    target: Vec3,
    radius: f32,
    theta: f32,
    phi: f32,
    theta_delta: f32,
    phi_delta: f32,
    zoom_scale: f32,
    rotate_speed: f32,
    zoom_speed: f32,
    damping: f32,
    min_distance: f32,
    max_distance: f32,
    home: Vec3,
}

impl OrbitControls {
    /// Controls orbiting `target` from `eye`.
    #[must_use]
    pub fn new(
        eye: Vec3,
        target: Vec3,
        options: &CameraOptions,
        max_distance: f32,
    ) -> Self {
        let min_distance = options.min_distance.max(MIN_RADIUS);
        let mut controls = Self {
            target,
            radius: 1.0,
            theta: 0.0,
            phi: PI / 2.0,
            theta_delta: 0.0,
            phi_delta: 0.0,
            zoom_scale: 1.0,
            rotate_speed: options.rotate_speed,
            zoom_speed: options.zoom_speed,
            damping: options.damping.clamp(0.0, 1.0),
            min_distance,
            max_distance: max_distance.max(min_distance),
            home: eye,
        };
        controls.set_eye(eye);
        controls
    }

    fn set_eye(&mut self, eye: Vec3) {
        let offset = eye - self.target;
        self.radius = offset.length().clamp(self.min_distance, self.max_distance);
        self.theta = offset.x.atan2(offset.z);
        self.phi = if offset.length_squared() > 0.0 {
            (offset.y / offset.length()).clamp(-1.0, 1.0).acos()
        } else {
            PI / 2.0
        };
        self.phi = self.phi.clamp(POLE_EPSILON, PI - POLE_EPSILON);
    }

    /// Queue a rotation from a drag of `delta` pixels in a viewport
    /// `viewport_height` pixels tall. A full-height drag turns a full circle.
    pub fn rotate(&mut self, delta: Vec2, viewport_height: f32) {
        let height = viewport_height.max(1.0);
        self.theta_delta -= TAU * delta.x / height * self.rotate_speed;
        self.phi_delta -= TAU * delta.y / height * self.rotate_speed;
    }

    /// Queue a zoom step. Positive values move the eye toward the target.
    pub fn zoom(&mut self, delta: f32) {
        self.zoom_scale *= ZOOM_BASE.powf(self.zoom_speed * delta);
    }

    /// Advance the damping by one frame.
    pub fn update(&mut self) {
        let (step, decay) = if self.damping > 0.0 {
            (self.damping, 1.0 - self.damping)
        } else {
            (1.0, 0.0)
        };

        self.theta += self.theta_delta * step;
        self.phi = (self.phi + self.phi_delta * step)
            .clamp(POLE_EPSILON, PI - POLE_EPSILON);
        self.radius = (self.radius * self.zoom_scale)
            .clamp(self.min_distance, self.max_distance);

        self.theta_delta *= decay;
        self.phi_delta *= decay;
        self.zoom_scale = 1.0;
    }

    /// Current eye position.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        let sin_phi = self.phi.sin();
        self.target
            + Vec3::new(
                self.radius * sin_phi * self.theta.sin(),
                self.radius * self.phi.cos(),
                self.radius * sin_phi * self.theta.cos(),
            )
    }

    /// Orbit target.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Distance from eye to target.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.radius
    }

    /// Polar angle from +Y in radians.
    #[must_use]
    pub fn polar_angle(&self) -> f32 {
        self.phi
    }

    /// Return to the starting eye position and drop any pending motion.
    pub fn reset(&mut self) {
        self.theta_delta = 0.0;
        self.phi_delta = 0.0;
        self.zoom_scale = 1.0;
        self.set_eye(self.home);
    }

    /// Write the eye and target into `camera`.
    pub fn apply(&self, camera: &mut Camera) {
        camera.eye = self.eye();
        camera.target = self.target;
        camera.up = Vec3::Y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls() -> OrbitControls {
        OrbitControls::new(
            Vec3::new(0.0, 0.0, 200.0),
            Vec3::ZERO,
            &CameraOptions::default(),
            5000.0,
        )
    }

    #[test]
    fn starts_at_eye() {
        let c = controls();
        assert!((c.eye() - Vec3::new(0.0, 0.0, 200.0)).length() < 1e-3);
        assert!((c.distance() - 200.0).abs() < 1e-4);
    }

    #[test]
    fn damped_rotation_converges_to_full_drag() {
        let mut c = controls();
        // A quarter of the viewport height is a quarter turn.
        c.rotate(Vec2::new(-100.0, 0.0), 400.0);

        c.update();
        let first = c.eye();
        assert!(first.x > 0.0 && first.x < 200.0 * 0.1);

        for _ in 0..2000 {
            c.update();
        }
        let eye = c.eye();
        assert!((eye - Vec3::new(200.0, 0.0, 0.0)).length() < 0.05, "{eye}");
    }

    #[test]
    fn motion_continues_after_input_stops() {
        let mut c = controls();
        c.rotate(Vec2::new(50.0, 0.0), 400.0);
        c.update();
        let a = c.eye();
        c.update();
        let b = c.eye();
        assert!((a - b).length() > 0.0);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut c = controls();
        c.zoom(-10_000.0);
        c.update();
        assert_eq!(c.distance(), 5000.0);

        c.zoom(10_000.0);
        c.update();
        assert_eq!(c.distance(), MIN_RADIUS);
    }

    #[test]
    fn zoom_in_moves_closer() {
        let mut c = controls();
        c.zoom(1.0);
        c.update();
        assert!((c.distance() - 190.0).abs() < 1e-3);
    }

    #[test]
    fn polar_angle_stays_off_the_poles() {
        let mut c = controls();
        c.rotate(Vec2::new(0.0, 100_000.0), 400.0);
        for _ in 0..200 {
            c.update();
        }
        assert!(c.polar_angle() > 0.0);
        assert!(c.polar_angle() < PI);
        assert!(c.eye().is_finite());
    }

    #[test]
    fn reset_returns_home() {
        let mut c = controls();
        c.rotate(Vec2::new(120.0, 40.0), 400.0);
        c.zoom(3.0);
        for _ in 0..10 {
            c.update();
        }
        c.reset();
        c.update();
        assert!((c.eye() - Vec3::new(0.0, 0.0, 200.0)).length() < 1e-3);
    }

    #[test]
    fn zero_damping_applies_immediately() {
        let options = CameraOptions {
            damping: 0.0,
            ..CameraOptions::default()
        };
        let mut c = OrbitControls::new(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::ZERO,
            &options,
            100.0,
        );
        c.rotate(Vec2::new(-100.0, 0.0), 400.0);
        c.update();
        assert!((c.eye() - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-4);
        c.update();
        assert!((c.eye() - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-4);
    }
}
