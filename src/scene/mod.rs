//! The scene: a torus sampled once for sphere positions, the animated
//! sphere instances, and the static marker geometry.
//!
//! The torus itself is never drawn. It only provides the surface the
//! instances are scattered over.

pub mod marker;
pub mod mesh;
pub mod sampler;
pub mod sphere_mesh;
pub mod torus;

use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use self::marker::marker_box;
use self::mesh::MeshData;
use self::sampler::SurfaceSampler;
use self::sphere_mesh::uv_sphere;
use self::torus::TorusGeometry;
use crate::animation::{InstanceAnimator, InstanceSeed};
use crate::error::SceneError;
use crate::options::Options;
use crate::renderer::overlay::OverlayVertex;
use crate::util::color::{hex_to_linear, hsl_to_rgb, srgb_to_linear_rgb};

/// Saturation and lightness of the random instance hues.
const INSTANCE_SATURATION: f32 = 1.0;
const INSTANCE_LIGHTNESS: f32 = 0.6;
const MARKER_COLOR: u32 = 0xff0000;

/// Everything the engine draws, minus the GPU resources.
pub struct Scene {
    torus: TorusGeometry,
    animator: InstanceAnimator,
    sphere_mesh: MeshData,
    marker: Vec<OverlayVertex>,
    /// Seconds of unpaused animation.
    clock: f32,
}

impl Scene {
    /// Build the scene, seeding the generator from `options.scene.seed`
    /// when set and from the OS otherwise.
    ///
    /// # Errors
    ///
    /// See [`build_with_rng`](Self::build_with_rng).
    pub fn build(options: &Options) -> Result<Self, SceneError> {
        match options.scene.seed {
            Some(seed) => {
                log::debug!("sampling with seed {seed}");
                Self::build_with_rng(options, &mut StdRng::seed_from_u64(seed))
            }
            None => Self::build_with_rng(options, &mut StdRng::from_os_rng()),
        }
    }

    /// Build the scene drawing all randomness from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::OptionsParse`] if the pulse parameters are
    /// invalid and [`SceneError::Geometry`] if the torus parameters are
    /// degenerate.
    pub fn build_with_rng<R: Rng + ?Sized>(
        options: &Options,
        rng: &mut R,
    ) -> Result<Self, SceneError> {
        options.validate()?;
        let s = &options.scene;
        let torus = TorusGeometry::new(
            s.radius,
            s.tube,
            s.radial_segments,
            s.tubular_segments,
        )?;
        let torus_mesh = torus.build();
        let sampler = SurfaceSampler::new(&torus_mesh)?;

        let seeds: Vec<InstanceSeed> = (0..s.sampler_count)
            .map(|_| {
                let (position, _normal) = sampler.sample(rng);
                let phase = rng.random::<f32>();
                let hue = rng.random::<f32>();
                InstanceSeed {
                    position,
                    phase,
                    color: srgb_to_linear_rgb(hsl_to_rgb(
                        hue,
                        INSTANCE_SATURATION,
                        INSTANCE_LIGHTNESS,
                    )),
                }
            })
            .collect();
        log::info!(
            "sampled {} spheres over a torus of area {:.1}",
            seeds.len(),
            sampler.total_area()
        );

        let animator = InstanceAnimator::new(&seeds, options.pulse.clone());
        let sphere_mesh = uv_sphere(
            s.sphere_radius,
            s.sphere_width_segments,
            s.sphere_height_segments,
        );
        let marker = marker_box(
            Vec3::new(0.0, s.radius, 0.0),
            Vec3::new(-1.0, s.radius, 0.0),
            3.0 * s.tube,
            hex_to_linear(MARKER_COLOR),
        );

        Ok(Self {
            torus,
            animator,
            sphere_mesh,
            marker,
            clock: 0.0,
        })
    }

    /// Advance the animation clock by `dt` seconds and tick the pulsation
    /// once.
    pub fn advance(&mut self, dt: f32) {
        self.clock += dt.max(0.0);
        self.animator.tick();
    }

    /// Rotation of the instance set about Z after the current clock, given
    /// the seconds it takes to turn one radian.
    #[must_use]
    pub fn pivot(&self, rotation_period: f32) -> Mat4 {
        if rotation_period > 0.0 {
            Mat4::from_rotation_z(-self.clock / rotation_period)
        } else {
            Mat4::IDENTITY
        }
    }

    /// Seconds of animation so far.
    #[must_use]
    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// The sampled torus.
    #[must_use]
    pub fn torus(&self) -> &TorusGeometry {
        &self.torus
    }

    /// Instance state and transform buffer.
    #[must_use]
    pub fn animator(&self) -> &InstanceAnimator {
        &self.animator
    }

    /// Mutable access for uploading (takes the dirty flag).
    pub fn animator_mut(&mut self) -> &mut InstanceAnimator {
        &mut self.animator
    }

    /// Shared sphere mesh drawn for every instance.
    #[must_use]
    pub fn sphere_mesh(&self) -> &MeshData {
        &self.sphere_mesh
    }

    /// Marker box triangles at the view camera.
    #[must_use]
    pub fn marker(&self) -> &[OverlayVertex] {
        &self.marker
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_options(seed: u64) -> Options {
        let mut options = Options::default();
        options.scene.sampler_count = 300;
        options.scene.seed = Some(seed);
        options
    }

    #[test]
    fn builds_requested_instance_count() {
        let scene = Scene::build(&small_options(7)).unwrap();
        assert_eq!(scene.animator().len(), 300);
        assert_eq!(scene.marker().len(), 36);
        assert!(!scene.sphere_mesh().indices.is_empty());
    }

    #[test]
    fn same_seed_same_scene() {
        let a = Scene::build(&small_options(42)).unwrap();
        let b = Scene::build(&small_options(42)).unwrap();
        assert_eq!(a.animator().instances(), b.animator().instances());

        let c = Scene::build(&small_options(43)).unwrap();
        assert_ne!(a.animator().positions(), c.animator().positions());
    }

    #[test]
    fn instances_lie_on_the_torus_with_fresh_phases() {
        let scene = Scene::build(&small_options(3)).unwrap();
        let torus = scene.torus();
        for (&p, &phase) in scene
            .animator()
            .positions()
            .iter()
            .zip(scene.animator().phases())
        {
            let core = torus.core_point(p.y.atan2(p.x));
            let d = p.distance(core);
            assert!((1.9..=2.05).contains(&d), "{d}");
            assert!((0.0..1.0).contains(&phase));
        }
    }

    #[test]
    fn colors_are_bright_and_saturated() {
        let scene = Scene::build(&small_options(5)).unwrap();
        for color in scene.animator().colors() {
            let max = color.iter().copied().fold(f32::MIN, f32::max);
            // HSL lightness 0.6 at full saturation keeps one channel at 1.
            assert!((max - 1.0).abs() < 1e-4, "{color:?}");
        }
    }

    #[test]
    fn pivot_turns_one_radian_per_period() {
        let mut scene = Scene::build(&small_options(1)).unwrap();
        scene.advance(15.0);
        scene.advance(15.0);
        let x = scene.pivot(30.0).transform_vector3(Vec3::X);
        let expected = Vec3::new(1.0_f32.cos(), -1.0_f32.sin(), 0.0);
        assert!((x - expected).length() < 1e-5);
        assert_eq!(scene.pivot(0.0), Mat4::IDENTITY);
    }

    #[test]
    fn zero_samples_is_an_empty_scene() {
        let mut options = small_options(1);
        options.scene.sampler_count = 0;
        let mut scene = Scene::build(&options).unwrap();
        assert!(scene.animator().is_empty());
        scene.advance(0.016);
    }

    #[test]
    fn invalid_pulse_is_rejected_before_sampling() {
        let mut options = small_options(1);
        options.pulse.speeds = [-0.01, 0.0085, 0.0078];
        assert!(matches!(
            Scene::build(&options),
            Err(SceneError::OptionsParse(_))
        ));

        let mut options = small_options(1);
        options.pulse.amplitude = 2.0;
        assert!(matches!(
            Scene::build(&options),
            Err(SceneError::OptionsParse(_))
        ));
    }

    #[test]
    fn phases_and_scales_stay_in_range_over_many_frames() {
        let options = small_options(9);
        let (lo, hi) = (options.pulse.min_scale(), options.pulse.max_scale());
        let mut scene = Scene::build(&options).unwrap();
        for _ in 0..500 {
            scene.advance(1.0 / 60.0);
        }
        let animator = scene.animator();
        for (i, &phase) in animator.phases().iter().enumerate() {
            assert!((0.0..=1.0).contains(&phase), "{phase}");
            let s = animator.scale(i);
            assert!((lo - 1e-5..=hi + 1e-5).contains(&s), "{s}");
        }
    }

    #[test]
    fn degenerate_torus_is_rejected() {
        let mut options = small_options(1);
        options.scene.tube = 0.0;
        assert!(matches!(
            Scene::build(&options),
            Err(SceneError::Geometry(_))
        ));
    }
}
