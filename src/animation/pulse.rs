//! Per-frame pulsation of the sphere instances.
//!
//! Every instance owns a phase in `[0, 1)`. Each tick advances it by one of
//! three fixed speeds (chosen by `index % 3`), drops it back to zero once it
//! passes one, and redraws the instance at `cos(phase · 2π) · amplitude +
//! offset` of its base size. Positions, orientations and colors are fixed
//! at construction; only the scale component of the transform changes.

use std::f32::consts::TAU;

use glam::{Mat4, Quat, Vec3};

use crate::{options::PulseOptions, renderer::sphere::SphereInstance};

/// Initial state of one instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceSeed {
    /// World position on the sampled surface (relative to the pivot).
    pub position: Vec3,
    /// Starting phase in `[0, 1)`.
    pub phase: f32,
    /// Linear RGB color.
    pub color: [f32; 3],
}

/// Owns the instance state and the transform buffer uploaded to the GPU.
///
/// The buffer is rewritten in place by [`tick`](Self::tick); the renderer
/// polls [`take_dirty`](Self::take_dirty) to decide whether to re-upload.
pub struct InstanceAnimator {
    positions: Vec<Vec3>,
    orientations: Vec<Quat>,
    phases: Vec<f32>,
    colors: Vec<[f32; 3]>,
    instances: Vec<SphereInstance>,
    params: PulseOptions,
    dirty: bool,
}

impl InstanceAnimator {
    /// Build the animator and an initial transform buffer whose scales
    /// already reflect the seeded phases.
    #[must_use]
    pub fn new(seeds: &[InstanceSeed], params: PulseOptions) -> Self {
        let positions: Vec<Vec3> = seeds.iter().map(|s| s.position).collect();
        let orientations = vec![Quat::IDENTITY; seeds.len()];
        let phases: Vec<f32> = seeds.iter().map(|s| s.phase).collect();
        let colors: Vec<[f32; 3]> = seeds.iter().map(|s| s.color).collect();

        let instances = seeds
            .iter()
            .map(|s| {
                let scale = pulse_scale(s.phase, &params);
                SphereInstance::new(
                    compose(s.position, Quat::IDENTITY, scale),
                    s.color,
                )
            })
            .collect();

        Self {
            positions,
            orientations,
            phases,
            colors,
            instances,
            params,
            dirty: true,
        }
    }

    /// Advance every instance by one frame.
    pub fn tick(&mut self) {
        let speeds = self.params.speeds;
        for (i, phase) in self.phases.iter_mut().enumerate() {
            *phase += speeds[i % 3];
            if *phase > 1.0 {
                *phase = 0.0;
            }

            let scale = pulse_scale(*phase, &self.params);
            self.instances[i].model =
                compose(self.positions[i], self.orientations[i], scale)
                    .to_cols_array_2d();
        }
        self.dirty = true;
    }

    /// Returns whether the transform buffer changed since the last call and
    /// clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Phase step applied to instance `index` each tick.
    #[must_use]
    pub fn speed(&self, index: usize) -> f32 {
        self.params.speeds[index % 3]
    }

    /// Current scale of instance `index`.
    #[must_use]
    pub fn scale(&self, index: usize) -> f32 {
        pulse_scale(self.phases[index], &self.params)
    }

    /// Number of instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Whether there are no instances.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Current phases.
    #[must_use]
    pub fn phases(&self) -> &[f32] {
        &self.phases
    }

    /// Fixed instance positions.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Fixed instance colors.
    #[must_use]
    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    /// The transform buffer, one record per instance.
    #[must_use]
    pub fn instances(&self) -> &[SphereInstance] {
        &self.instances
    }

    /// Overwrite the phase of one instance without touching its transform
    /// until the next tick.
    pub fn set_phase(&mut self, index: usize, phase: f32) {
        self.phases[index] = phase;
    }
}

/// Scale for a given phase: `cos(phase · 2π) · amplitude + offset`.
#[inline]
#[must_use]
pub fn pulse_scale(phase: f32, params: &PulseOptions) -> f32 {
    (phase * TAU).cos() * params.amplitude + params.offset
}

fn compose(position: Vec3, orientation: Quat, scale: f32) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::splat(scale),
        orientation,
        position,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeds(phases: &[f32]) -> Vec<InstanceSeed> {
        phases
            .iter()
            .enumerate()
            .map(|(i, &phase)| InstanceSeed {
                position: Vec3::new(i as f32, 2.0 * i as f32, -1.0),
                phase,
                color: [0.1 * i as f32, 0.5, 0.9],
            })
            .collect()
    }

    fn model_scale(instance: &SphereInstance) -> f32 {
        Vec3::from_slice(&instance.model[0][..3]).length()
    }

    fn model_translation(instance: &SphereInstance) -> Vec3 {
        Vec3::from_slice(&instance.model[3][..3])
    }

    #[test]
    fn speed_depends_on_index_mod_three() {
        let animator = InstanceAnimator::new(
            &seeds(&[0.0; 7]),
            PulseOptions::default(),
        );
        assert_eq!(animator.speed(0), 0.0052);
        assert_eq!(animator.speed(1), 0.0085);
        assert_eq!(animator.speed(2), 0.0078);
        assert_eq!(animator.speed(3), 0.0052);
        assert_eq!(animator.speed(6), 0.0052);
    }

    #[test]
    fn wraps_to_zero_past_one() {
        let mut animator =
            InstanceAnimator::new(&seeds(&[0.998]), PulseOptions::default());
        animator.tick();
        assert_eq!(animator.phases()[0], 0.0);
        assert!((animator.scale(0) - 1.03).abs() < 1e-6);
        assert!((model_scale(&animator.instances()[0]) - 1.03).abs() < 1e-5);
    }

    #[test]
    fn single_step_from_zero() {
        let mut animator =
            InstanceAnimator::new(&seeds(&[0.5, 0.0]), PulseOptions::default());
        animator.tick();
        assert!((animator.phases()[1] - 0.0085).abs() < 1e-7);
        let expected = (0.0085_f32 * TAU).cos() / 4.0 + 0.78;
        assert!((animator.scale(1) - expected).abs() < 1e-6);
        assert!((animator.scale(1) - 1.029_64).abs() < 1e-4);
    }

    #[test]
    fn phase_follows_linear_recurrence_until_wrap() {
        let start = [0.0, 0.1, 0.2, 0.3, 0.05, 0.15];
        let mut animator =
            InstanceAnimator::new(&seeds(&start), PulseOptions::default());
        let ticks = 50;
        for _ in 0..ticks {
            animator.tick();
        }
        for (i, &p0) in start.iter().enumerate() {
            let expected = (p0 + ticks as f32 * animator.speed(i)).fract();
            assert!(
                (animator.phases()[i] - expected).abs() < 1e-4,
                "instance {i}: {} vs {expected}",
                animator.phases()[i]
            );
        }
    }

    #[test]
    fn scale_stays_in_range_over_many_cycles() {
        let start: Vec<f32> = (0..30).map(|i| i as f32 / 30.0).collect();
        let mut animator =
            InstanceAnimator::new(&seeds(&start), PulseOptions::default());
        for _ in 0..1000 {
            animator.tick();
            for i in 0..animator.len() {
                let phase = animator.phases()[i];
                assert!((0.0..=1.0).contains(&phase));
                let s = animator.scale(i);
                assert!(s >= 0.53 - 1e-6 && s <= 1.03 + 1e-6, "scale {s}");
            }
        }
    }

    #[test]
    fn position_and_color_never_change() {
        let initial = seeds(&[0.2, 0.4, 0.6, 0.8]);
        let mut animator =
            InstanceAnimator::new(&initial, PulseOptions::default());
        for _ in 0..500 {
            animator.tick();
        }
        for (i, seed) in initial.iter().enumerate() {
            assert_eq!(animator.positions()[i], seed.position);
            assert_eq!(animator.colors()[i], seed.color);
            assert_eq!(animator.instances()[i].color, seed.color);
            let t = model_translation(&animator.instances()[i]);
            assert!((t - seed.position).length() < 1e-5);
        }
    }

    #[test]
    fn zero_ticks_is_identity() {
        let initial = seeds(&[0.25, 0.5, 0.75]);
        let animator =
            InstanceAnimator::new(&initial, PulseOptions::default());
        let again = InstanceAnimator::new(&initial, PulseOptions::default());

        assert_eq!(animator.phases(), &[0.25, 0.5, 0.75]);
        assert_eq!(animator.instances(), again.instances());
        let s = model_scale(&animator.instances()[1]);
        assert!((s - pulse_scale(0.5, &PulseOptions::default())).abs() < 1e-5);
    }

    #[test]
    fn dirty_flag_is_taken_once() {
        let mut animator =
            InstanceAnimator::new(&seeds(&[0.0, 0.3]), PulseOptions::default());
        assert!(animator.take_dirty());
        assert!(!animator.take_dirty());
        animator.tick();
        assert!(animator.take_dirty());
        assert!(!animator.take_dirty());
    }

    #[test]
    fn empty_animator_ticks_quietly() {
        let mut animator = InstanceAnimator::new(&[], PulseOptions::default());
        animator.tick();
        assert!(animator.is_empty());
        assert!(animator.instances().is_empty());
    }

    #[test]
    fn set_phase_takes_effect_on_next_tick() {
        let mut animator =
            InstanceAnimator::new(&seeds(&[0.0]), PulseOptions::default());
        animator.set_phase(0, 0.998);
        animator.tick();
        assert_eq!(animator.phases()[0], 0.0);
    }
}
