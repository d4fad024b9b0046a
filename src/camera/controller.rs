use glam::Vec3;
use wgpu::util::DeviceExt;

use super::core::{Camera, CameraUniform};
use super::orbit::OrbitControls;
use crate::gpu::pipeline_helpers::uniform_buffer;
use crate::options::{CameraOptions, SceneOptions};

/// Which camera the scene is rendered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveCamera {
    /// Fixed camera inside the torus tube looking along it.
    View,
    /// User-driven orbit camera looking at the origin.
    Orbit,
}

/// Owns both cameras, the orbit controls, and the camera uniform on the
/// GPU.
pub struct CameraController {
    /// Fixed tube-interior camera.
    pub view_camera: Camera,
    /// Free orbit camera.
    pub orbit_camera: Camera,
    /// Controls driving `orbit_camera`.
    pub orbit: OrbitControls,
    active: ActiveCamera,

    /// CPU copy of the uniform.
    pub uniform: CameraUniform,
    /// GPU uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Layout shared by every pipeline at group 0.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group over `buffer`.
    pub bind_group: wgpu::BindGroup,
}

impl CameraController {
    /// Build both cameras for a torus of `scene.radius` and allocate the
    /// uniform.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        aspect: f32,
        scene: &SceneOptions,
        options: &CameraOptions,
        active: ActiveCamera,
    ) -> Self {
        let (view_camera, orbit_camera) = build_cameras(aspect, scene, options);
        let orbit = OrbitControls::new(
            orbit_camera.eye,
            orbit_camera.target,
            options,
            orbit_camera.zfar / 2.0,
        );

        let uniform = CameraUniform::new();
        let buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[uniform_buffer(0)],
            });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("Camera Bind Group"),
        });

        Self {
            view_camera,
            orbit_camera,
            orbit,
            active,
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Switch the rendered camera.
    pub fn set_active(&mut self, active: ActiveCamera) {
        self.active = active;
    }

    /// The active camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        match self.active {
            ActiveCamera::View => &self.view_camera,
            ActiveCamera::Orbit => &self.orbit_camera,
        }
    }

    /// Update both aspect ratios.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let aspect = width as f32 / height as f32;
        self.view_camera.aspect = aspect;
        self.orbit_camera.aspect = aspect;
    }

    /// Advance orbit damping and sync the orbit camera.
    pub fn update(&mut self) {
        self.orbit.update();
        self.orbit.apply(&mut self.orbit_camera);
    }

    /// Put the orbit camera back at its starting position.
    pub fn reset(&mut self) {
        self.orbit.reset();
        self.orbit.apply(&mut self.orbit_camera);
    }

    /// Upload the active camera and fog parameters.
    pub fn update_gpu(
        &mut self,
        queue: &wgpu::Queue,
        fog_density: f32,
        fog_color: [f32; 3],
    ) {
        let camera = *self.camera();
        self.uniform.update_view_proj(&camera);
        self.uniform.set_fog(fog_density, fog_color);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

/// View and orbit cameras for a torus of the configured radius.
///
/// The view camera sits on the torus core circle at `(0, R, 0)` looking
/// along the tube toward `-X`, with its far plane at `R`. The orbit camera
/// starts at `(0, 0, 4R)` looking at the origin.
#[must_use]
pub fn build_cameras(
    aspect: f32,
    scene: &SceneOptions,
    options: &CameraOptions,
) -> (Camera, Camera) {
    let r = scene.radius;
    let view_camera = Camera {
        eye: Vec3::new(0.0, r, 0.0),
        target: Vec3::new(-1.0, r, 0.0),
        up: Vec3::Y,
        aspect,
        fovy: options.view_fovy,
        znear: options.view_znear,
        zfar: r,
    };
    let orbit_camera = Camera {
        eye: Vec3::new(0.0, 0.0, 4.0 * r),
        target: Vec3::ZERO,
        up: Vec3::Y,
        aspect,
        fovy: options.orbit_fovy,
        znear: options.orbit_znear,
        zfar: options.orbit_zfar,
    };
    (view_camera, orbit_camera)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cameras() {
        let (view, orbit) =
            build_cameras(1.5, &SceneOptions::default(), &CameraOptions::default());
        assert_eq!(view.eye, Vec3::new(0.0, 50.0, 0.0));
        assert_eq!(view.target, Vec3::new(-1.0, 50.0, 0.0));
        assert_eq!((view.fovy, view.znear, view.zfar), (50.0, 0.01, 50.0));

        assert_eq!(orbit.eye, Vec3::new(0.0, 0.0, 200.0));
        assert_eq!(orbit.target, Vec3::ZERO);
        assert_eq!((orbit.fovy, orbit.znear, orbit.zfar), (35.0, 0.1, 10_000.0));
    }
}
