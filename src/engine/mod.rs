//! The frame engine: owns the GPU context, the scene, both cameras and the
//! renderers, and turns one `update` + `render` pair into one frame.

pub mod command;
mod input;

use std::path::Path;

use web_time::Instant;

use crate::camera::controller::{ActiveCamera, CameraController};
use crate::camera::helper::camera_helper_lines;
use crate::error::SceneError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::texture::{DepthTexture, EnvironmentImage, EnvironmentMap};
use crate::input::InputProcessor;
use crate::options::Options;
use crate::renderer::overlay::OverlayRenderer;
use crate::renderer::sphere::SphereRenderer;
use crate::scene::Scene;
use crate::util::color::{clear_color, srgb_to_linear_rgb};
use crate::util::frame_timing::FrameTiming;

/// Frames between FPS log lines.
const FPS_LOG_INTERVAL: u64 = 600;

/// Renders the pulsating sphere scene into a window surface.
///
/// # Frame loop
///
/// Each frame, call [`update`](Self::update) with the elapsed seconds and
/// then [`render`](Self::render) to draw and present. Call
/// [`resize`](Self::resize) when the window size changes. Pointer input is
/// forwarded via [`handle_input`](Self::handle_input) and key presses via
/// [`handle_key`](Self::handle_key).
pub struct SceneEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,
    scene: Scene,
    camera: CameraController,
    spheres: SphereRenderer,
    overlay: OverlayRenderer,
    depth: DepthTexture,
    input: InputProcessor,
    options: Options,
    paused: bool,
    frame_timing: FrameTiming,
}

impl SceneEngine {
    /// Initialize the GPU, sample the scene, and build every pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError`] if GPU initialization, scene construction, or
    /// shader composition fails. A missing or unreadable environment map is
    /// not an error; a procedural one is used instead.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, SceneError> {
        let context = RenderContext::new(window, size).await?;
        let scene = Scene::build(&options)?;
        let mut composer = ShaderComposer::new()?;

        let active = if options.display.animation_view {
            ActiveCamera::View
        } else {
            ActiveCamera::Orbit
        };
        let camera = CameraController::new(
            &context.device,
            context.aspect(),
            &options.scene,
            &options.camera,
            active,
        );

        let env_image = EnvironmentImage::load_or_procedural(
            options.scene.environment_map.as_deref().map(Path::new),
            context.max_texture_dimension(),
        );
        let environment =
            EnvironmentMap::new(&context.device, &context.queue, &env_image);

        let spheres = SphereRenderer::new(
            &context.device,
            &mut composer,
            context.format(),
            &camera.layout,
            scene.sphere_mesh(),
            scene.animator().instances(),
            environment,
        )?;
        let overlay = OverlayRenderer::new(
            &context.device,
            &mut composer,
            context.format(),
            &camera.layout,
            scene.marker(),
        )?;

        let (width, height) = context.size();
        let depth = DepthTexture::new(&context.device, width, height);
        let frame_timing = FrameTiming::new(options.display.target_fps);

        log::info!(
            "scene ready: {} spheres, {} camera",
            scene.animator().len(),
            if options.display.animation_view { "view" } else { "orbit" }
        );

        Ok(Self {
            context,
            scene,
            camera,
            spheres,
            overlay,
            depth,
            input: InputProcessor::new(),
            options,
            paused: false,
            frame_timing,
        })
    }

    /// Current options, including runtime toggles.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The scene being drawn.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Whether animation is frozen.
    #[must_use]
    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Whether the frame budget allows rendering now.
    #[must_use]
    pub fn should_render(&self) -> bool {
        self.frame_timing.should_render()
    }

    /// When the next frame is due under the FPS cap, or `None` when
    /// uncapped.
    #[must_use]
    pub fn next_frame_at(&self) -> Option<Instant> {
        self.frame_timing.next_frame_at()
    }

    /// Resize the surface, depth buffer, and camera aspect ratios.
    pub fn resize(&mut self, width: u32, height: u32) {
        if !self.context.resize(width, height) {
            return;
        }
        self.depth = DepthTexture::new(&self.context.device, width, height);
        self.camera.resize(width, height);
    }

    /// Reconfigure the surface at its current size after it was lost.
    pub fn reconfigure(&mut self) {
        self.context.reconfigure();
    }

    /// Advance orbit damping and, unless paused, the scene by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.camera.update();
        if !self.paused {
            self.scene.advance(dt);
        }
    }

    /// Upload changed state and draw one frame to the surface.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the next swapchain texture cannot
    /// be acquired.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let display = &self.options.display;
        let show_helper = display.camera_helper;
        let background = display.background;
        let fog_density = display.effective_fog_density();
        let rotation_period = display.rotation_period;

        if self.scene.animator_mut().take_dirty() {
            self.spheres.upload_instances(
                &self.context.device,
                &self.context.queue,
                self.scene.animator().instances(),
            );
        }
        self.spheres
            .set_pivot(&self.context.queue, self.scene.pivot(rotation_period));
        self.camera.update_gpu(
            &self.context.queue,
            fog_density,
            srgb_to_linear_rgb(background),
        );
        if show_helper {
            self.overlay.set_helper_lines(
                &self.context.device,
                &self.context.queue,
                &camera_helper_lines(&self.camera.view_camera),
            );
        }

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();
        {
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color(background)),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    },
                ),
                ..Default::default()
            });

            self.spheres.draw(&mut rp, &self.camera.bind_group);
            if show_helper {
                self.overlay.draw(&mut rp, &self.camera.bind_group);
            }
        }
        self.context.submit(encoder);
        frame.present();

        self.frame_timing.end_frame();
        if self.frame_timing.frames() % FPS_LOG_INTERVAL == 0 {
            log::debug!(
                "{:.1} fps, {} instances",
                self.frame_timing.fps(),
                self.spheres.instance_count()
            );
        }
        Ok(())
    }
}
