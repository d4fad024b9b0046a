//! Unlit debug overlay: the view-camera frustum lines and the solid marker
//! box at the view camera position.

use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::error::SceneError;
use crate::gpu::dynamic_buffer::TypedBuffer;
use crate::gpu::pipeline_helpers::{color_target, depth_stencil_state};
use crate::gpu::shader_composer::{ShaderComposer, OVERLAY_SHADER};

/// A colored world-space vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OverlayVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Linear RGB color.
    pub color: [f32; 3],
}

impl OverlayVertex {
    /// Vertex at `position` with the given color.
    #[must_use]
    pub fn new(position: Vec3, color: [f32; 3]) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }
}

const ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 12,
        shader_location: 1,
    },
];

/// Line and triangle pipelines sharing the overlay shader.
pub struct OverlayRenderer {
    line_pipeline: wgpu::RenderPipeline,
    triangle_pipeline: wgpu::RenderPipeline,
    marker_buffer: wgpu::Buffer,
    marker_count: u32,
    line_buffer: TypedBuffer<OverlayVertex>,
}

impl OverlayRenderer {
    /// Build both pipelines and upload the static marker geometry.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Shader`] if the overlay shader fails to compose.
    pub fn new(
        device: &wgpu::Device,
        composer: &mut ShaderComposer,
        format: wgpu::TextureFormat,
        camera_layout: &wgpu::BindGroupLayout,
        marker: &[OverlayVertex],
    ) -> Result<Self, SceneError> {
        let shader = composer.compose(
            device,
            "Overlay Shader",
            OVERLAY_SHADER,
            "raster/overlay.wgsl",
        )?;
        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Overlay Pipeline Layout"),
                bind_group_layouts: &[camera_layout],
                push_constant_ranges: &[],
            });

        let line_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            &shader,
            format,
            wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            "Overlay Line Pipeline",
        );
        let triangle_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            &shader,
            format,
            wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            "Overlay Triangle Pipeline",
        );

        let marker_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Marker Vertex Buffer"),
                contents: bytemuck::cast_slice(marker),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let line_buffer = TypedBuffer::new_with_data(
            device,
            "Camera Helper Buffer",
            &[],
            wgpu::BufferUsages::VERTEX,
        );

        Ok(Self {
            line_pipeline,
            triangle_pipeline,
            marker_buffer,
            marker_count: marker.len() as u32,
            line_buffer,
        })
    }

    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        format: wgpu::TextureFormat,
        primitive: wgpu::PrimitiveState,
        label: &str,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: size_of::<OverlayVertex>()
                        as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &ATTRIBUTES,
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &color_target(format),
                compilation_options: Default::default(),
            }),
            primitive,
            depth_stencil: Some(depth_stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    /// Replace the camera helper line list.
    pub fn set_helper_lines(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        lines: &[OverlayVertex],
    ) {
        self.line_buffer.write(device, queue, lines);
    }

    /// Record the marker box and helper lines.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
    ) {
        render_pass.set_bind_group(0, camera_bind_group, &[]);

        if self.marker_count > 0 {
            render_pass.set_pipeline(&self.triangle_pipeline);
            render_pass.set_vertex_buffer(0, self.marker_buffer.slice(..));
            render_pass.draw(0..self.marker_count, 0..1);
        }

        if !self.line_buffer.is_empty() {
            render_pass.set_pipeline(&self.line_pipeline);
            render_pass.set_vertex_buffer(0, self.line_buffer.slice());
            render_pass.draw(0..self.line_buffer.count() as u32, 0..1);
        }
    }
}
