//! Instanced mirror-sphere pass.
//!
//! One shared UV-sphere mesh drawn once per instance. Each instance supplies
//! its model matrix and tint through a per-instance vertex buffer; a single
//! pivot uniform carries the scene rotation applied to every instance.

use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::error::SceneError;
use crate::gpu::dynamic_buffer::TypedBuffer;
use crate::gpu::pipeline_helpers::{
    color_target, depth_stencil_state, filtering_sampler, texture_2d,
    uniform_buffer,
};
use crate::gpu::shader_composer::{ShaderComposer, SPHERE_SHADER};
use crate::gpu::texture::EnvironmentMap;
use crate::scene::mesh::{MeshData, MeshVertex};

/// Per-instance data for sphere rendering.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphereInstance {
    /// Column-major model matrix (scale, rotation, translation).
    pub model: [[f32; 4]; 4],
    /// Linear RGB tint.
    pub color: [f32; 3],
    _pad: f32,
}

impl SphereInstance {
    /// Instance with the given transform and tint.
    #[must_use]
    pub fn new(model: Mat4, color: [f32; 3]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color,
            _pad: 0.0,
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct PivotUniform {
    model: [[f32; 4]; 4],
}

const MESH_ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0, // position
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 12,
        shader_location: 1, // normal
    },
];

// Model matrix as four vec4 columns, then the tint.
const INSTANCE_ATTRIBUTES: [wgpu::VertexAttribute; 5] = [
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x4,
        offset: 0,
        shader_location: 2,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x4,
        offset: 16,
        shader_location: 3,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x4,
        offset: 32,
        shader_location: 4,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x4,
        offset: 48,
        shader_location: 5,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 64,
        shader_location: 6,
    },
];

/// Draws every sphere instance in one indexed, instanced call.
pub struct SphereRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    instance_buffer: TypedBuffer<SphereInstance>,
    pivot_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    _environment: EnvironmentMap,
}

impl SphereRenderer {
    /// Upload the sphere mesh and initial instances and build the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Shader`] if the sphere shader fails to compose.
    pub fn new(
        device: &wgpu::Device,
        composer: &mut ShaderComposer,
        format: wgpu::TextureFormat,
        camera_layout: &wgpu::BindGroupLayout,
        mesh: &MeshData,
        instances: &[SphereInstance],
        environment: EnvironmentMap,
    ) -> Result<Self, SceneError> {
        let vertices = mesh.vertices();
        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Sphere Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Sphere Index Buffer"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        let instance_buffer = TypedBuffer::new_with_data(
            device,
            "Sphere Instance Buffer",
            instances,
            wgpu::BufferUsages::VERTEX,
        );
        let pivot_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Sphere Pivot Buffer"),
                contents: bytemuck::bytes_of(&PivotUniform {
                    model: Mat4::IDENTITY.to_cols_array_2d(),
                }),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Sphere Bind Group Layout"),
                entries: &[
                    uniform_buffer(0),
                    texture_2d(1),
                    filtering_sampler(2),
                ],
            });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Sphere Bind Group"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: pivot_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(
                        &environment.view,
                    ),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(
                        &environment.sampler,
                    ),
                },
            ],
        });

        let shader = composer.compose(
            device,
            "Sphere Shader",
            SPHERE_SHADER,
            "raster/sphere.wgsl",
        )?;
        let pipeline = Self::create_pipeline(
            device,
            &shader,
            format,
            &[camera_layout, &layout],
        );

        Ok(Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            instance_buffer,
            pivot_buffer,
            bind_group,
            _environment: environment,
        })
    }

    fn create_pipeline(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        format: wgpu::TextureFormat,
        bind_group_layouts: &[&wgpu::BindGroupLayout],
    ) -> wgpu::RenderPipeline {
        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Sphere Pipeline Layout"),
                bind_group_layouts,
                push_constant_ranges: &[],
            });

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &MESH_ATTRIBUTES,
        };
        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: size_of::<SphereInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &INSTANCE_ATTRIBUTES,
        };

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sphere Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout, instance_layout],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &color_target(format),
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(depth_stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    /// Replace the instance data on the GPU.
    pub fn upload_instances(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        instances: &[SphereInstance],
    ) {
        self.instance_buffer.write(device, queue, instances);
    }

    /// Set the transform applied on top of every instance.
    pub fn set_pivot(&self, queue: &wgpu::Queue, pivot: Mat4) {
        queue.write_buffer(
            &self.pivot_buffer,
            0,
            bytemuck::bytes_of(&PivotUniform {
                model: pivot.to_cols_array_2d(),
            }),
        );
    }

    /// Instances drawn per frame.
    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.instance_buffer.count()
    }

    /// Record the instanced draw.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
    ) {
        if self.instance_buffer.is_empty() {
            return;
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instance_buffer.slice());
        render_pass.set_index_buffer(
            self.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(
            0..self.index_count,
            0,
            0..self.instance_buffer.count() as u32,
        );
    }
}

#[cfg(test)]
mod tests {
    use glam::{Quat, Vec3};

    use super::*;

    #[test]
    fn instance_layout_matches_shader() {
        assert_eq!(size_of::<SphereInstance>(), 80);
        assert_eq!(size_of::<MeshVertex>(), 24);
        assert_eq!(INSTANCE_ATTRIBUTES[4].offset, 64);
    }

    #[test]
    fn new_stores_column_major_model() {
        let model = Mat4::from_scale_rotation_translation(
            Vec3::splat(0.5),
            Quat::IDENTITY,
            Vec3::new(1.0, 2.0, 3.0),
        );
        let instance = SphereInstance::new(model, [0.2, 0.4, 0.6]);
        assert_eq!(instance.model[3][..3], [1.0, 2.0, 3.0]);
        assert_eq!(instance.model[0][0], 0.5);
        assert_eq!(instance.color, [0.2, 0.4, 0.6]);
    }
}
