//! GPU resource management: device and surface setup, growable buffers,
//! shader composition, and textures.

/// Growable typed GPU buffers.
pub mod dynamic_buffer;
/// Bind group layout entries and pipeline state shared by the renderers.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
pub mod texture;
