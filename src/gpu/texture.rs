//! Depth attachment and the equirectangular environment map.

use std::f32::consts::PI;
use std::path::Path;

use image::imageops::FilterType;
use wgpu::util::DeviceExt;

use crate::error::SceneError;

/// Depth format shared by every pipeline.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Size of the generated fallback environment.
const PROCEDURAL_SIZE: (u32, u32) = (512, 256);

/// Depth attachment sized to the surface.
pub struct DepthTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl DepthTexture {
    /// Create a depth texture of the given size.
    #[must_use]
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// RGBA8 sRGB pixels of an equirectangular panorama, row 0 at the zenith.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentImage {
    /// Tightly packed RGBA pixels.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl EnvironmentImage {
    /// Decode an image file, downscaling it to fit within `max_dimension`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Texture`] if the file cannot be read or decoded.
    pub fn decode(
        path: &Path,
        max_dimension: u32,
    ) -> Result<Self, SceneError> {
        let mut img = image::open(path).map_err(|e| {
            SceneError::Texture(format!(
                "failed to load environment map {}: {e}",
                path.display()
            ))
        })?;
        if img.width() > max_dimension || img.height() > max_dimension {
            log::debug!(
                "downscaling environment map {}x{} to fit {max_dimension}",
                img.width(),
                img.height()
            );
            img = img.resize(max_dimension, max_dimension, FilterType::Triangle);
        }

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::info!("loaded environment map {width}x{height} from {}", path.display());
        Ok(Self {
            data: rgba.into_raw(),
            width,
            height,
        })
    }

    /// Sky-to-ground gradient with soft vertical bands so mirror
    /// reflections still read as curved surfaces.
    #[must_use]
    pub fn procedural(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let zenith = [0.55_f32, 0.72, 1.0];
        let horizon = [1.0_f32, 0.93, 0.95];
        let ground = [0.22_f32, 0.18, 0.2];

        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            // +1 at the zenith, -1 at the nadir.
            let elevation = 1.0 - 2.0 * (y as f32 + 0.5) / height as f32;
            let (from, to, t) = if elevation >= 0.0 {
                (horizon, zenith, elevation.sqrt())
            } else {
                (horizon, ground, (-elevation).sqrt())
            };
            for x in 0..width {
                let longitude = (x as f32 + 0.5) / width as f32 * 2.0 * PI;
                let band = 0.88 + 0.12 * (longitude * 8.0).cos();
                for c in 0..3 {
                    let v = (from[c] + (to[c] - from[c]) * t) * band;
                    data.push((v.clamp(0.0, 1.0) * 255.0).round() as u8);
                }
                data.push(255);
            }
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Decode `path` when given, falling back to the procedural gradient
    /// with a warning when it is absent or unreadable.
    #[must_use]
    pub fn load_or_procedural(path: Option<&Path>, max_dimension: u32) -> Self {
        let fallback = || {
            Self::procedural(
                PROCEDURAL_SIZE.0.min(max_dimension),
                PROCEDURAL_SIZE.1.min(max_dimension),
            )
        };
        match path {
            Some(path) => Self::decode(path, max_dimension).unwrap_or_else(|e| {
                log::warn!("{e}; using procedural environment");
                fallback()
            }),
            None => fallback(),
        }
    }
}

/// The environment panorama on the GPU with its sampler.
pub struct EnvironmentMap {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
    /// Wraps in longitude, clamps in latitude.
    pub sampler: wgpu::Sampler,
}

impl EnvironmentMap {
    /// Upload an environment image.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &EnvironmentImage,
    ) -> Self {
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("Environment Map"),
                size: wgpu::Extent3d {
                    width: image.width,
                    height: image.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &image.data,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Environment Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        Self {
            texture,
            view,
            sampler,
        }
    }
}
