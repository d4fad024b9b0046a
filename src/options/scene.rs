use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
/// Torus dimensions, sampling density, and sphere mesh parameters.
pub struct SceneOptions {
    /// Distance from the torus center to the center of the tube.
    #[schemars(title = "Torus Radius", range(min = 5.0, max = 200.0), extend("step" = 1.0))]
    pub radius: f32,
    /// Radius of the torus tube.
    #[schemars(title = "Tube Radius", range(min = 0.5, max = 20.0), extend("step" = 0.1))]
    pub tube: f32,
    /// Segments around the tube cross-section.
    #[schemars(skip)]
    pub radial_segments: u32,
    /// Segments along the ring.
    #[schemars(skip)]
    pub tubular_segments: u32,
    /// Number of spheres sampled onto the torus surface.
    #[schemars(title = "Sphere Count", range(min = 1, max = 50000))]
    pub sampler_count: u32,
    /// Radius of each sphere before pulsing.
    #[schemars(title = "Sphere Radius", range(min = 0.05, max = 2.0), extend("step" = 0.01))]
    pub sphere_radius: f32,
    /// Sphere mesh segments around the equator.
    #[schemars(skip)]
    pub sphere_width_segments: u32,
    /// Sphere mesh segments from pole to pole.
    #[schemars(skip)]
    pub sphere_height_segments: u32,
    /// Optional equirectangular PNG/JPEG used for sphere reflections.
    #[schemars(skip)]
    pub environment_map: Option<String>,
    /// Seed for sampling and coloring. `None` draws from OS entropy.
    #[schemars(skip)]
    pub seed: Option<u64>,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            radius: 50.0,
            tube: 2.0,
            radial_segments: 20,
            tubular_segments: 100,
            sampler_count: 5000,
            sphere_radius: 0.2,
            sphere_width_segments: 32,
            sphere_height_segments: 16,
            environment_map: None,
            seed: None,
        }
    }
}
