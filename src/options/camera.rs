use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Projection parameters for both cameras and orbit control sensitivity.
pub struct CameraOptions {
    /// Vertical field of view of the in-tube view camera, in degrees.
    #[schemars(title = "View FOV", range(min = 20.0, max = 120.0), extend("step" = 1.0))]
    pub view_fovy: f32,
    /// Near clipping plane of the view camera.
    #[schemars(skip)]
    pub view_znear: f32,
    /// Vertical field of view of the orbit camera, in degrees.
    #[schemars(title = "Orbit FOV", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub orbit_fovy: f32,
    /// Near clipping plane of the orbit camera.
    #[schemars(skip)]
    pub orbit_znear: f32,
    /// Far clipping plane of the orbit camera.
    #[schemars(skip)]
    pub orbit_zfar: f32,
    /// Rotation sensitivity multiplier.
    #[schemars(title = "Rotate Speed", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub rotate_speed: f32,
    /// Dolly sensitivity multiplier.
    #[schemars(title = "Zoom Speed", range(min = 0.1, max = 5.0), extend("step" = 0.1))]
    pub zoom_speed: f32,
    /// Fraction of the pending orbit motion applied per frame.
    #[schemars(title = "Damping", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub damping: f32,
    /// Closest the orbit camera may get to its target.
    #[schemars(skip)]
    pub min_distance: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            view_fovy: 50.0,
            view_znear: 0.01,
            orbit_fovy: 35.0,
            orbit_znear: 0.1,
            orbit_zfar: 10000.0,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            damping: 0.05,
            min_distance: 0.0,
        }
    }
}
