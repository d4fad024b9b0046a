use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Display toggles and frame pacing.
pub struct DisplayOptions {
    /// Render through the in-tube view camera instead of the orbit camera.
    #[schemars(title = "Animation View")]
    pub animation_view: bool,
    /// Show the view camera frustum and its marker box.
    #[schemars(title = "Camera Helper")]
    pub camera_helper: bool,
    /// Exponential-squared fog density used in the animation view.
    #[schemars(title = "Fog Density", range(min = 0.0, max = 0.5), extend("step" = 0.005))]
    pub fog_density: f32,
    /// Background and fog color (sRGB).
    #[schemars(skip)]
    pub background: [f32; 3],
    /// Frame cap (0 = follow the display refresh).
    #[schemars(title = "Target FPS", range(min = 0, max = 300))]
    pub target_fps: u32,
    /// Seconds for the sphere pivot to turn one radian about Z.
    #[schemars(skip)]
    pub rotation_period: f32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            animation_view: true,
            camera_helper: false,
            fog_density: 0.08,
            // CSS "pink" (#ffc0cb)
            background: [1.0, 192.0 / 255.0, 203.0 / 255.0],
            target_fps: 0,
            rotation_period: 30.0,
        }
    }
}

impl DisplayOptions {
    /// Fog density actually applied this frame: fog only exists in the
    /// animation view.
    #[must_use]
    pub fn effective_fog_density(&self) -> f32 {
        if self.animation_view {
            self.fog_density
        } else {
            0.0
        }
    }
}
