//! Discrete engine actions that can be bound to keys.

use serde::{Deserialize, Serialize};

/// A parameterless operation the engine can perform.
///
/// Commands serialize as snake_case strings so they can be named directly
/// in the `[keybindings]` table of an options file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneCommand {
    /// Switch between the in-tube view camera and the orbit camera. Fog
    /// follows the view camera.
    ToggleAnimationView,
    /// Show or hide the view-camera frustum and marker box.
    ToggleCameraHelper,
    /// Freeze or resume the pulsation and the scene rotation.
    TogglePause,
    /// Return the orbit camera to its starting position.
    ResetCamera,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_use_snake_case_names() {
        assert_eq!(
            serde_json::to_string(&SceneCommand::ToggleAnimationView).unwrap(),
            "\"toggle_animation_view\""
        );
        let parsed: SceneCommand =
            serde_json::from_str("\"reset_camera\"").unwrap();
        assert_eq!(parsed, SceneCommand::ResetCamera);
    }
}
