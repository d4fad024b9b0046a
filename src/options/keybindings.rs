use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::engine::command::SceneCommand;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Configurable keyboard bindings mapping key codes to commands.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format:
/// `"KeyV"`, `"Space"`, `"Escape"`, etc.
pub struct KeybindingOptions {
    /// Forward map: key string → command.
    bindings: HashMap<String, SceneCommand>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("KeyV".into(), SceneCommand::ToggleAnimationView),
            ("KeyH".into(), SceneCommand::ToggleCameraHelper),
            ("Space".into(), SceneCommand::TogglePause),
            ("KeyQ".into(), SceneCommand::ResetCamera),
        ]);
        Self { bindings }
    }
}

impl KeybindingOptions {
    /// Look up the command bound to a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<SceneCommand> {
        self.bindings.get(key).copied()
    }

    /// Bind `key` to `command`, replacing any previous binding for that key.
    pub fn bind(&mut self, key: impl Into<String>, command: SceneCommand) {
        let _ = self.bindings.insert(key.into(), command);
    }
}
