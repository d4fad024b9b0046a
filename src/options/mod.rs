//! Centralized scene options with TOML preset support.
//!
//! All tweakable settings (torus and sampling, pulsation, cameras, display
//! toggles, keybindings) are consolidated here. Options serialize to/from
//! TOML for presets stored in `assets/presets/`.

mod camera;
mod display;
mod keybindings;
mod pulse;
mod scene;

use std::path::{Path, PathBuf};

pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use keybindings::KeybindingOptions;
pub use pulse::PulseOptions;
pub use scene::SceneOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Directory searched for named presets.
pub const PRESET_DIR: &str = "assets/presets";

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[display]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Torus, sampling, and sphere mesh parameters.
    pub scene: SceneOptions,
    /// Pulsation wave parameters.
    pub pulse: PulseOptions,
    /// Camera projection and control parameters.
    pub camera: CameraOptions,
    /// Display toggles.
    pub display: DisplayOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the user-facing options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Io`] if the file cannot be read and
    /// [`SceneError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::OptionsParse`] on malformed input or values
    /// rejected by [`validate`](Self::validate).
    pub fn from_toml(content: &str) -> Result<Self, SceneError> {
        let options: Self = toml::from_str(content)
            .map_err(|e| SceneError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Reject values that would break the pulsation invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::OptionsParse`] describing the first bad field.
    pub fn validate(&self) -> Result<(), SceneError> {
        self.pulse.validate()
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::OptionsParse`] if serialization fails and
    /// [`SceneError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), SceneError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SceneError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Path of the preset called `name` inside `dir`.
    #[must_use]
    pub fn preset_path(dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{name}.toml"))
    }
}
