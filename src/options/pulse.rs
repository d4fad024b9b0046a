use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::SceneError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Pulse", inline)]
#[serde(default)]
/// Per-frame pulsation parameters.
///
/// Instance `i` advances its phase by `speeds[i % 3]` each frame and is
/// drawn at `cos(phase · 2π) · amplitude + offset` times its base size.
pub struct PulseOptions {
    /// Phase step per frame for the three instance groups.
    #[schemars(skip)]
    pub speeds: [f32; 3],
    /// Half the peak-to-peak scale swing.
    #[schemars(title = "Amplitude", range(min = 0.0, max = 0.5), extend("step" = 0.01))]
    pub amplitude: f32,
    /// Scale at the zero crossing of the wave.
    #[schemars(title = "Offset", range(min = 0.1, max = 2.0), extend("step" = 0.01))]
    pub offset: f32,
}

impl Default for PulseOptions {
    fn default() -> Self {
        Self {
            speeds: [0.0052, 0.0085, 0.0078],
            amplitude: 0.25,
            offset: 0.78,
        }
    }
}

impl PulseOptions {
    /// Smallest scale the wave can produce.
    #[must_use]
    pub fn min_scale(&self) -> f32 {
        self.offset - self.amplitude
    }

    /// Largest scale the wave can produce.
    #[must_use]
    pub fn max_scale(&self) -> f32 {
        self.offset + self.amplitude
    }

    /// Check that every phase eventually wraps and every scale stays
    /// positive: each speed finite and in `(0, 1]`, and
    /// `0 <= amplitude < offset`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::OptionsParse`] naming the offending field.
    pub fn validate(&self) -> Result<(), SceneError> {
        for (group, &speed) in self.speeds.iter().enumerate() {
            if !(speed.is_finite() && speed > 0.0 && speed <= 1.0) {
                return Err(SceneError::OptionsParse(format!(
                    "pulse.speeds[{group}] must be in (0, 1], got {speed}"
                )));
            }
        }
        if !(self.amplitude.is_finite() && self.amplitude >= 0.0) {
            return Err(SceneError::OptionsParse(format!(
                "pulse.amplitude must be non-negative, got {}",
                self.amplitude
            )));
        }
        if !(self.offset.is_finite() && self.amplitude < self.offset) {
            return Err(SceneError::OptionsParse(format!(
                "pulse.offset ({}) must exceed pulse.amplitude ({})",
                self.offset, self.amplitude
            )));
        }
        Ok(())
    }
}
