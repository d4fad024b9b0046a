//! Shared utilities: frame timing and color space conversion.

pub mod color;
/// Frame pacing and smoothed FPS.
pub mod frame_timing;
