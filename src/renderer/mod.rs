//! Raster passes: the instanced sphere pass and the unlit overlay pass.

pub mod overlay;
pub mod sphere;
