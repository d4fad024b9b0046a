//! Cameras: the fixed in-tube view camera, the damped orbit camera, and
//! the frustum helper that visualizes one from the other.

/// Both cameras, the active selection, and the GPU camera uniform.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
pub mod helper;
pub mod orbit;
