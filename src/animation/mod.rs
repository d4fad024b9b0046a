//! Frame-driven instance animation.
//!
//! [`pulse::InstanceAnimator`] advances every sphere's pulsation phase once
//! per rendered frame and keeps the instance transform buffer in sync.

pub mod pulse;

pub use pulse::{pulse_scale, InstanceAnimator, InstanceSeed};
