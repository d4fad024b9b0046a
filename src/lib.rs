// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::str_to_string)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Thousands of mirror spheres scattered over a torus, pulsating in place
//! while the whole set slowly turns, rendered with wgpu.
//!
//! A torus is sampled once, area-weighted, for sphere positions. Each
//! sphere carries a phase that advances every frame at one of three
//! speeds; its scale follows a cosine of that phase. The scene is viewed
//! either from a camera inside the torus tube, with exponential fog, or
//! from a free orbit camera.
//!
//! # Key entry points
//!
//! - [`animation::InstanceAnimator`] - the per-frame pulsation of every
//!   instance
//! - [`scene::Scene`] - torus sampling, instance seeding, scene rotation
//! - [`engine::SceneEngine`] - GPU resources and the frame loop
//! - [`options::Options`] - runtime configuration with TOML presets

pub mod animation;
pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use animation::{InstanceAnimator, InstanceSeed};
pub use engine::command::SceneCommand;
pub use engine::SceneEngine;
pub use error::SceneError;
pub use input::{InputEvent, MouseButton};
pub use options::Options;
pub use scene::Scene;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
