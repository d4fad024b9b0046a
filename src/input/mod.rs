//! Input handling: platform-agnostic event types and the processor that
//! turns pointer events into orbit gestures.

/// Platform-agnostic input events.
pub mod event;
pub mod processor;

pub use event::{InputEvent, MouseButton};
pub use processor::{InputProcessor, OrbitGesture};
