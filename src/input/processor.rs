//! Converts raw platform events into orbit gestures.
//!
//! The `InputProcessor` owns the transient pointer state (last cursor
//! position, which button is held) and sits between raw window events and
//! the orbit controls. Key presses bypass it and go straight to the
//! keybinding table.

use glam::Vec2;

use super::event::{InputEvent, MouseButton};

/// A camera gesture recognized from pointer input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrbitGesture {
    /// Rotate by `delta` pixels of drag.
    Rotate {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },
    /// Dolly toward (positive) or away from (negative) the target.
    Zoom {
        /// Scroll amount.
        delta: f32,
    },
}

/// Tracks the pointer and turns drags and scrolls into [`OrbitGesture`]s.
///
/// Left-drag rotates, middle-drag dollies, scroll dollies. Right-drag would
/// pan, which the orbit controls do not support, so it is ignored.
#[derive(Debug, Default)]
pub struct InputProcessor {
    cursor: Option<Vec2>,
    held: Option<MouseButton>,
}

/// Pixels of vertical middle-drag per zoom step.
const DRAG_ZOOM_PIXELS: f32 = 20.0;

impl InputProcessor {
    /// Processor with no button held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a raw input event and return zero or one gestures.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<OrbitGesture> {
        match event {
            InputEvent::PointerMoved { position } => {
                let previous = self.cursor.replace(position)?;
                let delta = position - previous;
                match self.held? {
                    MouseButton::Left => Some(OrbitGesture::Rotate { delta }),
                    MouseButton::Middle => Some(OrbitGesture::Zoom {
                        delta: -delta.y / DRAG_ZOOM_PIXELS,
                    }),
                    MouseButton::Right | MouseButton::Other => None,
                }
            }
            InputEvent::Button { button, pressed } => {
                if button == MouseButton::Other {
                    return None;
                }
                if pressed {
                    self.held = Some(button);
                } else if self.held == Some(button) {
                    self.held = None;
                }
                None
            }
            InputEvent::Wheel { lines } => {
                Some(OrbitGesture::Zoom { delta: lines })
            }
            InputEvent::PointerLeft => {
                self.cursor = None;
                self.held = None;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved {
            position: Vec2::new(x, y),
        }
    }

    fn button(button: MouseButton, pressed: bool) -> InputEvent {
        InputEvent::Button { button, pressed }
    }

    #[test]
    fn hover_produces_nothing() {
        let mut input = InputProcessor::new();
        assert_eq!(input.handle_event(moved(10.0, 10.0)), None);
        assert_eq!(input.handle_event(moved(20.0, 15.0)), None);
    }

    #[test]
    fn left_drag_rotates_by_cursor_delta() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(moved(10.0, 10.0));
        let _ = input.handle_event(button(MouseButton::Left, true));
        assert_eq!(
            input.handle_event(moved(14.0, 7.0)),
            Some(OrbitGesture::Rotate {
                delta: Vec2::new(4.0, -3.0)
            })
        );

        let _ = input.handle_event(button(MouseButton::Left, false));
        assert_eq!(input.handle_event(moved(20.0, 20.0)), None);
    }

    #[test]
    fn middle_drag_up_zooms_in() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(moved(0.0, 100.0));
        let _ = input.handle_event(button(MouseButton::Middle, true));
        match input.handle_event(moved(0.0, 60.0)) {
            Some(OrbitGesture::Zoom { delta }) => assert!((delta - 2.0).abs() < 1e-6),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn right_drag_is_ignored() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(moved(0.0, 0.0));
        let _ = input.handle_event(button(MouseButton::Right, true));
        assert_eq!(input.handle_event(moved(5.0, 5.0)), None);
    }

    #[test]
    fn extra_buttons_do_not_interrupt_a_drag() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(moved(0.0, 0.0));
        let _ = input.handle_event(button(MouseButton::Left, true));
        let _ = input.handle_event(button(MouseButton::Other, true));
        assert_eq!(
            input.handle_event(moved(3.0, 0.0)),
            Some(OrbitGesture::Rotate {
                delta: Vec2::new(3.0, 0.0)
            })
        );
    }

    #[test]
    fn scroll_passes_through() {
        let mut input = InputProcessor::new();
        assert_eq!(
            input.handle_event(InputEvent::Wheel { lines: -1.5 }),
            Some(OrbitGesture::Zoom { delta: -1.5 })
        );
    }

    #[test]
    fn leaving_the_window_ends_the_drag() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(moved(0.0, 0.0));
        let _ = input.handle_event(button(MouseButton::Left, true));
        let _ = input.handle_event(InputEvent::PointerLeft);
        // First move after re-entry only records the position.
        assert_eq!(input.handle_event(moved(50.0, 50.0)), None);
        assert_eq!(input.handle_event(moved(60.0, 50.0)), None);
    }
}
