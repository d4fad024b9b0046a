use glam::Vec2;

/// Pointer events in window coordinates, independent of the windowing
/// backend. Keyboard input does not pass through here; keys go straight to
/// the keybinding table as `KeyCode` names.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The pointer is now at `position` (physical pixels, origin top-left).
    PointerMoved {
        /// Absolute pointer position.
        position: Vec2,
    },
    /// A mouse button went down or up.
    Button {
        /// Which button.
        button: MouseButton,
        /// Down (`true`) or up (`false`).
        pressed: bool,
    },
    /// Wheel motion in lines. Positive scrolls away from the user, which
    /// zooms in.
    Wheel {
        /// Lines scrolled.
        lines: f32,
    },
    /// The pointer left the window; any drag in progress is abandoned.
    PointerLeft,
}

/// Mouse buttons the orbit gestures distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Rotates.
    Left,
    /// Dollies.
    Middle,
    /// Reserved for panning, which orbit controls leave disabled.
    Right,
    /// Back, forward, and vendor buttons. Never start a gesture.
    Other,
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        use winit::event::MouseButton as Winit;
        match button {
            Winit::Left => Self::Left,
            Winit::Middle => Self::Middle,
            Winit::Right => Self::Right,
            Winit::Back | Winit::Forward | Winit::Other(_) => Self::Other,
        }
    }
}
