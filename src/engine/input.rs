//! Input and command dispatch for SceneEngine

use super::command::SceneCommand;
use super::SceneEngine;
use crate::camera::controller::ActiveCamera;
use crate::input::{InputEvent, OrbitGesture};

impl SceneEngine {
    /// Process a platform-agnostic pointer event.
    ///
    /// Drags and scrolls always steer the orbit camera, even while the view
    /// camera is active, so switching views shows where it was left.
    pub fn handle_input(&mut self, event: InputEvent) {
        match self.input.handle_event(event) {
            Some(OrbitGesture::Rotate { delta }) => {
                let height = self.context.size().1 as f32;
                self.camera.orbit.rotate(delta, height);
            }
            Some(OrbitGesture::Zoom { delta }) => self.camera.orbit.zoom(delta),
            None => {}
        }
    }

    /// Look up a physical key string (`winit::keyboard::KeyCode` debug
    /// format) and execute its bound command. Returns `true` if the key
    /// was bound.
    pub fn handle_key(&mut self, key: &str) -> bool {
        match self.options.keybindings.lookup(key) {
            Some(command) => {
                self.execute(command);
                true
            }
            None => false,
        }
    }

    /// Perform a command.
    pub fn execute(&mut self, command: SceneCommand) {
        let display = &mut self.options.display;
        match command {
            SceneCommand::ToggleAnimationView => {
                display.animation_view = !display.animation_view;
                let active = if display.animation_view {
                    ActiveCamera::View
                } else {
                    ActiveCamera::Orbit
                };
                self.camera.set_active(active);
                log::info!("rendering through the {active:?} camera");
            }
            SceneCommand::ToggleCameraHelper => {
                display.camera_helper = !display.camera_helper;
                log::debug!("camera helper: {}", display.camera_helper);
            }
            SceneCommand::TogglePause => {
                self.paused = !self.paused;
                log::info!("{}", if self.paused { "paused" } else { "resumed" });
            }
            SceneCommand::ResetCamera => self.camera.reset(),
        }
    }
}
