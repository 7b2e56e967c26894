//! Keyboard and mouse state collected from window events.

use std::collections::HashSet;

use ultraviolet::Vec2;
use winit::event::{ElementState, KeyboardInput, MouseButton, VirtualKeyCode, WindowEvent};

use super::Input;

/// State of keyboard and mouse for the current and the previous frame.
///
/// Filled by the window event loop, read by systems through [`Input`].
///
#[derive(Debug, Clone)]
pub struct InputState {
    keys: HashSet<VirtualKeyCode>,
    previous_keys: HashSet<VirtualKeyCode>,
    buttons: HashSet<MouseButton>,
    previous_buttons: HashSet<MouseButton>,
    /// Unknown until the first cursor event, and again after focus is lost.
    cursor: Option<Vec2>,
    delta: Vec2,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    /// Creates state with nothing pressed and unknown cursor position.
    pub fn new() -> Self {
        Self {
            keys: HashSet::new(),
            previous_keys: HashSet::new(),
            buttons: HashSet::new(),
            previous_buttons: HashSet::new(),
            cursor: None,
            delta: Vec2::zero(),
        }
    }

    /// Updates state from the window event. Unrelated events are ignored.
    pub fn handle_event(&mut self, event: &WindowEvent<'_>) {
        match event {
            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        virtual_keycode: Some(key),
                        state,
                        ..
                    },
                ..
            } => self.set_key(*key, *state == ElementState::Pressed),
            WindowEvent::MouseInput { state, button, .. } => {
                self.set_mouse_button(*button, *state == ElementState::Pressed)
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.set_cursor_position(Vec2::new(position.x as f32, position.y as f32))
            }
            WindowEvent::Focused(false) => {
                self.keys.clear();
                self.buttons.clear();
                self.cursor = None;
            }
            _ => (),
        }
    }

    /// Marks the key as pressed or released.
    pub fn set_key(&mut self, key: VirtualKeyCode, pressed: bool) {
        if pressed {
            self.keys.insert(key);
        } else {
            self.keys.remove(&key);
        }
    }

    /// Marks the mouse button as pressed or released.
    pub fn set_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            self.buttons.insert(button);
        } else {
            self.buttons.remove(&button);
        }
    }

    /// Moves the cursor, accumulating movement of the current frame.
    ///
    /// The first position after creation or focus loss only places the cursor.
    ///
    pub fn set_cursor_position(&mut self, position: Vec2) {
        if let Some(cursor) = self.cursor {
            self.delta += position - cursor;
        }
        self.cursor = Some(position);
    }

    /// Finishes the frame: current state becomes previous, movement is reset.
    pub fn end_frame(&mut self) {
        self.previous_keys.clone_from(&self.keys);
        self.previous_buttons.clone_from(&self.buttons);
        self.delta = Vec2::zero();
    }
}

impl Input for InputState {
    fn key_down(&self, key: VirtualKeyCode) -> bool {
        self.keys.contains(&key)
    }

    fn key_pressed(&self, key: VirtualKeyCode) -> bool {
        self.keys.contains(&key) && !self.previous_keys.contains(&key)
    }

    fn mouse_button_down(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }

    fn mouse_clicked(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button) && !self.previous_buttons.contains(&button)
    }

    fn mouse_pos(&self) -> Vec2 {
        self.cursor.unwrap_or_else(Vec2::zero)
    }

    fn mouse_delta(&self) -> Vec2 {
        self.delta
    }
}
