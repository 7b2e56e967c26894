//! Collaborators which systems can reach through the ECS context.
//!
//! The ECS itself never looks inside of the context:
//! it is handed to every system invocation as is.

use ultraviolet::Vec2;
use winit::event::{MouseButton, VirtualKeyCode};

pub use input::InputState;
pub use render::{ObjectId, ObjectUbo, RenderObjects};

mod input;
mod render;

/// Read-only view of keyboard and mouse state.
pub trait Input {
    /// Returns `true` while the key is held down.
    fn key_down(&self, key: VirtualKeyCode) -> bool;

    /// Returns `true` only in the frame the key went down.
    fn key_pressed(&self, key: VirtualKeyCode) -> bool;

    /// Returns `true` while the mouse button is held down.
    fn mouse_button_down(&self, button: MouseButton) -> bool;

    /// Returns `true` only in the frame the mouse button went down.
    fn mouse_clicked(&self, button: MouseButton) -> bool;

    /// Cursor position in window coordinates.
    fn mouse_pos(&self) -> Vec2;

    /// Cursor movement during the current frame.
    fn mouse_delta(&self) -> Vec2;
}

/// Access to uniform data of renderable objects.
pub trait Renderer {
    fn object(&self, id: ObjectId) -> Option<&ObjectUbo>;

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut ObjectUbo>;
}

/// Renderer and input collaborators shared by all systems.
#[derive(Debug, Default)]
pub struct CoreContext<R = RenderObjects, I = InputState> {
    renderer: R,
    input: I,
}

impl<R, I> CoreContext<R, I>
where
    R: Renderer,
    I: Input,
{
    pub fn new(renderer: R, input: I) -> Self {
        Self { renderer, input }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }
}
