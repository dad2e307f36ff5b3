use std::collections::HashSet;

use crate::coords::Point;
use crate::core::Event;

use super::types::{Key, Modifiers, MouseButton};

/// Held keys and buttons plus the last pointer position.
///
/// Updated from the event stream before each event reaches the scene, so a
/// scene handler observes the state including the event it is handling.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,

    pub focused: bool,

    /// Logical pixels, top-left origin. `None` while the pointer is outside
    /// the window.
    pub pointer_pos: Option<Point>,

    pub keys_down: HashSet<Key>,

    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    pub fn apply_event(&mut self, event: &Event) {
        match event {
            Event::ModifiersChanged(m) => self.modifiers = *m,

            Event::WindowFocus => self.focused = true,

            Event::WindowLostFocus => {
                self.focused = false;
                // Releases delivered while unfocused never arrive.
                self.keys_down.clear();
                self.buttons_down.clear();
            }

            Event::KeyPressed(e) => {
                self.modifiers = e.modifiers;
                self.keys_down.insert(e.key);
            }

            Event::KeyReleased(e) => {
                self.modifiers = e.modifiers;
                self.keys_down.remove(&e.key);
            }

            Event::MouseButtonPressed(e) => {
                self.pointer_pos = Some(e.position);
                self.buttons_down.insert(e.button);
            }

            Event::MouseButtonReleased(e) => {
                self.pointer_pos = Some(e.position);
                self.buttons_down.remove(&e.button);
            }

            Event::MouseMoved(p) => self.pointer_pos = Some(*p),

            Event::MouseLeft => self.pointer_pos = None,

            _ => {}
        }
    }

    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Last known pointer position, or the origin if the pointer never
    /// entered the window.
    pub fn mouse_position(&self) -> Point {
        self.pointer_pos.unwrap_or(Point::ZERO)
    }
}
