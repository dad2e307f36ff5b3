use std::collections::VecDeque;

use crate::coords::Point;
use crate::input::{Key, Modifiers, MouseButton};

/// Key press or release.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyEvent {
    pub key: Key,
    /// Platform key code; stable for a given physical key.
    pub code: u32,
    pub modifiers: Modifiers,
    /// Auto-repeat generated by a held key.
    pub repeated: bool,
}

/// Mouse button press or release.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseButtonEvent {
    pub button: MouseButton,
    /// Pointer position in logical pixels, top-left origin.
    pub position: Point,
    pub modifiers: Modifiers,
}

/// Platform-independent application event.
///
/// The runtime translates window-system events into these and queues them
/// until the next tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    WindowClose,
    /// New backbuffer size in physical pixels. `0 × 0` when minimized.
    WindowResize { width: u32, height: u32 },
    WindowFocus,
    WindowLostFocus,
    WindowMoved(Point),

    KeyPressed(KeyEvent),
    KeyReleased(KeyEvent),
    KeyTyped(char),
    ModifiersChanged(Modifiers),

    MouseButtonPressed(MouseButtonEvent),
    MouseButtonReleased(MouseButtonEvent),
    MouseMoved(Point),
    MouseScrolled(Point),
    MouseLeft,
}

/// FIFO of events awaiting the next tick.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Extend<Event> for EventQueue {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, iter: I) {
        self.events.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_is_fifo() {
        let mut q = EventQueue::new();
        q.push(Event::WindowFocus);
        q.extend([Event::MouseMoved(Point::new(1.0, 2.0)), Event::WindowClose]);
        assert_eq!(q.len(), 3);

        assert_eq!(q.pop(), Some(Event::WindowFocus));
        assert_eq!(q.pop(), Some(Event::MouseMoved(Point::new(1.0, 2.0))));
        assert_eq!(q.pop(), Some(Event::WindowClose));
        assert_eq!(q.pop(), None);
        assert!(q.is_empty());
    }
}
