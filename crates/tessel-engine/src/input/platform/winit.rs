use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use winit::window::Window;

use crate::coords::Point;
use crate::core::{Event, EventQueue, KeyEvent, MouseButtonEvent};
use crate::input::{InputState, Key, Modifiers, MouseButton};

/// Translates a winit `WindowEvent` into zero or more engine events.
///
/// `input` supplies the modifier and pointer state winit does not attach to
/// button events.
pub fn translate_window_event(
    window: &Window,
    input: &InputState,
    event: &WindowEvent,
    out: &mut EventQueue,
) {
    match event {
        WindowEvent::CloseRequested => out.push(Event::WindowClose),

        WindowEvent::Resized(size) => out.push(Event::WindowResize {
            width: size.width,
            height: size.height,
        }),

        WindowEvent::ScaleFactorChanged { .. } => {
            let size = window.inner_size();
            out.push(Event::WindowResize {
                width: size.width,
                height: size.height,
            });
        }

        WindowEvent::Focused(true) => out.push(Event::WindowFocus),
        WindowEvent::Focused(false) => out.push(Event::WindowLostFocus),

        WindowEvent::Moved(pos) => {
            let pos = PhysicalPosition::new(pos.x as f64, pos.y as f64);
            out.push(Event::WindowMoved(to_logical(window, pos)));
        }

        WindowEvent::ModifiersChanged(m) => {
            out.push(Event::ModifiersChanged(map_modifiers(m.state())));
        }

        WindowEvent::CursorMoved { position, .. } => {
            out.push(Event::MouseMoved(to_logical(window, *position)));
        }

        WindowEvent::CursorLeft { .. } => out.push(Event::MouseLeft),

        WindowEvent::MouseInput { state, button, .. } => {
            let event = MouseButtonEvent {
                button: map_mouse_button(*button),
                position: input.mouse_position(),
                modifiers: input.modifiers,
            };
            out.push(match state {
                ElementState::Pressed => Event::MouseButtonPressed(event),
                ElementState::Released => Event::MouseButtonReleased(event),
            });
        }

        WindowEvent::MouseWheel { delta, .. } => {
            let delta = match delta {
                MouseScrollDelta::LineDelta(x, y) => Point::new(*x, *y),
                MouseScrollDelta::PixelDelta(p) => to_logical(window, *p),
            };
            out.push(Event::MouseScrolled(delta));
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let (key, code) = map_key(event.physical_key);
            let key_event = KeyEvent {
                key,
                code,
                modifiers: input.modifiers,
                repeated: event.repeat,
            };

            match event.state {
                ElementState::Pressed => {
                    out.push(Event::KeyPressed(key_event));
                    if let Some(text) = event.text.as_ref() {
                        push_typed(text, out);
                    }
                }
                ElementState::Released => out.push(Event::KeyReleased(key_event)),
            }
        }

        WindowEvent::Ime(winit::event::Ime::Commit(text)) => push_typed(text, out),

        _ => {}
    }
}

fn push_typed(text: &str, out: &mut EventQueue) {
    out.extend(text.chars().filter(|c| !c.is_control()).map(Event::KeyTyped));
}

fn to_logical(window: &Window, pos: PhysicalPosition<f64>) -> Point {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    Point::new(logical.x as f32, logical.y as f32)
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> (Key, u32) {
    let PhysicalKey::Code(code) = pk else {
        return (Key::Unknown(0), 0);
    };

    let key = match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Space => Key::Space,

        KeyCode::Insert => Key::Insert,
        KeyCode::Delete => Key::Delete,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,

        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,

        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
        KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
        KeyCode::SuperLeft | KeyCode::SuperRight => Key::Meta,

        KeyCode::Quote => Key::Apostrophe,
        KeyCode::Comma => Key::Comma,
        KeyCode::Minus => Key::Minus,
        KeyCode::Period => Key::Period,
        KeyCode::Slash => Key::Slash,
        KeyCode::Semicolon => Key::Semicolon,
        KeyCode::Equal => Key::Equal,
        KeyCode::BracketLeft => Key::LeftBracket,
        KeyCode::Backslash => Key::Backslash,
        KeyCode::BracketRight => Key::RightBracket,
        KeyCode::Backquote => Key::GraveAccent,

        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,

        KeyCode::Digit0 => Key::Digit0,
        KeyCode::Digit1 => Key::Digit1,
        KeyCode::Digit2 => Key::Digit2,
        KeyCode::Digit3 => Key::Digit3,
        KeyCode::Digit4 => Key::Digit4,
        KeyCode::Digit5 => Key::Digit5,
        KeyCode::Digit6 => Key::Digit6,
        KeyCode::Digit7 => Key::Digit7,
        KeyCode::Digit8 => Key::Digit8,
        KeyCode::Digit9 => Key::Digit9,

        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::F4 => Key::F4,
        KeyCode::F5 => Key::F5,
        KeyCode::F6 => Key::F6,
        KeyCode::F7 => Key::F7,
        KeyCode::F8 => Key::F8,
        KeyCode::F9 => Key::F9,
        KeyCode::F10 => Key::F10,
        KeyCode::F11 => Key::F11,
        KeyCode::F12 => Key::F12,

        other => Key::Unknown(other as u32),
    };

    (key, code as u32)
}
