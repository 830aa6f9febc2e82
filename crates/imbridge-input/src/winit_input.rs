//! Building input snapshots from winit window events.

use winit::event::{ElementState, Ime, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use imbridge_core::MouseButton;

use crate::host_key::HostKey;
use crate::snapshot::InputSnapshot;

/// Wheel lines per pixel of trackpad scrolling.
const PIXELS_TO_LINES: f32 = 0.1;

/// Tracks winit events between GUI ticks.
///
/// Feed every [`WindowEvent`] to [`handle_event`](Self::handle_event) and call
/// [`take_snapshot`](Self::take_snapshot) once per tick. Wheel movement
/// accumulates until it is taken.
#[derive(Debug, Clone, Default)]
pub struct WinitInput {
    snapshot: InputSnapshot,
}

impl WinitInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the tracked state and returns characters typed by this event.
    ///
    /// Control characters are dropped; the GUI sees those as key events.
    pub fn handle_event(&mut self, event: &WindowEvent) -> Vec<char> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.snapshot.mouse.x = position.x as f32;
                self.snapshot.mouse.y = position.y as f32;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.snapshot.mouse.wheel += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * PIXELS_TO_LINES,
                };
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = mouse_button_from_winit(*button) {
                    self.snapshot
                        .mouse
                        .set(button, *state == ElementState::Pressed);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let pressed = event.state == ElementState::Pressed;
                if let PhysicalKey::Code(code) = event.physical_key {
                    if let Some(key) = host_key_from_winit(code) {
                        self.snapshot.keyboard.set(key, pressed);
                    }
                }
                if pressed {
                    if let Some(text) = &event.text {
                        return text.chars().filter(|c| !c.is_control()).collect();
                    }
                }
            }
            WindowEvent::Ime(Ime::Commit(text)) => {
                return text.chars().filter(|c| !c.is_control()).collect();
            }
            WindowEvent::Focused(false) => {
                self.release_all();
            }
            _ => {}
        }
        Vec::new()
    }

    /// Releases every key and button, as after losing focus.
    pub fn release_all(&mut self) {
        self.snapshot.keyboard.clear();
        self.snapshot.mouse.left = false;
        self.snapshot.mouse.middle = false;
        self.snapshot.mouse.right = false;
    }

    /// Current state without consuming the wheel.
    pub fn snapshot(&self) -> &InputSnapshot {
        &self.snapshot
    }

    /// Current state; the wheel delta starts over from zero.
    pub fn take_snapshot(&mut self) -> InputSnapshot {
        let snapshot = self.snapshot.clone();
        self.snapshot.mouse.wheel = 0.0;
        snapshot
    }
}

pub fn mouse_button_from_winit(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

/// Maps a winit physical key code to the host key at the same position.
pub fn host_key_from_winit(code: KeyCode) -> Option<HostKey> {
    let key = match code {
        KeyCode::KeyA => HostKey::A,
        KeyCode::KeyB => HostKey::B,
        KeyCode::KeyC => HostKey::C,
        KeyCode::KeyD => HostKey::D,
        KeyCode::KeyE => HostKey::E,
        KeyCode::KeyF => HostKey::F,
        KeyCode::KeyG => HostKey::G,
        KeyCode::KeyH => HostKey::H,
        KeyCode::KeyI => HostKey::I,
        KeyCode::KeyJ => HostKey::J,
        KeyCode::KeyK => HostKey::K,
        KeyCode::KeyL => HostKey::L,
        KeyCode::KeyM => HostKey::M,
        KeyCode::KeyN => HostKey::N,
        KeyCode::KeyO => HostKey::O,
        KeyCode::KeyP => HostKey::P,
        KeyCode::KeyQ => HostKey::Q,
        KeyCode::KeyR => HostKey::R,
        KeyCode::KeyS => HostKey::S,
        KeyCode::KeyT => HostKey::T,
        KeyCode::KeyU => HostKey::U,
        KeyCode::KeyV => HostKey::V,
        KeyCode::KeyW => HostKey::W,
        KeyCode::KeyX => HostKey::X,
        KeyCode::KeyY => HostKey::Y,
        KeyCode::KeyZ => HostKey::Z,
        KeyCode::Digit1 => HostKey::D1,
        KeyCode::Digit2 => HostKey::D2,
        KeyCode::Digit3 => HostKey::D3,
        KeyCode::Digit4 => HostKey::D4,
        KeyCode::Digit5 => HostKey::D5,
        KeyCode::Digit6 => HostKey::D6,
        KeyCode::Digit7 => HostKey::D7,
        KeyCode::Digit8 => HostKey::D8,
        KeyCode::Digit9 => HostKey::D9,
        KeyCode::Digit0 => HostKey::D0,
        KeyCode::Enter => HostKey::Return,
        KeyCode::Escape => HostKey::Escape,
        KeyCode::Backspace => HostKey::Backspace,
        KeyCode::Tab => HostKey::Tab,
        KeyCode::Space => HostKey::Space,
        KeyCode::Minus => HostKey::Minus,
        KeyCode::Equal => HostKey::Equals,
        KeyCode::BracketLeft => HostKey::LeftBracket,
        KeyCode::BracketRight => HostKey::RightBracket,
        KeyCode::Backslash => HostKey::Backslash,
        KeyCode::Semicolon => HostKey::Semicolon,
        KeyCode::Quote => HostKey::Apostrophe,
        KeyCode::Backquote => HostKey::Grave,
        KeyCode::Comma => HostKey::Comma,
        KeyCode::Period => HostKey::Period,
        KeyCode::Slash => HostKey::Slash,
        KeyCode::CapsLock => HostKey::CapsLock,
        KeyCode::F1 => HostKey::F1,
        KeyCode::F2 => HostKey::F2,
        KeyCode::F3 => HostKey::F3,
        KeyCode::F4 => HostKey::F4,
        KeyCode::F5 => HostKey::F5,
        KeyCode::F6 => HostKey::F6,
        KeyCode::F7 => HostKey::F7,
        KeyCode::F8 => HostKey::F8,
        KeyCode::F9 => HostKey::F9,
        KeyCode::F10 => HostKey::F10,
        KeyCode::F11 => HostKey::F11,
        KeyCode::F12 => HostKey::F12,
        KeyCode::PrintScreen => HostKey::PrintScreen,
        KeyCode::ScrollLock => HostKey::ScrollLock,
        KeyCode::Pause => HostKey::Pause,
        KeyCode::Insert => HostKey::Insert,
        KeyCode::Home => HostKey::Home,
        KeyCode::PageUp => HostKey::PageUp,
        KeyCode::Delete => HostKey::Delete,
        KeyCode::End => HostKey::End,
        KeyCode::PageDown => HostKey::PageDown,
        KeyCode::ArrowRight => HostKey::Right,
        KeyCode::ArrowLeft => HostKey::Left,
        KeyCode::ArrowDown => HostKey::Down,
        KeyCode::ArrowUp => HostKey::Up,
        KeyCode::NumLock => HostKey::NumLockClear,
        KeyCode::NumpadDivide => HostKey::KeypadDivide,
        KeyCode::NumpadMultiply => HostKey::KeypadMultiply,
        KeyCode::NumpadSubtract => HostKey::KeypadMinus,
        KeyCode::NumpadAdd => HostKey::KeypadPlus,
        KeyCode::NumpadEnter => HostKey::KeypadEnter,
        KeyCode::Numpad1 => HostKey::Keypad1,
        KeyCode::Numpad2 => HostKey::Keypad2,
        KeyCode::Numpad3 => HostKey::Keypad3,
        KeyCode::Numpad4 => HostKey::Keypad4,
        KeyCode::Numpad5 => HostKey::Keypad5,
        KeyCode::Numpad6 => HostKey::Keypad6,
        KeyCode::Numpad7 => HostKey::Keypad7,
        KeyCode::Numpad8 => HostKey::Keypad8,
        KeyCode::Numpad9 => HostKey::Keypad9,
        KeyCode::Numpad0 => HostKey::Keypad0,
        KeyCode::NumpadDecimal => HostKey::KeypadPeriod,
        KeyCode::IntlBackslash => HostKey::NonUsBackslash,
        KeyCode::ContextMenu => HostKey::Application,
        KeyCode::NumpadEqual => HostKey::KeypadEquals,
        KeyCode::F13 => HostKey::F13,
        KeyCode::F14 => HostKey::F14,
        KeyCode::F15 => HostKey::F15,
        KeyCode::F16 => HostKey::F16,
        KeyCode::F17 => HostKey::F17,
        KeyCode::F18 => HostKey::F18,
        KeyCode::F19 => HostKey::F19,
        KeyCode::F20 => HostKey::F20,
        KeyCode::F21 => HostKey::F21,
        KeyCode::F22 => HostKey::F22,
        KeyCode::F23 => HostKey::F23,
        KeyCode::F24 => HostKey::F24,
        KeyCode::ControlLeft => HostKey::LeftControl,
        KeyCode::ShiftLeft => HostKey::LeftShift,
        KeyCode::AltLeft => HostKey::LeftAlt,
        KeyCode::SuperLeft => HostKey::LeftMeta,
        KeyCode::ControlRight => HostKey::RightControl,
        KeyCode::ShiftRight => HostKey::RightShift,
        KeyCode::AltRight => HostKey::RightAlt,
        KeyCode::SuperRight => HostKey::RightMeta,
        _ => return None,
    };
    Some(key)
}
