//! Host key to GUI key table.

use imbridge_core::GuiKey;

use crate::host_key::HostKey;

/// Maps a host key to the GUI library's key space.
///
/// Keys the GUI library has no name for map to [`GuiKey::None`]. The keypad
/// enter key reports as plain [`GuiKey::Enter`].
pub fn to_gui_key(key: HostKey) -> GuiKey {
    match key {
        HostKey::Tab => GuiKey::Tab,
        HostKey::Left => GuiKey::LeftArrow,
        HostKey::Right => GuiKey::RightArrow,
        HostKey::Up => GuiKey::UpArrow,
        HostKey::Down => GuiKey::DownArrow,
        HostKey::PageUp => GuiKey::PageUp,
        HostKey::PageDown => GuiKey::PageDown,
        HostKey::Home => GuiKey::Home,
        HostKey::End => GuiKey::End,
        HostKey::Insert => GuiKey::Insert,
        HostKey::Delete => GuiKey::Delete,
        HostKey::Backspace => GuiKey::Backspace,
        HostKey::Space => GuiKey::Space,
        HostKey::Return | HostKey::KeypadEnter => GuiKey::Enter,
        HostKey::Escape => GuiKey::Escape,
        HostKey::LeftControl => GuiKey::LeftCtrl,
        HostKey::LeftShift => GuiKey::LeftShift,
        HostKey::LeftAlt => GuiKey::LeftAlt,
        HostKey::LeftMeta => GuiKey::LeftSuper,
        HostKey::RightControl => GuiKey::RightCtrl,
        HostKey::RightShift => GuiKey::RightShift,
        HostKey::RightAlt => GuiKey::RightAlt,
        HostKey::RightMeta => GuiKey::RightSuper,
        HostKey::D0 => GuiKey::Key0,
        HostKey::D1 => GuiKey::Key1,
        HostKey::D2 => GuiKey::Key2,
        HostKey::D3 => GuiKey::Key3,
        HostKey::D4 => GuiKey::Key4,
        HostKey::D5 => GuiKey::Key5,
        HostKey::D6 => GuiKey::Key6,
        HostKey::D7 => GuiKey::Key7,
        HostKey::D8 => GuiKey::Key8,
        HostKey::D9 => GuiKey::Key9,
        HostKey::A => GuiKey::A,
        HostKey::B => GuiKey::B,
        HostKey::C => GuiKey::C,
        HostKey::D => GuiKey::D,
        HostKey::E => GuiKey::E,
        HostKey::F => GuiKey::F,
        HostKey::G => GuiKey::G,
        HostKey::H => GuiKey::H,
        HostKey::I => GuiKey::I,
        HostKey::J => GuiKey::J,
        HostKey::K => GuiKey::K,
        HostKey::L => GuiKey::L,
        HostKey::M => GuiKey::M,
        HostKey::N => GuiKey::N,
        HostKey::O => GuiKey::O,
        HostKey::P => GuiKey::P,
        HostKey::Q => GuiKey::Q,
        HostKey::R => GuiKey::R,
        HostKey::S => GuiKey::S,
        HostKey::T => GuiKey::T,
        HostKey::U => GuiKey::U,
        HostKey::V => GuiKey::V,
        HostKey::W => GuiKey::W,
        HostKey::X => GuiKey::X,
        HostKey::Y => GuiKey::Y,
        HostKey::Z => GuiKey::Z,
        HostKey::F1 => GuiKey::F1,
        HostKey::F2 => GuiKey::F2,
        HostKey::F3 => GuiKey::F3,
        HostKey::F4 => GuiKey::F4,
        HostKey::F5 => GuiKey::F5,
        HostKey::F6 => GuiKey::F6,
        HostKey::F7 => GuiKey::F7,
        HostKey::F8 => GuiKey::F8,
        HostKey::F9 => GuiKey::F9,
        HostKey::F10 => GuiKey::F10,
        HostKey::F11 => GuiKey::F11,
        HostKey::F12 => GuiKey::F12,
        HostKey::Apostrophe => GuiKey::Apostrophe,
        HostKey::Comma => GuiKey::Comma,
        HostKey::Minus => GuiKey::Minus,
        HostKey::Period => GuiKey::Period,
        HostKey::Slash => GuiKey::Slash,
        HostKey::Semicolon => GuiKey::Semicolon,
        HostKey::Equals => GuiKey::Equal,
        HostKey::LeftBracket => GuiKey::LeftBracket,
        HostKey::Backslash => GuiKey::Backslash,
        HostKey::RightBracket => GuiKey::RightBracket,
        HostKey::Grave => GuiKey::GraveAccent,
        HostKey::CapsLock => GuiKey::CapsLock,
        HostKey::ScrollLock => GuiKey::ScrollLock,
        HostKey::NumLockClear => GuiKey::NumLock,
        HostKey::PrintScreen => GuiKey::PrintScreen,
        HostKey::Pause => GuiKey::Pause,
        HostKey::Keypad0 => GuiKey::Keypad0,
        HostKey::Keypad1 => GuiKey::Keypad1,
        HostKey::Keypad2 => GuiKey::Keypad2,
        HostKey::Keypad3 => GuiKey::Keypad3,
        HostKey::Keypad4 => GuiKey::Keypad4,
        HostKey::Keypad5 => GuiKey::Keypad5,
        HostKey::Keypad6 => GuiKey::Keypad6,
        HostKey::Keypad7 => GuiKey::Keypad7,
        HostKey::Keypad8 => GuiKey::Keypad8,
        HostKey::Keypad9 => GuiKey::Keypad9,
        HostKey::KeypadPeriod => GuiKey::KeypadDecimal,
        HostKey::KeypadDivide => GuiKey::KeypadDivide,
        HostKey::KeypadMultiply => GuiKey::KeypadMultiply,
        HostKey::KeypadMinus => GuiKey::KeypadSubtract,
        HostKey::KeypadPlus => GuiKey::KeypadAdd,
        HostKey::NonUsHash
        | HostKey::NonUsBackslash
        | HostKey::Application
        | HostKey::KeypadEquals
        | HostKey::F13
        | HostKey::F14
        | HostKey::F15
        | HostKey::F16
        | HostKey::F17
        | HostKey::F18
        | HostKey::F19
        | HostKey::F20
        | HostKey::F21
        | HostKey::F22
        | HostKey::F23
        | HostKey::F24 => GuiKey::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_keys() {
        assert_eq!(to_gui_key(HostKey::Left), GuiKey::LeftArrow);
        assert_eq!(to_gui_key(HostKey::D0), GuiKey::Key0);
        assert_eq!(to_gui_key(HostKey::Grave), GuiKey::GraveAccent);
        assert_eq!(to_gui_key(HostKey::LeftMeta), GuiKey::LeftSuper);
    }

    #[test]
    fn test_keypad_enter_is_enter() {
        assert_eq!(to_gui_key(HostKey::KeypadEnter), GuiKey::Enter);
        assert_eq!(to_gui_key(HostKey::Return), GuiKey::Enter);
    }

    #[test]
    fn test_unmapped_keys() {
        let unmapped: Vec<HostKey> = HostKey::ALL
            .into_iter()
            .filter(|k| to_gui_key(*k) == GuiKey::None)
            .collect();
        assert_eq!(unmapped.len(), 16);
        assert!(unmapped.contains(&HostKey::F13));
        assert!(unmapped.contains(&HostKey::Application));
    }

    #[test]
    fn test_no_key_maps_to_aggregate_modifier() {
        assert!(HostKey::ALL.iter().all(|k| !to_gui_key(*k).is_modifier()));
    }
}
