//! Host key codes.

use serde::{Deserialize, Serialize};

/// A physical key on the host keyboard.
///
/// Discriminants are USB HID usage ids, the same numbering SDL uses for its
/// scancodes. They are forwarded to the GUI library as native key data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u16)]
pub enum HostKey {
    A = 4,
    B = 5,
    C = 6,
    D = 7,
    E = 8,
    F = 9,
    G = 10,
    H = 11,
    I = 12,
    J = 13,
    K = 14,
    L = 15,
    M = 16,
    N = 17,
    O = 18,
    P = 19,
    Q = 20,
    R = 21,
    S = 22,
    T = 23,
    U = 24,
    V = 25,
    W = 26,
    X = 27,
    Y = 28,
    Z = 29,
    D1 = 30,
    D2 = 31,
    D3 = 32,
    D4 = 33,
    D5 = 34,
    D6 = 35,
    D7 = 36,
    D8 = 37,
    D9 = 38,
    D0 = 39,
    Return = 40,
    Escape = 41,
    Backspace = 42,
    Tab = 43,
    Space = 44,
    Minus = 45,
    Equals = 46,
    LeftBracket = 47,
    RightBracket = 48,
    Backslash = 49,
    NonUsHash = 50,
    Semicolon = 51,
    Apostrophe = 52,
    Grave = 53,
    Comma = 54,
    Period = 55,
    Slash = 56,
    CapsLock = 57,
    F1 = 58,
    F2 = 59,
    F3 = 60,
    F4 = 61,
    F5 = 62,
    F6 = 63,
    F7 = 64,
    F8 = 65,
    F9 = 66,
    F10 = 67,
    F11 = 68,
    F12 = 69,
    PrintScreen = 70,
    ScrollLock = 71,
    Pause = 72,
    Insert = 73,
    Home = 74,
    PageUp = 75,
    Delete = 76,
    End = 77,
    PageDown = 78,
    Right = 79,
    Left = 80,
    Down = 81,
    Up = 82,
    NumLockClear = 83,
    KeypadDivide = 84,
    KeypadMultiply = 85,
    KeypadMinus = 86,
    KeypadPlus = 87,
    KeypadEnter = 88,
    Keypad1 = 89,
    Keypad2 = 90,
    Keypad3 = 91,
    Keypad4 = 92,
    Keypad5 = 93,
    Keypad6 = 94,
    Keypad7 = 95,
    Keypad8 = 96,
    Keypad9 = 97,
    Keypad0 = 98,
    KeypadPeriod = 99,
    NonUsBackslash = 100,
    Application = 101,
    KeypadEquals = 103,
    F13 = 104,
    F14 = 105,
    F15 = 106,
    F16 = 107,
    F17 = 108,
    F18 = 109,
    F19 = 110,
    F20 = 111,
    F21 = 112,
    F22 = 113,
    F23 = 114,
    F24 = 115,
    LeftControl = 224,
    LeftShift = 225,
    LeftAlt = 226,
    LeftMeta = 227,
    RightControl = 228,
    RightShift = 229,
    RightAlt = 230,
    RightMeta = 231,
}

impl HostKey {
    /// Number of known host keys.
    pub const COUNT: usize = 119;

    /// Every known host key, in scancode order.
    pub const ALL: [HostKey; Self::COUNT] = [
        HostKey::A,
        HostKey::B,
        HostKey::C,
        HostKey::D,
        HostKey::E,
        HostKey::F,
        HostKey::G,
        HostKey::H,
        HostKey::I,
        HostKey::J,
        HostKey::K,
        HostKey::L,
        HostKey::M,
        HostKey::N,
        HostKey::O,
        HostKey::P,
        HostKey::Q,
        HostKey::R,
        HostKey::S,
        HostKey::T,
        HostKey::U,
        HostKey::V,
        HostKey::W,
        HostKey::X,
        HostKey::Y,
        HostKey::Z,
        HostKey::D1,
        HostKey::D2,
        HostKey::D3,
        HostKey::D4,
        HostKey::D5,
        HostKey::D6,
        HostKey::D7,
        HostKey::D8,
        HostKey::D9,
        HostKey::D0,
        HostKey::Return,
        HostKey::Escape,
        HostKey::Backspace,
        HostKey::Tab,
        HostKey::Space,
        HostKey::Minus,
        HostKey::Equals,
        HostKey::LeftBracket,
        HostKey::RightBracket,
        HostKey::Backslash,
        HostKey::NonUsHash,
        HostKey::Semicolon,
        HostKey::Apostrophe,
        HostKey::Grave,
        HostKey::Comma,
        HostKey::Period,
        HostKey::Slash,
        HostKey::CapsLock,
        HostKey::F1,
        HostKey::F2,
        HostKey::F3,
        HostKey::F4,
        HostKey::F5,
        HostKey::F6,
        HostKey::F7,
        HostKey::F8,
        HostKey::F9,
        HostKey::F10,
        HostKey::F11,
        HostKey::F12,
        HostKey::PrintScreen,
        HostKey::ScrollLock,
        HostKey::Pause,
        HostKey::Insert,
        HostKey::Home,
        HostKey::PageUp,
        HostKey::Delete,
        HostKey::End,
        HostKey::PageDown,
        HostKey::Right,
        HostKey::Left,
        HostKey::Down,
        HostKey::Up,
        HostKey::NumLockClear,
        HostKey::KeypadDivide,
        HostKey::KeypadMultiply,
        HostKey::KeypadMinus,
        HostKey::KeypadPlus,
        HostKey::KeypadEnter,
        HostKey::Keypad1,
        HostKey::Keypad2,
        HostKey::Keypad3,
        HostKey::Keypad4,
        HostKey::Keypad5,
        HostKey::Keypad6,
        HostKey::Keypad7,
        HostKey::Keypad8,
        HostKey::Keypad9,
        HostKey::Keypad0,
        HostKey::KeypadPeriod,
        HostKey::NonUsBackslash,
        HostKey::Application,
        HostKey::KeypadEquals,
        HostKey::F13,
        HostKey::F14,
        HostKey::F15,
        HostKey::F16,
        HostKey::F17,
        HostKey::F18,
        HostKey::F19,
        HostKey::F20,
        HostKey::F21,
        HostKey::F22,
        HostKey::F23,
        HostKey::F24,
        HostKey::LeftControl,
        HostKey::LeftShift,
        HostKey::LeftAlt,
        HostKey::LeftMeta,
        HostKey::RightControl,
        HostKey::RightShift,
        HostKey::RightAlt,
        HostKey::RightMeta,
    ];

    /// Scancode forwarded as both keycode and scancode in native key data.
    pub fn native_code(self) -> i32 {
        i32::from(self as u16)
    }
}
