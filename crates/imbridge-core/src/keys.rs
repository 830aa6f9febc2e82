//! Key and mouse button identifiers understood by the GUI library.

use serde::{Deserialize, Serialize};

/// Keys in the GUI library's key space.
///
/// `None` is the sentinel for host keys without a GUI counterpart; such keys
/// are still forwarded together with their native codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GuiKey {
    #[default]
    None,
    Tab,
    LeftArrow,
    RightArrow,
    UpArrow,
    DownArrow,
    PageUp,
    PageDown,
    Home,
    End,
    Insert,
    Delete,
    Backspace,
    Space,
    Enter,
    Escape,
    LeftCtrl,
    LeftShift,
    LeftAlt,
    LeftSuper,
    RightCtrl,
    RightShift,
    RightAlt,
    RightSuper,
    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Apostrophe,
    Comma,
    Minus,
    Period,
    Slash,
    Semicolon,
    Equal,
    LeftBracket,
    Backslash,
    RightBracket,
    GraveAccent,
    CapsLock,
    ScrollLock,
    NumLock,
    PrintScreen,
    Pause,
    Keypad0,
    Keypad1,
    Keypad2,
    Keypad3,
    Keypad4,
    Keypad5,
    Keypad6,
    Keypad7,
    Keypad8,
    Keypad9,
    KeypadDecimal,
    KeypadDivide,
    KeypadMultiply,
    KeypadSubtract,
    KeypadAdd,
    /// Aggregate ctrl state (either side).
    ModCtrl,
    /// Aggregate shift state (either side).
    ModShift,
    /// Aggregate alt state (either side).
    ModAlt,
    /// Aggregate super/meta state (either side).
    ModSuper,
}

impl GuiKey {
    /// The four aggregate modifier keys, in emission order.
    pub const MODIFIERS: [GuiKey; 4] = [
        GuiKey::ModCtrl,
        GuiKey::ModShift,
        GuiKey::ModAlt,
        GuiKey::ModSuper,
    ];

    /// Returns true for the aggregate modifier keys.
    pub fn is_modifier(self) -> bool {
        Self::MODIFIERS.contains(&self)
    }
}

/// Mouse buttons in the GUI library's numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left = 0,
    Right = 1,
    Middle = 2,
}

impl MouseButton {
    /// All buttons, in emission order.
    pub const ALL: [MouseButton; 3] = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

    /// Button index as the GUI library numbers it.
    pub fn index(self) -> usize {
        self as usize
    }
}
