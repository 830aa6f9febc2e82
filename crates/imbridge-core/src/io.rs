//! The GUI library's I/O state, seen from the backend.
//!
//! Backends never poke at GUI internals directly: they push [`GuiEvent`]s and
//! a handful of per-frame values through the [`GuiIo`] trait. [`IoState`] is
//! a plain in-memory implementation that queues events, used for headless
//! runs and tests.

use std::fmt;

use bitflags::bitflags;

use crate::keys::{GuiKey, MouseButton};

bitflags! {
    /// Capabilities a backend advertises to the GUI library.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct BackendFlags: u32 {
        /// The renderer honours `DrawCmd::vtx_offset`, allowing lists over 64k vertices.
        const RENDERER_HAS_VTX_OFFSET = 1 << 3;
    }
}

/// Native codes carried alongside a key event for the GUI library's own
/// re-mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeKeyData {
    pub keycode: i32,
    pub scancode: i32,
}

/// An input event queued into the GUI library.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GuiEvent {
    /// Absolute mouse position in screen pixels.
    MousePos { x: f32, y: f32 },
    /// Wheel delta for this tick.
    MouseWheel { horizontal: f32, vertical: f32 },
    /// A mouse button changed state.
    MouseButton { button: MouseButton, down: bool },
    /// A key changed state.
    Key {
        key: GuiKey,
        down: bool,
        native: Option<NativeKeyData>,
    },
    /// A text input character.
    Char(char),
}

/// OS clipboard access.
pub trait ClipboardBackend {
    /// Returns the clipboard text, if any.
    fn get(&mut self) -> Option<String>;
    /// Replaces the clipboard text.
    fn set(&mut self, text: &str);
}

/// Clipboard that lives only in process memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl ClipboardBackend for MemoryClipboard {
    fn get(&mut self) -> Option<String> {
        self.text.clone()
    }

    fn set(&mut self, text: &str) {
        self.text = Some(text.to_owned());
    }
}

/// The I/O surface of a GUI context.
pub trait GuiIo {
    /// Sets the time elapsed since the previous frame.
    fn set_delta_time(&mut self, seconds: f32);
    /// Sets the display size in screen pixels.
    fn set_display_size(&mut self, width: f32, height: f32);
    /// Queues an input event.
    fn add_event(&mut self, event: GuiEvent);
    /// Advertises backend capabilities.
    fn add_backend_flags(&mut self, flags: BackendFlags);
    /// Installs the clipboard used for copy/paste.
    fn set_clipboard(&mut self, clipboard: Box<dyn ClipboardBackend>);
}

/// In-memory GUI I/O state.
#[derive(Default)]
pub struct IoState {
    pub delta_time: f32,
    pub display_size: [f32; 2],
    pub backend_flags: BackendFlags,
    events: Vec<GuiEvent>,
    clipboard: Option<Box<dyn ClipboardBackend>>,
}

impl IoState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events queued since the last drain.
    pub fn events(&self) -> &[GuiEvent] {
        &self.events
    }

    /// Removes and returns all queued events.
    pub fn drain_events(&mut self) -> Vec<GuiEvent> {
        std::mem::take(&mut self.events)
    }

    /// Reads the clipboard through the installed backend.
    pub fn clipboard_text(&mut self) -> Option<String> {
        self.clipboard.as_mut().and_then(|c| c.get())
    }

    /// Writes the clipboard through the installed backend.
    pub fn set_clipboard_text(&mut self, text: &str) {
        if let Some(clipboard) = self.clipboard.as_mut() {
            clipboard.set(text);
        }
    }
}

impl fmt::Debug for IoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IoState")
            .field("delta_time", &self.delta_time)
            .field("display_size", &self.display_size)
            .field("backend_flags", &self.backend_flags)
            .field("events", &self.events.len())
            .field("clipboard", &self.clipboard.is_some())
            .finish()
    }
}

impl GuiIo for IoState {
    fn set_delta_time(&mut self, seconds: f32) {
        self.delta_time = seconds;
    }

    fn set_display_size(&mut self, width: f32, height: f32) {
        self.display_size = [width, height];
    }

    fn add_event(&mut self, event: GuiEvent) {
        self.events.push(event);
    }

    fn add_backend_flags(&mut self, flags: BackendFlags) {
        self.backend_flags |= flags;
    }

    fn set_clipboard(&mut self, clipboard: Box<dyn ClipboardBackend>) {
        self.clipboard = Some(clipboard);
    }
}
