//! Input side of imbridge.
//!
//! Host input is sampled into an [`InputSnapshot`] once per tick and handed to
//! an [`InputBridge`], which forwards the differences to the GUI library as
//! [`GuiEvent`](imbridge_core::GuiEvent)s. [`WinitInput`] builds snapshots
//! from winit window events.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]

pub mod bridge;
pub mod clipboard;
pub mod host_key;
pub mod keymap;
pub mod snapshot;
pub mod winit_input;

pub use bridge::InputBridge;
pub use clipboard::ArboardClipboard;
pub use host_key::HostKey;
pub use keymap::to_gui_key;
pub use snapshot::{InputSnapshot, KeyboardState, MouseState};
pub use winit_input::{host_key_from_winit, mouse_button_from_winit, WinitInput};
