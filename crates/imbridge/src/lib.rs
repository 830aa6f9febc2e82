//! imbridge: a backend adapter between an immediate-mode GUI library and a
//! host application.
//!
//! Each frame the adapter does two jobs:
//!
//! - **Input bridging.** The host's mouse and keyboard state is sampled into an
//!   [`InputSnapshot`], and only the changes since the previous tick are
//!   forwarded as [`GuiEvent`]s.
//! - **Draw translation.** The GUI's [`DrawData`] is copied into GPU vertex
//!   and index buffers that grow on demand. Each [`DrawCmd`] then becomes one
//!   clipped, textured indexed draw.
//!
//! # Quick Start
//!
//! ```no_run
//! use imbridge::app::{run, AppConfig, GuiApplication};
//! use imbridge::*;
//!
//! struct Hello {
//!     fonts: FontAtlas,
//! }
//!
//! impl GuiApplication for Hello {
//!     fn font_atlas(&mut self) -> &mut FontAtlas {
//!         &mut self.fonts
//!     }
//!
//!     fn frame(&mut self, io: &mut IoState) -> DrawData {
//!         io.drain_events();
//!         let Some(font) = self.fonts.texture_id() else {
//!             return DrawData::new(io.display_size);
//!         };
//!         let mut builder = DrawListBuilder::new(font, self.fonts.white_uv());
//!         builder.add_rect_filled(Vec2::new(20.0, 20.0), Vec2::new(200.0, 80.0), pack_color([200, 60, 60, 255]));
//!         let mut draw = DrawData::new(io.display_size);
//!         draw.lists.push(builder.build());
//!         draw
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!     run(Hello { fonts: FontAtlas::white(1, 1) }, AppConfig::default())
//! }
//! ```
//!
//! # Crates
//!
//! - `imbridge-core`: draw data, I/O, device traits, options, errors
//! - `imbridge-render`: texture registry, draw translator, wgpu and headless devices
//! - `imbridge-input`: host keys, snapshots, the input bridge, winit and clipboard glue

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod adapter;
pub mod app;
mod init;

pub use adapter::GuiAdapter;
pub use init::init_logging;

// Re-export core types
pub use imbridge_core::{
    pack_color, AdapterOptions, BackendFlags, BridgeError, ClipboardBackend, DrawCmd, DrawData, DrawIdx,
    DrawList, DrawListBuilder, DrawVert, FontAtlas, FontAtlasPixels, FontAtlasSource, GraphicsDevice,
    GrowthPolicy, GuiEvent, GuiIo, GuiKey, IoState, MemoryClipboard, ModifierPolicy, MouseButton,
    NativeKeyData, RenderPass, Result, SamplerDescription, ScissorRect, TextureFormat, TextureId,
};
pub use imbridge_core::{Mat4, Vec2, Vec4};

// Re-export render types
pub use imbridge_render::{
    clamp_scissor, headless, GuiRenderer, TextureRegistry, WgpuDevice, WgpuTexture, WindowSurface,
};

// Re-export input types
pub use imbridge_input::{to_gui_key, HostKey, InputBridge, InputSnapshot, KeyboardState, MouseState, WinitInput};
