//! Core abstractions for imbridge.
//!
//! This crate provides the types shared by the renderer and the input side:
//! - [`DrawData`] and friends, the GUI library's per-frame output
//! - [`GuiIo`], the event sink into the GUI library
//! - [`GraphicsDevice`] and [`RenderPass`], the device capabilities consumed
//! - Configuration options and the error type

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Pixel and element counts are bounded well below the cast limits
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

pub mod device;
pub mod draw;
pub mod error;
pub mod fonts;
pub mod io;
pub mod keys;
pub mod options;
pub mod texture;

pub use device::{
    AddressMode, BlendMode, BufferKind, DrawIndexed, FilterMode, GpuTexture, GraphicsDevice, IndexFormat,
    PipelineDescription, PrimitiveTopology, RenderPass, SamplerDescription, ScissorRect,
    ShaderSource, TextureFormat, VertexAttribute, VertexFormat, VertexLayout,
};
pub use draw::{pack_color, DrawCmd, DrawData, DrawIdx, DrawList, DrawListBuilder, DrawVert};
pub use error::{BridgeError, Result};
pub use fonts::{FontAtlas, FontAtlasPixels, FontAtlasSource};
pub use io::{
    BackendFlags, ClipboardBackend, GuiEvent, GuiIo, IoState, MemoryClipboard, NativeKeyData,
};
pub use keys::{GuiKey, MouseButton};
pub use options::{AdapterOptions, GrowthPolicy, ModifierPolicy};
pub use texture::TextureId;

// Re-export glam types for convenience
pub use glam::{Mat4, Vec2, Vec4};
