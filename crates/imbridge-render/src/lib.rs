//! Rendering side of imbridge.
//!
//! This crate turns GUI draw data into device work:
//! - [`TextureRegistry`] maps texture handles to device textures
//! - [`DrawTranslator`] fills vertex and index buffers and plans the draws
//! - [`GuiRenderer`] ties them to a pipeline, a sampler and the font atlas
//! - [`headless`] records device calls without a GPU
//! - [`wgpu_backend`] implements the device traits over wgpu

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
// Buffer sizes and pixel coordinates are bounded well below the cast limits
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

pub mod error;
pub mod headless;
pub mod pipeline;
pub mod projection;
pub mod renderer;
pub mod texture_registry;
pub mod translator;
pub mod wgpu_backend;

pub use error::{RenderError, RenderResult};
pub use pipeline::{gui_pipeline_description, gui_vertex_layout, GuiShaders, GUI_SHADER_WGSL};
pub use projection::{ortho_projection, projection_bytes, PROJECTION_UNIFORM_SIZE};
pub use renderer::GuiRenderer;
pub use texture_registry::TextureRegistry;
pub use translator::{clamp_scissor, DrawTranslator, GpuBuffer, PlannedDraw};
pub use wgpu_backend::{acquire_action, AcquireAction, WgpuDevice, WgpuRenderPass, WgpuTexture, WindowSurface};
