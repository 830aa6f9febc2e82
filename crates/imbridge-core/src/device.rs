//! The graphics device capabilities the renderer consumes.
//!
//! [`GraphicsDevice`] covers resource creation and transfers, which happen
//! outside a render pass. [`RenderPass`] covers state binding and draws, which
//! happen inside one. Keeping them on separate objects lets a backend enforce
//! the ordering with borrows: a pass holds the device for its lifetime.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::texture::TextureId;

/// What a buffer is bound as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    Vertex,
    Index,
}

/// Width of the elements in an index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexFormat {
    Uint16,
    Uint32,
}

impl IndexFormat {
    pub fn size(self) -> u64 {
        match self {
            IndexFormat::Uint16 => 2,
            IndexFormat::Uint32 => 4,
        }
    }
}

/// Color formats used for GUI textures and render targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureFormat {
    Rgba8Unorm,
    Rgba8UnormSrgb,
    Bgra8Unorm,
    Bgra8UnormSrgb,
}

impl TextureFormat {
    /// Bytes per texel.
    pub fn block_size(self) -> u32 {
        4
    }
}

/// Texel filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FilterMode {
    #[default]
    Nearest,
    Linear,
}

/// Texture coordinate wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AddressMode {
    #[default]
    ClampToEdge,
    Repeat,
    MirrorRepeat,
}

/// Sampler creation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SamplerDescription {
    pub min_filter: FilterMode,
    pub mag_filter: FilterMode,
    pub mipmap_filter: FilterMode,
    pub address_mode: AddressMode,
}

impl SamplerDescription {
    /// Nearest filtering, clamped coordinates.
    pub const POINT_CLAMP: Self = Self {
        min_filter: FilterMode::Nearest,
        mag_filter: FilterMode::Nearest,
        mipmap_filter: FilterMode::Nearest,
        address_mode: AddressMode::ClampToEdge,
    };
}

impl Default for SamplerDescription {
    fn default() -> Self {
        Self::POINT_CLAMP
    }
}

/// Primitive assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveTopology {
    #[default]
    TriangleList,
    TriangleStrip,
}

/// Color blending against the render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// No blending.
    Opaque,
    /// `src * src.a + dst * (1 - src.a)`.
    #[default]
    NonPremultiplied,
    /// `src + dst * (1 - src.a)`.
    Premultiplied,
}

/// Format of one vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexFormat {
    Float32x2,
    /// Four bytes normalized to `0.0..=1.0`.
    Unorm8x4,
}

/// One attribute inside a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexAttribute {
    pub location: u32,
    pub format: VertexFormat,
    pub offset: u64,
}

/// Layout of the single vertex buffer binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexLayout {
    pub stride: u64,
    pub attributes: Vec<VertexAttribute>,
}

/// Shader code in whatever form the backend consumes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShaderSource {
    pub code: Cow<'static, str>,
    pub entry_point: Cow<'static, str>,
}

impl ShaderSource {
    pub fn new(code: impl Into<Cow<'static, str>>, entry_point: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            entry_point: entry_point.into(),
        }
    }
}

/// Full description of a graphics pipeline.
///
/// Binding convention: the vertex stage reads one uniform block of
/// `vertex_uniform_size` bytes, the fragment stage samples one texture through
/// one sampler.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PipelineDescription {
    pub label: Cow<'static, str>,
    pub vertex_shader: ShaderSource,
    pub fragment_shader: ShaderSource,
    pub vertex_layout: VertexLayout,
    pub topology: PrimitiveTopology,
    pub color_format: TextureFormat,
    pub blend: BlendMode,
    pub depth_test: bool,
    pub sample_count: u32,
    pub vertex_uniform_size: u64,
}

/// Scissor rectangle in render target pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScissorRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// An indexed draw against the bound vertex and index buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawIndexed {
    /// Added to every index before fetching a vertex.
    pub base_vertex: u32,
    /// First index to read.
    pub first_index: u32,
    /// Number of triangles; three indices each.
    pub triangle_count: u32,
}

impl DrawIndexed {
    pub fn index_count(&self) -> u32 {
        self.triangle_count * 3
    }
}

/// A device texture that can be referenced from draw commands.
///
/// Clones refer to the same device texture and report the same identity.
pub trait GpuTexture: Clone {
    /// Device-native identity, stable for the texture's lifetime.
    fn id(&self) -> TextureId;
}

/// Resource creation and transfer operations.
///
/// None of these may be called while a render pass is recording.
pub trait GraphicsDevice {
    type Buffer;
    /// Textures are shared between the caller and the texture registry.
    type Texture: GpuTexture;
    type Sampler;
    type Pipeline;

    /// Creates a buffer of `size` bytes.
    fn create_buffer(&mut self, kind: BufferKind, size: u64) -> Result<Self::Buffer>;

    fn destroy_buffer(&mut self, buffer: Self::Buffer);

    /// Copies `data` into `buffer` starting at byte `offset`.
    fn write_buffer(&mut self, buffer: &Self::Buffer, offset: u64, data: &[u8]) -> Result<()>;

    fn create_texture(&mut self, width: u32, height: u32, format: TextureFormat) -> Result<Self::Texture>;

    /// Replaces the full contents of `texture`.
    fn upload_texture(&mut self, texture: &Self::Texture, pixels: &[u8]) -> Result<()>;

    fn destroy_texture(&mut self, texture: Self::Texture);

    fn create_sampler(&mut self, desc: &SamplerDescription) -> Result<Self::Sampler>;

    fn destroy_sampler(&mut self, sampler: Self::Sampler);

    fn create_pipeline(&mut self, desc: &PipelineDescription) -> Result<Self::Pipeline>;

    fn destroy_pipeline(&mut self, pipeline: Self::Pipeline);
}

/// Commands recorded inside an active render pass.
pub trait RenderPass<D: GraphicsDevice + ?Sized> {
    fn bind_pipeline(&mut self, pipeline: &D::Pipeline);

    fn bind_vertex_buffer(&mut self, buffer: &D::Buffer);

    fn bind_index_buffer(&mut self, buffer: &D::Buffer, format: IndexFormat);

    fn bind_texture_sampler(&mut self, texture: &D::Texture, sampler: &D::Sampler);

    fn set_scissor(&mut self, rect: ScissorRect);

    /// Supplies the vertex stage's uniform block for subsequent draws.
    fn push_vertex_uniforms(&mut self, data: &[u8]) -> Result<()>;

    fn draw_indexed(&mut self, draw: DrawIndexed);
}
