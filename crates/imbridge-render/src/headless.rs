//! A recording graphics device that needs no GPU.
//!
//! [`HeadlessDevice`] keeps buffer and texture contents in memory and logs
//! every call, and [`HeadlessPass`] records pass commands. Use it to drive the
//! renderer in tests and batch tools, then inspect what would have reached the
//! GPU. Writes follow the same rules as the wgpu backend: offsets must be
//! 4-byte aligned and stay within the buffer.

use std::collections::HashMap;

use imbridge_core::{
    BridgeError, BufferKind, DrawIndexed, GpuTexture, GraphicsDevice, IndexFormat,
    PipelineDescription, RenderPass, Result, SamplerDescription, ScissorRect, TextureFormat,
    TextureId,
};

/// Alignment required of buffer write offsets.
pub const WRITE_ALIGNMENT: u64 = 4;

/// Handle to a headless buffer.
#[derive(Debug, PartialEq, Eq)]
pub struct HeadlessBuffer {
    pub id: u64,
    pub kind: BufferKind,
    pub size: u64,
}

/// Handle to a headless texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessTexture {
    pub id: u64,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

impl GpuTexture for HeadlessTexture {
    fn id(&self) -> TextureId {
        TextureId::new(self.id)
    }
}

/// Handle to a headless sampler.
#[derive(Debug, PartialEq, Eq)]
pub struct HeadlessSampler {
    pub id: u64,
    pub desc: SamplerDescription,
}

/// Handle to a headless pipeline.
#[derive(Debug, PartialEq, Eq)]
pub struct HeadlessPipeline {
    pub id: u64,
    pub desc: PipelineDescription,
}

/// A resource call made on the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCall {
    CreateBuffer { id: u64, kind: BufferKind, size: u64 },
    DestroyBuffer { id: u64 },
    WriteBuffer { id: u64, offset: u64, len: u64 },
    CreateTexture { id: u64, width: u32, height: u32 },
    UploadTexture { id: u64, len: u64 },
    DestroyTexture { id: u64 },
    CreateSampler { id: u64 },
    DestroySampler { id: u64 },
    CreatePipeline { id: u64 },
    DestroyPipeline { id: u64 },
}

/// A command recorded inside a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassCommand {
    BindPipeline { pipeline: u64 },
    BindVertexBuffer { buffer: u64 },
    BindIndexBuffer { buffer: u64, format: IndexFormat },
    BindTextureSampler { texture: TextureId, sampler: u64 },
    SetScissor(ScissorRect),
    PushVertexUniforms(Vec<u8>),
    DrawIndexed(DrawIndexed),
}

/// In-memory device that records what it is asked to do.
#[derive(Debug, Default)]
pub struct HeadlessDevice {
    next_id: u64,
    buffers: HashMap<u64, Vec<u8>>,
    textures: HashMap<u64, Vec<u8>>,
    samplers: usize,
    pipelines: usize,
    calls: Vec<DeviceCall>,
    passes: Vec<Vec<PassCommand>>,
    fail_allocations: bool,
}

impl HeadlessDevice {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Makes every subsequent buffer and texture creation fail.
    pub fn set_fail_allocations(&mut self, fail: bool) {
        self.fail_allocations = fail;
    }

    /// Starts recording a pass. The device stays borrowed until it ends.
    pub fn begin_pass(&mut self) -> HeadlessPass<'_> {
        HeadlessPass {
            device: self,
            commands: Vec::new(),
            uniform_size: None,
        }
    }

    /// Resource calls made so far, oldest first.
    pub fn calls(&self) -> &[DeviceCall] {
        &self.calls
    }

    /// Forgets the call log.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Commands of every finished pass, oldest first.
    pub fn passes(&self) -> &[Vec<PassCommand>] {
        &self.passes
    }

    /// Commands of the most recently finished pass.
    pub fn last_pass(&self) -> Option<&[PassCommand]> {
        self.passes.last().map(Vec::as_slice)
    }

    /// Current contents of a live buffer.
    pub fn buffer_data(&self, buffer: &HeadlessBuffer) -> Option<&[u8]> {
        self.buffers.get(&buffer.id).map(Vec::as_slice)
    }

    /// Current pixels of a live texture.
    pub fn texture_data(&self, texture: &HeadlessTexture) -> Option<&[u8]> {
        self.textures.get(&texture.id).map(Vec::as_slice)
    }

    pub fn live_buffers(&self) -> usize {
        self.buffers.len()
    }

    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    pub fn live_samplers(&self) -> usize {
        self.samplers
    }

    pub fn live_pipelines(&self) -> usize {
        self.pipelines
    }
}

impl GraphicsDevice for HeadlessDevice {
    type Buffer = HeadlessBuffer;
    type Texture = HeadlessTexture;
    type Sampler = HeadlessSampler;
    type Pipeline = HeadlessPipeline;

    fn create_buffer(&mut self, kind: BufferKind, size: u64) -> Result<HeadlessBuffer> {
        if self.fail_allocations {
            return Err(BridgeError::Device(format!("cannot allocate {size} byte buffer")));
        }
        let id = self.alloc_id();
        self.buffers.insert(id, vec![0; size as usize]);
        self.calls.push(DeviceCall::CreateBuffer { id, kind, size });
        Ok(HeadlessBuffer { id, kind, size })
    }

    fn destroy_buffer(&mut self, buffer: HeadlessBuffer) {
        self.buffers.remove(&buffer.id);
        self.calls.push(DeviceCall::DestroyBuffer { id: buffer.id });
    }

    fn write_buffer(&mut self, buffer: &HeadlessBuffer, offset: u64, data: &[u8]) -> Result<()> {
        if offset % WRITE_ALIGNMENT != 0 {
            return Err(BridgeError::UnalignedWrite {
                offset,
                alignment: WRITE_ALIGNMENT,
            });
        }
        let contents = self
            .buffers
            .get_mut(&buffer.id)
            .ok_or_else(|| BridgeError::Device(format!("buffer {} was destroyed", buffer.id)))?;
        let len = data.len() as u64;
        if offset + len > buffer.size {
            return Err(BridgeError::WriteOutOfBounds {
                offset,
                len,
                size: buffer.size,
            });
        }
        let start = offset as usize;
        contents[start..start + data.len()].copy_from_slice(data);
        self.calls.push(DeviceCall::WriteBuffer {
            id: buffer.id,
            offset,
            len,
        });
        Ok(())
    }

    fn create_texture(&mut self, width: u32, height: u32, format: TextureFormat) -> Result<HeadlessTexture> {
        if self.fail_allocations {
            return Err(BridgeError::Device(format!("cannot allocate {width}x{height} texture")));
        }
        let id = self.alloc_id();
        let size = width as usize * height as usize * format.block_size() as usize;
        self.textures.insert(id, vec![0; size]);
        self.calls.push(DeviceCall::CreateTexture { id, width, height });
        Ok(HeadlessTexture {
            id,
            width,
            height,
            format,
        })
    }

    fn upload_texture(&mut self, texture: &HeadlessTexture, pixels: &[u8]) -> Result<()> {
        let contents = self
            .textures
            .get_mut(&texture.id)
            .ok_or_else(|| BridgeError::Device(format!("texture {} was destroyed", texture.id)))?;
        if pixels.len() != contents.len() {
            return Err(BridgeError::InvalidTextureData {
                expected: contents.len(),
                actual: pixels.len(),
            });
        }
        contents.copy_from_slice(pixels);
        self.calls.push(DeviceCall::UploadTexture {
            id: texture.id,
            len: pixels.len() as u64,
        });
        Ok(())
    }

    fn destroy_texture(&mut self, texture: HeadlessTexture) {
        self.textures.remove(&texture.id);
        self.calls.push(DeviceCall::DestroyTexture { id: texture.id });
    }

    fn create_sampler(&mut self, desc: &SamplerDescription) -> Result<HeadlessSampler> {
        let id = self.alloc_id();
        self.samplers += 1;
        self.calls.push(DeviceCall::CreateSampler { id });
        Ok(HeadlessSampler { id, desc: *desc })
    }

    fn destroy_sampler(&mut self, sampler: HeadlessSampler) {
        self.samplers = self.samplers.saturating_sub(1);
        self.calls.push(DeviceCall::DestroySampler { id: sampler.id });
    }

    fn create_pipeline(&mut self, desc: &PipelineDescription) -> Result<HeadlessPipeline> {
        let id = self.alloc_id();
        self.pipelines += 1;
        self.calls.push(DeviceCall::CreatePipeline { id });
        Ok(HeadlessPipeline {
            id,
            desc: desc.clone(),
        })
    }

    fn destroy_pipeline(&mut self, pipeline: HeadlessPipeline) {
        self.pipelines = self.pipelines.saturating_sub(1);
        self.calls.push(DeviceCall::DestroyPipeline { id: pipeline.id });
    }
}

/// A pass being recorded on a [`HeadlessDevice`].
///
/// Commands are stored on the device when the pass is dropped.
#[derive(Debug)]
pub struct HeadlessPass<'a> {
    device: &'a mut HeadlessDevice,
    commands: Vec<PassCommand>,
    uniform_size: Option<u64>,
}

impl HeadlessPass<'_> {
    /// Commands recorded so far in this pass.
    pub fn commands(&self) -> &[PassCommand] {
        &self.commands
    }
}

impl Drop for HeadlessPass<'_> {
    fn drop(&mut self) {
        let commands = std::mem::take(&mut self.commands);
        self.device.passes.push(commands);
    }
}

impl RenderPass<HeadlessDevice> for HeadlessPass<'_> {
    fn bind_pipeline(&mut self, pipeline: &HeadlessPipeline) {
        self.uniform_size = Some(pipeline.desc.vertex_uniform_size);
        self.commands.push(PassCommand::BindPipeline { pipeline: pipeline.id });
    }

    fn bind_vertex_buffer(&mut self, buffer: &HeadlessBuffer) {
        self.commands.push(PassCommand::BindVertexBuffer { buffer: buffer.id });
    }

    fn bind_index_buffer(&mut self, buffer: &HeadlessBuffer, format: IndexFormat) {
        self.commands.push(PassCommand::BindIndexBuffer {
            buffer: buffer.id,
            format,
        });
    }

    fn bind_texture_sampler(&mut self, texture: &HeadlessTexture, sampler: &HeadlessSampler) {
        self.commands.push(PassCommand::BindTextureSampler {
            texture: texture.id(),
            sampler: sampler.id,
        });
    }

    fn set_scissor(&mut self, rect: ScissorRect) {
        self.commands.push(PassCommand::SetScissor(rect));
    }

    fn push_vertex_uniforms(&mut self, data: &[u8]) -> Result<()> {
        let expected = self
            .uniform_size
            .ok_or_else(|| BridgeError::Device("uniforms pushed with no pipeline bound".into()))?;
        if data.len() as u64 != expected {
            return Err(BridgeError::UniformSize {
                expected,
                actual: data.len() as u64,
            });
        }
        self.commands.push(PassCommand::PushVertexUniforms(data.to_vec()));
        Ok(())
    }

    fn draw_indexed(&mut self, draw: DrawIndexed) {
        self.commands.push(PassCommand::DrawIndexed(draw));
    }
}
