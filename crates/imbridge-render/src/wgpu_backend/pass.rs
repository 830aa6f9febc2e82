use imbridge_core::{
    BridgeError, DrawIndexed, GpuTexture, IndexFormat, RenderPass, Result, ScissorRect,
};

use super::{convert, BindGroupCache, WgpuDevice, WgpuPipeline, WgpuSampler, WgpuTexture};

/// An open wgpu render pass.
///
/// Created by [`WgpuDevice::begin_pass`]; the pass ends when this is dropped.
pub struct WgpuRenderPass<'a> {
    pass: wgpu::RenderPass<'a>,
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
    texture_layout: &'a wgpu::BindGroupLayout,
    bind_groups: &'a mut BindGroupCache,
    pass_index: u64,
    /// Uniform block of the bound pipeline
    uniforms: Option<(wgpu::Buffer, wgpu::BindGroup, u64)>,
}

impl<'a> WgpuRenderPass<'a> {
    pub(super) fn new(
        pass: wgpu::RenderPass<'a>,
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        texture_layout: &'a wgpu::BindGroupLayout,
        bind_groups: &'a mut BindGroupCache,
        pass_index: u64,
    ) -> Self {
        Self {
            pass,
            device,
            queue,
            texture_layout,
            bind_groups,
            pass_index,
            uniforms: None,
        }
    }

    /// The underlying wgpu pass, for drawing application content in the same pass.
    pub fn raw(&mut self) -> &mut wgpu::RenderPass<'a> {
        &mut self.pass
    }
}

impl RenderPass<WgpuDevice> for WgpuRenderPass<'_> {
    fn bind_pipeline(&mut self, pipeline: &WgpuPipeline) {
        self.pass.set_pipeline(&pipeline.pipeline);
        self.uniforms = Some((
            pipeline.uniform_buffer.clone(),
            pipeline.uniform_bind_group.clone(),
            pipeline.uniform_size,
        ));
    }

    fn bind_vertex_buffer(&mut self, buffer: &wgpu::Buffer) {
        self.pass.set_vertex_buffer(0, buffer.slice(..));
    }

    fn bind_index_buffer(&mut self, buffer: &wgpu::Buffer, format: IndexFormat) {
        self.pass
            .set_index_buffer(buffer.slice(..), convert::index_format(format));
    }

    fn bind_texture_sampler(&mut self, texture: &WgpuTexture, sampler: &WgpuSampler) {
        let key = (texture.id(), sampler.id);
        let pass_index = self.pass_index;
        let (device, layout) = (self.device, self.texture_layout);
        let (bind_group, used) = self.bind_groups.entry(key).or_insert_with(|| {
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("imbridge texture bind group"),
                layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&texture.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&sampler.sampler),
                    },
                ],
            });
            (bind_group, pass_index)
        });
        *used = pass_index;
        self.pass.set_bind_group(1, &*bind_group, &[]);
    }

    fn set_scissor(&mut self, rect: ScissorRect) {
        self.pass
            .set_scissor_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn push_vertex_uniforms(&mut self, data: &[u8]) -> Result<()> {
        let (buffer, bind_group, size) = self
            .uniforms
            .as_ref()
            .ok_or_else(|| BridgeError::Device("uniforms pushed with no pipeline bound".into()))?;
        if data.len() as u64 != *size {
            return Err(BridgeError::UniformSize {
                expected: *size,
                actual: data.len() as u64,
            });
        }
        self.queue.write_buffer(buffer, 0, data);
        self.pass.set_bind_group(0, bind_group, &[]);
        Ok(())
    }

    fn draw_indexed(&mut self, draw: DrawIndexed) {
        let first = draw.first_index;
        self.pass.draw_indexed(
            first..first + draw.index_count(),
            draw.base_vertex as i32,
            0..1,
        );
    }
}
