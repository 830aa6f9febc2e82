//! [`GraphicsDevice`] backend over wgpu.
//!
//! [`WgpuDevice`] wraps a `wgpu::Device` and its queue. Passes are opened with
//! [`WgpuDevice::begin_pass`], which borrows the device for as long as the pass
//! records, so resource transfers cannot interleave with draws.
//!
//! Pipelines use two bind groups: group 0 holds the vertex uniform block,
//! group 1 holds the texture at binding 0 and the sampler at binding 1.

mod convert;
mod pass;
mod surface;

pub use convert::{texture_format, texture_format_from_wgpu};
pub use pass::WgpuRenderPass;
pub use surface::{acquire_action, AcquireAction, WindowSurface};

use std::collections::HashMap;

use log::info;

use imbridge_core::{
    BridgeError, BufferKind, GpuTexture, GraphicsDevice, PipelineDescription, Result,
    SamplerDescription, TextureFormat, TextureId,
};

use crate::error::{RenderError, RenderResult};

/// A texture created by or wrapped into a [`WgpuDevice`].
///
/// Clones share the underlying wgpu texture.
#[derive(Debug, Clone)]
pub struct WgpuTexture {
    id: TextureId,
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl WgpuTexture {
    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }
}

impl GpuTexture for WgpuTexture {
    fn id(&self) -> TextureId {
        self.id
    }
}

/// A sampler plus the identity used to cache bind groups.
#[derive(Debug)]
pub struct WgpuSampler {
    id: u64,
    sampler: wgpu::Sampler,
}

/// A render pipeline and the uniform block its vertex stage reads.
#[derive(Debug)]
pub struct WgpuPipeline {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    uniform_size: u64,
}

/// Texture bind groups by `(texture, sampler)`, with the pass that last used them.
pub(crate) type BindGroupCache = HashMap<(TextureId, u64), (wgpu::BindGroup, u64)>;

/// The wgpu device backend.
pub struct WgpuDevice {
    device: wgpu::Device,
    queue: wgpu::Queue,
    uniform_layout: wgpu::BindGroupLayout,
    texture_layout: wgpu::BindGroupLayout,
    bind_groups: BindGroupCache,
    pass_index: u64,
    next_id: u64,
}

impl WgpuDevice {
    /// Wraps an existing device and queue.
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("imbridge uniform bind group layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("imbridge texture bind group layout"),
            entries: &[
                // Texture
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                // Sampler
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        Self {
            device,
            queue,
            uniform_layout,
            texture_layout,
            bind_groups: HashMap::new(),
            pass_index: 0,
            next_id: 0,
        }
    }

    /// Creates a device with no surface, for offscreen rendering.
    pub async fn new_headless() -> RenderResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..wgpu::InstanceDescriptor::default()
        });
        let (_adapter, device, queue) = request_device(&instance, None).await?;
        Ok(Self::new(device, queue))
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    fn alloc_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Adopts a texture rendered by the application so the GUI can draw it.
    pub fn wrap_texture(&mut self, texture: wgpu::Texture) -> WgpuTexture {
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        WgpuTexture {
            id: TextureId::new(self.alloc_id()),
            texture,
            view,
        }
    }

    /// Opens a pass that draws on top of `target`, or clears it first when
    /// `clear` is given.
    ///
    /// Texture bind groups not used by the previous pass are dropped here.
    pub fn begin_pass<'a>(
        &'a mut self,
        encoder: &'a mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        clear: Option<wgpu::Color>,
    ) -> WgpuRenderPass<'a> {
        let previous = self.pass_index;
        self.pass_index += 1;
        self.bind_groups.retain(|_, (_, used)| *used >= previous);

        let load = match clear {
            Some(color) => wgpu::LoadOp::Clear(color),
            None => wgpu::LoadOp::Load,
        };
        let pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("imbridge gui pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        WgpuRenderPass::new(
            pass,
            &self.device,
            &self.queue,
            &self.texture_layout,
            &mut self.bind_groups,
            self.pass_index,
        )
    }

    /// Number of cached texture bind groups.
    pub fn cached_bind_groups(&self) -> usize {
        self.bind_groups.len()
    }

    fn shader_module(&self, label: &str, code: &str) -> wgpu::ShaderModule {
        self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(code.into()),
        })
    }
}

/// Requests an adapter and a device from `instance`.
pub async fn request_device(
    instance: &wgpu::Instance,
    compatible_surface: Option<&wgpu::Surface<'_>>,
) -> RenderResult<(wgpu::Adapter, wgpu::Device, wgpu::Queue)> {
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface,
            force_fallback_adapter: false,
        })
        .await
        .map_err(|_| RenderError::AdapterCreationFailed)?;

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("imbridge device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: wgpu::MemoryHints::default(),
            trace: wgpu::Trace::default(),
            experimental_features: wgpu::ExperimentalFeatures::default(),
        })
        .await?;

    let info = adapter.get_info();
    info!("using adapter {} ({:?})", info.name, info.backend);
    Ok((adapter, device, queue))
}

impl GraphicsDevice for WgpuDevice {
    type Buffer = wgpu::Buffer;
    type Texture = WgpuTexture;
    type Sampler = WgpuSampler;
    type Pipeline = WgpuPipeline;

    fn create_buffer(&mut self, kind: BufferKind, size: u64) -> Result<wgpu::Buffer> {
        let (label, usage) = match kind {
            BufferKind::Vertex => ("imbridge vertex buffer", wgpu::BufferUsages::VERTEX),
            BufferKind::Index => ("imbridge index buffer", wgpu::BufferUsages::INDEX),
        };
        // Writes are padded to the copy alignment, so the buffer must be too.
        let size = size.max(1).next_multiple_of(wgpu::COPY_BUFFER_ALIGNMENT);
        Ok(self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }))
    }

    fn destroy_buffer(&mut self, buffer: wgpu::Buffer) {
        buffer.destroy();
    }

    fn write_buffer(&mut self, buffer: &wgpu::Buffer, offset: u64, data: &[u8]) -> Result<()> {
        if offset % wgpu::COPY_BUFFER_ALIGNMENT != 0 {
            return Err(BridgeError::UnalignedWrite {
                offset,
                alignment: wgpu::COPY_BUFFER_ALIGNMENT,
            });
        }
        let len = data.len() as u64;
        let padded = len.next_multiple_of(wgpu::COPY_BUFFER_ALIGNMENT);
        if offset + padded > buffer.size() {
            return Err(BridgeError::WriteOutOfBounds {
                offset,
                len,
                size: buffer.size(),
            });
        }
        if padded == len {
            self.queue.write_buffer(buffer, offset, data);
        } else {
            let mut staged = data.to_vec();
            staged.resize(padded as usize, 0);
            self.queue.write_buffer(buffer, offset, &staged);
        }
        Ok(())
    }

    fn create_texture(&mut self, width: u32, height: u32, format: TextureFormat) -> Result<WgpuTexture> {
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("imbridge texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: convert::texture_format(format),
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        Ok(self.wrap_texture(texture))
    }

    fn upload_texture(&mut self, texture: &WgpuTexture, pixels: &[u8]) -> Result<()> {
        let size = texture.texture.size();
        let bytes_per_row = size.width * 4;
        let expected = bytes_per_row as usize * size.height as usize;
        if pixels.len() != expected {
            return Err(BridgeError::InvalidTextureData {
                expected,
                actual: pixels.len(),
            });
        }
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(size.height),
            },
            size,
        );
        Ok(())
    }

    fn destroy_texture(&mut self, texture: WgpuTexture) {
        self.bind_groups.retain(|(id, _), _| *id != texture.id);
        texture.texture.destroy();
    }

    fn create_sampler(&mut self, desc: &SamplerDescription) -> Result<WgpuSampler> {
        let address_mode = convert::address_mode(desc.address_mode);
        let sampler = self.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("imbridge sampler"),
            address_mode_u: address_mode,
            address_mode_v: address_mode,
            address_mode_w: address_mode,
            mag_filter: convert::filter_mode(desc.mag_filter),
            min_filter: convert::filter_mode(desc.min_filter),
            mipmap_filter: convert::filter_mode(desc.mipmap_filter),
            ..Default::default()
        });
        Ok(WgpuSampler {
            id: self.alloc_id(),
            sampler,
        })
    }

    fn destroy_sampler(&mut self, sampler: WgpuSampler) {
        self.bind_groups.retain(|(_, id), _| *id != sampler.id);
    }

    fn create_pipeline(&mut self, desc: &PipelineDescription) -> Result<WgpuPipeline> {
        if desc.depth_test {
            return Err(BridgeError::Device(
                "GUI passes have no depth attachment".to_string(),
            ));
        }

        self.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let vertex_module = self.shader_module("imbridge vertex shader", &desc.vertex_shader.code);
        let fragment_module = if desc.fragment_shader.code == desc.vertex_shader.code {
            vertex_module.clone()
        } else {
            self.shader_module("imbridge fragment shader", &desc.fragment_shader.code)
        };

        let pipeline_layout = self.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("imbridge pipeline layout"),
            bind_group_layouts: &[&self.uniform_layout, &self.texture_layout],
            push_constant_ranges: &[],
        });

        let attributes: Vec<wgpu::VertexAttribute> = desc
            .vertex_layout
            .attributes
            .iter()
            .map(|a| wgpu::VertexAttribute {
                format: convert::vertex_format(a.format),
                offset: a.offset,
                shader_location: a.location,
            })
            .collect();

        let pipeline = self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(desc.label.as_ref()),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some(desc.vertex_shader.entry_point.as_ref()),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: desc.vertex_layout.stride,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &attributes,
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some(desc.fragment_shader.entry_point.as_ref()),
                targets: &[Some(wgpu::ColorTargetState {
                    format: convert::texture_format(desc.color_format),
                    blend: convert::blend_state(desc.blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: convert::topology(desc.topology),
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: desc.sample_count,
                ..Default::default()
            },
            multiview: None,
            cache: None,
        });

        if let Some(err) = pollster::block_on(self.device.pop_error_scope()) {
            return Err(RenderError::ShaderCompilationFailed(err.to_string()).into());
        }

        // Uniform bindings are sized in 16-byte units.
        let uniform_size = desc.vertex_uniform_size.max(16).next_multiple_of(16);
        let uniform_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("imbridge uniform buffer"),
            size: uniform_size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let uniform_bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("imbridge uniform bind group"),
            layout: &self.uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        info!("built pipeline '{}'", desc.label);
        Ok(WgpuPipeline {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            uniform_size: desc.vertex_uniform_size,
        })
    }

    fn destroy_pipeline(&mut self, pipeline: WgpuPipeline) {
        pipeline.uniform_buffer.destroy();
    }
}
