use std::sync::Arc;

use log::{info, warn};
use winit::window::Window;

use imbridge_core::TextureFormat;

use super::{convert, request_device, WgpuDevice};
use crate::error::{RenderError, RenderResult};

/// A window surface and the device that presents to it.
pub struct WindowSurface {
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    format: TextureFormat,
    minimized: bool,
}

impl WindowSurface {
    /// Creates a surface for `window` and a device able to present to it.
    ///
    /// GUI colors are already in sRGB, so a non-sRGB surface format is
    /// preferred when the adapter offers one.
    pub async fn new(window: Arc<Window>) -> RenderResult<(Self, WgpuDevice)> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..wgpu::InstanceDescriptor::default()
        });

        let surface = instance.create_surface(window.clone())?;
        let (adapter, device, queue) = request_device(&instance, Some(&surface)).await?;

        let caps = surface.get_capabilities(&adapter);
        let (wgpu_format, format) = caps
            .formats
            .iter()
            .filter_map(|f| convert::texture_format_from_wgpu(*f).map(|g| (*f, g)))
            .find(|(f, _)| !f.is_srgb())
            .or_else(|| {
                caps.formats
                    .iter()
                    .find_map(|f| convert::texture_format_from_wgpu(*f).map(|g| (*f, g)))
            })
            .ok_or(RenderError::SurfaceConfigurationFailed)?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .ok_or(RenderError::SurfaceConfigurationFailed)?;

        let size = window.inner_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: wgpu_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        info!(
            "surface configured: {:?}, {}x{}",
            wgpu_format, config.width, config.height
        );

        Ok((
            Self {
                surface,
                config,
                format,
                minimized: size.width == 0 || size.height == 0,
            },
            WgpuDevice::new(device, queue),
        ))
    }

    /// Format GUI pipelines must target.
    pub fn format(&self) -> TextureFormat {
        self.format
    }

    pub fn size(&self) -> [u32; 2] {
        [self.config.width, self.config.height]
    }

    /// Reconfigures the surface. A zero size marks the surface unrenderable
    /// until the next non-zero resize.
    pub fn resize(&mut self, device: &WgpuDevice, width: u32, height: u32) {
        if width == 0 || height == 0 {
            self.minimized = true;
            return;
        }
        self.minimized = false;
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(device.device(), &self.config);
    }

    /// False while the window has a zero-sized client area.
    pub fn is_renderable(&self) -> bool {
        !self.minimized
    }

    /// Acquires the next frame.
    ///
    /// Returns `Ok(None)` when this frame should be skipped: the surface went
    /// stale and was reconfigured, or acquisition timed out.
    pub fn acquire(&mut self, device: &WgpuDevice) -> RenderResult<Option<wgpu::SurfaceTexture>> {
        let err = match self.surface.get_current_texture() {
            Ok(frame) => return Ok(Some(frame)),
            Err(err) => err,
        };
        match acquire_action(&err) {
            AcquireAction::Reconfigure => {
                warn!("surface {err}, reconfiguring");
                self.surface.configure(device.device(), &self.config);
                Ok(None)
            }
            AcquireAction::Skip => {
                warn!("skipping frame: {err}");
                Ok(None)
            }
            AcquireAction::Fail => Err(err.into()),
        }
    }
}

/// How the runner reacts when the surface cannot hand out a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireAction {
    /// Reconfigure and try again next frame.
    Reconfigure,
    /// Drop this frame.
    Skip,
    /// Stop rendering.
    Fail,
}

pub fn acquire_action(err: &wgpu::SurfaceError) -> AcquireAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => AcquireAction::Reconfigure,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => AcquireAction::Skip,
        wgpu::SurfaceError::OutOfMemory => AcquireAction::Fail,
    }
}
