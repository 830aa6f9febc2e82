use std::sync::Arc;
use std::time::Instant;

use log::{error, info};
use pollster::FutureExt;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use imbridge_core::{BridgeError, ClipboardBackend, Result};
use imbridge_input::ArboardClipboard;
use imbridge_render::WindowSurface;

use super::{App, Gpu, GuiApplication};
use crate::adapter::GuiAdapter;

impl<A: GuiApplication> App<A> {
    fn create_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<Gpu> {
        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.size[0], self.config.size[1]));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| BridgeError::Device(format!("failed to create window: {e}")))?,
        );

        let (surface, mut device) = WindowSurface::new(window.clone()).block_on()?;
        let clipboard = ArboardClipboard::try_new().map(|c| Box::new(c) as Box<dyn ClipboardBackend>);
        let mut adapter = GuiAdapter::new(
            &mut device,
            &mut self.io,
            self.app.font_atlas(),
            surface.format(),
            surface.size(),
            &self.config.options,
            clipboard,
        )?;
        if let Err(e) = self.app.setup(&mut adapter, &mut device) {
            adapter.destroy(&mut device);
            return Err(e);
        }

        Ok(Gpu {
            window,
            surface,
            device,
            adapter,
        })
    }

    /// Runs one tick: input, GUI frame, upload, render, present.
    fn redraw(&mut self) -> Result<()> {
        let Some(gpu) = self.gpu.as_mut() else {
            return Ok(());
        };
        if !gpu.surface.is_renderable() {
            self.last_frame = Instant::now();
            return Ok(());
        }

        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;

        let snapshot = self.input.take_snapshot();
        gpu.adapter.new_frame(&mut self.io, &snapshot, delta);
        let draw_data = self.app.frame(&mut self.io);
        gpu.adapter.upload(&mut gpu.device, &draw_data)?;

        let Some(frame) = gpu.surface.acquire(&gpu.device)? else {
            return Ok(());
        };
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu
            .device
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("imbridge frame encoder"),
            });

        let [r, g, b, a] = self.config.clear_color;
        {
            let mut pass = gpu
                .device
                .begin_pass(&mut encoder, &view, Some(wgpu::Color { r, g, b, a }));
            gpu.adapter.render(&mut pass)?;
        }

        gpu.device.queue().submit(std::iter::once(encoder.finish()));
        gpu.window.pre_present_notify();
        frame.present();
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, e: BridgeError) {
        error!("stopping: {e}");
        if self.error.is_none() {
            self.error = Some(e);
        }
        event_loop.exit();
    }
}

impl<A: GuiApplication> ApplicationHandler for App<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match self.create_gpu(event_loop) {
            Ok(gpu) => {
                info!("window opened at {}x{}", gpu.surface.size()[0], gpu.surface.size()[1]);
                gpu.window.request_redraw();
                self.last_frame = Instant::now();
                self.gpu = Some(gpu);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        for ch in self.input.handle_event(&event) {
            if let Some(gpu) = &self.gpu {
                gpu.adapter.text_input(&mut self.io, ch);
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.surface.resize(&gpu.device, size.width, size.height);
                    gpu.adapter.resize(&mut self.io, size.width, size.height);
                    gpu.window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    self.fail(event_loop, e);
                    return;
                }
                // A later non-zero resize requests the next redraw.
                if let Some(gpu) = self.gpu.as_ref().filter(|g| g.surface.is_renderable()) {
                    gpu.window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(mut gpu) = self.gpu.take() {
            self.app.shutdown(&mut gpu.adapter, &mut gpu.device);
            gpu.adapter.destroy(&mut gpu.device);
            info!("window closed");
        }
    }
}
