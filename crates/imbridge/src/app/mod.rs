//! A ready-made winit window running one GUI application over wgpu.
//!
//! Implement [`GuiApplication`] and hand it to [`run`]. The runner owns the
//! window, the device and the [`GuiAdapter`], and drives one frame per redraw.

mod handler;

use std::sync::Arc;
use std::time::Instant;

use winit::event_loop::EventLoop;
use winit::window::Window;

use imbridge_core::{AdapterOptions, BridgeError, DrawData, FontAtlas, IoState, Result};
use imbridge_input::WinitInput;
use imbridge_render::{WgpuDevice, WindowSurface};

use crate::adapter::GuiAdapter;

/// The GUI side of a windowed application.
pub trait GuiApplication {
    /// Font atlas uploaded when the window opens.
    fn font_atlas(&mut self) -> &mut FontAtlas;

    /// Called once the device and adapter exist. Create and bind user
    /// textures here.
    fn setup(&mut self, _adapter: &mut GuiAdapter<WgpuDevice>, _device: &mut WgpuDevice) -> Result<()> {
        Ok(())
    }

    /// Builds one frame. Input forwarded this tick is queued in `io`.
    fn frame(&mut self, io: &mut IoState) -> DrawData;

    /// Called before the device resources are released.
    fn shutdown(&mut self, _adapter: &mut GuiAdapter<WgpuDevice>, _device: &mut WgpuDevice) {}
}

/// Window and adapter settings for [`run`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    /// Inner size in logical pixels.
    pub size: [u32; 2],
    /// Clear color, linear RGBA.
    pub clear_color: [f64; 4],
    pub options: AdapterOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "imbridge".to_string(),
            size: [1280, 720],
            clear_color: [0.1, 0.1, 0.12, 1.0],
            options: AdapterOptions::default(),
        }
    }
}

/// Window, device and adapter, created on first resume.
struct Gpu {
    window: Arc<Window>,
    surface: WindowSurface,
    device: WgpuDevice,
    adapter: GuiAdapter<WgpuDevice>,
}

/// Runner state.
struct App<A: GuiApplication> {
    app: A,
    config: AppConfig,
    gpu: Option<Gpu>,
    io: IoState,
    input: WinitInput,
    last_frame: Instant,
    error: Option<BridgeError>,
}

impl<A: GuiApplication> App<A> {
    fn new(app: A, config: AppConfig) -> Self {
        Self {
            app,
            config,
            gpu: None,
            io: IoState::new(),
            input: WinitInput::new(),
            last_frame: Instant::now(),
            error: None,
        }
    }
}

/// Opens a window and runs `app` until the window closes.
///
/// Returns the first error that stopped the loop, if any.
///
/// # Example
///
/// ```no_run
/// use imbridge::app::{run, AppConfig, GuiApplication};
/// use imbridge::{DrawData, FontAtlas, IoState};
///
/// struct Blank(FontAtlas);
///
/// impl GuiApplication for Blank {
///     fn font_atlas(&mut self) -> &mut FontAtlas {
///         &mut self.0
///     }
///     fn frame(&mut self, io: &mut IoState) -> DrawData {
///         io.drain_events();
///         DrawData::new(io.display_size)
///     }
/// }
///
/// run(Blank(FontAtlas::white(1, 1)), AppConfig::default()).unwrap();
/// ```
pub fn run<A: GuiApplication>(app: A, config: AppConfig) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|e| BridgeError::Device(format!("event loop: {e}")))?;
    let mut app = App::new(app, config);
    event_loop
        .run_app(&mut app)
        .map_err(|e| BridgeError::Device(format!("event loop: {e}")))?;
    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
