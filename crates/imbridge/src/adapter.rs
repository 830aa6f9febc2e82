//! The backend adapter: input bridge and renderer behind one handle.

use std::time::Duration;

use log::info;

use imbridge_core::{
    AdapterOptions, BackendFlags, ClipboardBackend, DrawData, FontAtlasSource, GraphicsDevice, GuiIo,
    RenderPass, Result, TextureFormat, TextureId,
};
use imbridge_input::{InputBridge, InputSnapshot};
use imbridge_render::GuiRenderer;

/// Connects a GUI library to a host: feeds it input and renders its output.
///
/// A frame goes through these steps, in order:
/// 1. [`new_frame`](Self::new_frame) with the tick's input snapshot
/// 2. the GUI library builds its [`DrawData`]
/// 3. [`upload`](Self::upload) outside any render pass
/// 4. [`render`](Self::render) inside the pass targeting the window
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use imbridge::{AdapterOptions, DrawData, FontAtlas, GuiAdapter, InputSnapshot, IoState, TextureFormat};
/// use imbridge::headless::HeadlessDevice;
///
/// let mut device = HeadlessDevice::new();
/// let mut io = IoState::new();
/// let mut fonts = FontAtlas::white(8, 8);
/// let mut adapter = GuiAdapter::new(
///     &mut device,
///     &mut io,
///     &mut fonts,
///     TextureFormat::Bgra8Unorm,
///     [640, 480],
///     &AdapterOptions::default(),
///     None,
/// )
/// .unwrap();
///
/// adapter.new_frame(&mut io, &InputSnapshot::default(), Duration::from_millis(16));
/// adapter.upload(&mut device, &DrawData::new([640.0, 480.0])).unwrap();
/// let mut pass = device.begin_pass();
/// adapter.render(&mut pass).unwrap();
/// ```
pub struct GuiAdapter<D: GraphicsDevice> {
    input: InputBridge,
    renderer: GuiRenderer<D>,
}

impl<D: GraphicsDevice> GuiAdapter<D> {
    /// Creates the device resources, uploads the font atlas and prepares `io`.
    ///
    /// `io` is told the renderer honours per-command vertex offsets, gets the
    /// clipboard if one is given, and gets the initial display size.
    #[allow(clippy::too_many_arguments)]
    pub fn new<I, F>(
        device: &mut D,
        io: &mut I,
        fonts: &mut F,
        target_format: TextureFormat,
        viewport: [u32; 2],
        options: &AdapterOptions,
        clipboard: Option<Box<dyn ClipboardBackend>>,
    ) -> Result<Self>
    where
        I: GuiIo + ?Sized,
        F: FontAtlasSource + ?Sized,
    {
        let mut renderer = GuiRenderer::new(device, target_format, viewport, options)?;
        if let Err(e) = renderer.upload_font_atlas(device, fonts) {
            renderer.destroy(device);
            return Err(e);
        }

        io.add_backend_flags(BackendFlags::RENDERER_HAS_VTX_OFFSET);
        if let Some(clipboard) = clipboard {
            io.set_clipboard(clipboard);
        }
        renderer.resize(io, viewport[0], viewport[1]);

        info!("GUI adapter ready ({:?} modifiers)", options.modifier_policy);

        Ok(Self {
            input: InputBridge::new(options.modifier_policy),
            renderer,
        })
    }

    /// Forwards one tick of host input to the GUI.
    pub fn new_frame<I>(&mut self, io: &mut I, snapshot: &InputSnapshot, delta: Duration)
    where
        I: GuiIo + ?Sized,
    {
        self.input.advance(io, snapshot, delta);
    }

    /// Forwards one text input character.
    pub fn text_input<I>(&self, io: &mut I, ch: char)
    where
        I: GuiIo + ?Sized,
    {
        self.input.text_input(io, ch);
    }

    /// Forgets the remembered input state, e.g. after the GUI context was recreated.
    pub fn reset_input(&mut self) {
        self.input.reset();
    }

    /// Copies the frame's draw data to the device.
    pub fn upload(&mut self, device: &mut D, draw_data: &DrawData) -> Result<()> {
        self.renderer.upload(device, draw_data)
    }

    /// Records the uploaded frame into `pass`.
    pub fn render<P>(&self, pass: &mut P) -> Result<()>
    where
        P: RenderPass<D> + ?Sized,
    {
        self.renderer.render(pass)
    }

    pub fn resize<I>(&mut self, io: &mut I, width: u32, height: u32)
    where
        I: GuiIo + ?Sized,
    {
        self.renderer.resize(io, width, height);
    }

    /// Re-uploads the font atlas after the GUI library rebuilt it.
    pub fn upload_font_atlas<F>(&mut self, device: &mut D, fonts: &mut F) -> Result<TextureId>
    where
        F: FontAtlasSource + ?Sized,
    {
        self.renderer.upload_font_atlas(device, fonts)
    }

    /// Makes a caller-owned texture drawable and returns its handle.
    pub fn bind_texture(&mut self, texture: &D::Texture) -> TextureId {
        self.renderer.bind_texture(texture)
    }

    pub fn unbind_texture(&mut self, texture: &D::Texture) -> Option<D::Texture> {
        self.renderer.unbind_texture(texture)
    }

    pub fn renderer(&self) -> &GuiRenderer<D> {
        &self.renderer
    }

    pub fn input(&self) -> &InputBridge {
        &self.input
    }

    /// Releases the device resources the adapter created.
    pub fn destroy(self, device: &mut D) {
        self.renderer.destroy(device);
    }
}
