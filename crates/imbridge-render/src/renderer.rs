//! The GUI renderer: pipeline, sampler, texture registry, and draw translation.

use glam::{Mat4, Vec3};
use log::{debug, info, trace};

use imbridge_core::{
    AdapterOptions, DrawData, FontAtlasSource, GpuTexture, GraphicsDevice, GuiIo, IndexFormat, RenderPass,
    Result, TextureFormat, TextureId,
};

use crate::pipeline::{gui_pipeline_description, GuiShaders};
use crate::projection::{ortho_projection, projection_bytes};
use crate::texture_registry::TextureRegistry;
use crate::translator::DrawTranslator;

/// Renders GUI draw data through a [`GraphicsDevice`].
///
/// Owns every device resource it creates: pipeline, sampler, vertex and index
/// buffers, and the font atlas texture. User textures handed to
/// [`bind_texture`](Self::bind_texture) stay owned by the caller.
pub struct GuiRenderer<D: GraphicsDevice> {
    pipeline: D::Pipeline,
    sampler: D::Sampler,
    registry: TextureRegistry<D::Texture>,
    translator: DrawTranslator<D>,
    projection: Mat4,
    viewport: [u32; 2],
}

impl<D: GraphicsDevice> GuiRenderer<D> {
    /// Creates a renderer with the built-in shaders.
    pub fn new(
        device: &mut D,
        target_format: TextureFormat,
        viewport: [u32; 2],
        options: &AdapterOptions,
    ) -> Result<Self> {
        Self::with_shaders(device, GuiShaders::default(), target_format, viewport, options)
    }

    /// Creates a renderer with caller-provided shaders.
    ///
    /// The shaders must follow the binding convention of
    /// [`PipelineDescription`](imbridge_core::PipelineDescription).
    pub fn with_shaders(
        device: &mut D,
        shaders: GuiShaders,
        target_format: TextureFormat,
        viewport: [u32; 2],
        options: &AdapterOptions,
    ) -> Result<Self> {
        // A zero extent would make the projection non-finite.
        let viewport = [viewport[0].max(1), viewport[1].max(1)];
        let desc = gui_pipeline_description(shaders, target_format);
        let pipeline = device.create_pipeline(&desc)?;
        let sampler = device.create_sampler(&options.sampler)?;
        let translator = DrawTranslator::new(
            device,
            options.initial_vertex_capacity,
            options.initial_index_capacity,
            options.growth,
        )?;

        info!(
            "GUI renderer created: {:?} target, {}x{} viewport",
            target_format, viewport[0], viewport[1]
        );

        Ok(Self {
            pipeline,
            sampler,
            registry: TextureRegistry::new(),
            translator,
            projection: ortho_projection(viewport[0] as f32, viewport[1] as f32),
            viewport,
        })
    }

    /// Uploads the font atlas and hands its texture handle back to `fonts`.
    ///
    /// Calling this again replaces the previous atlas texture, which is
    /// destroyed once the new one is installed.
    pub fn upload_font_atlas<F>(&mut self, device: &mut D, fonts: &mut F) -> Result<TextureId>
    where
        F: FontAtlasSource + ?Sized,
    {
        let (texture, id) = {
            let atlas = fonts.rgba32();
            let texture = device.create_texture(atlas.width, atlas.height, TextureFormat::Rgba8Unorm)?;
            if let Err(e) = device.upload_texture(&texture, atlas.pixels) {
                device.destroy_texture(texture);
                return Err(e);
            }
            debug!("uploaded {}x{} font atlas", atlas.width, atlas.height);
            let id = texture.id();
            (texture, id)
        };

        if let Some(old) = self.registry.set_font_atlas(texture) {
            device.destroy_texture(old);
        }
        fonts.set_texture_id(id);
        Ok(id)
    }

    /// Handle of the current font atlas texture.
    pub fn font_atlas_id(&self) -> Option<TextureId> {
        self.registry.font_atlas_id()
    }

    /// Updates the projection and the GUI display size for a new viewport.
    ///
    /// A zero-sized viewport, as seen while a window is minimized, still
    /// reaches the GUI but keeps the previous projection.
    pub fn resize<I>(&mut self, io: &mut I, width: u32, height: u32)
    where
        I: GuiIo + ?Sized,
    {
        io.set_display_size(width as f32, height as f32);
        if width == 0 || height == 0 {
            trace!("ignoring zero-sized viewport for projection");
            return;
        }
        self.viewport = [width, height];
        self.projection = ortho_projection(width as f32, height as f32);
    }

    /// Copies this frame's draw data to the device. Call outside a pass.
    pub fn upload(&mut self, device: &mut D, draw_data: &DrawData) -> Result<()> {
        self.translator.upload(device, draw_data)
    }

    /// Records the uploaded frame into `pass`.
    pub fn render<P>(&self, pass: &mut P) -> Result<()>
    where
        P: RenderPass<D> + ?Sized,
    {
        let [x, y] = self.translator.display_pos();
        let projection = self.projection * Mat4::from_translation(Vec3::new(-x, -y, 0.0));
        pass.bind_pipeline(&self.pipeline);
        pass.push_vertex_uniforms(&projection_bytes(&projection))?;
        pass.bind_vertex_buffer(self.translator.vertex_buffer());
        pass.bind_index_buffer(self.translator.index_buffer(), IndexFormat::Uint16);
        self.translator
            .render(pass, &self.registry, &self.sampler, self.viewport)
    }

    /// Makes `texture` available to draw commands.
    pub fn bind_texture(&mut self, texture: &D::Texture) -> TextureId {
        self.registry.bind(texture)
    }

    /// Stops tracking `texture`. The caller still owns the device texture.
    pub fn unbind_texture(&mut self, texture: &D::Texture) -> Option<D::Texture> {
        self.registry.unbind(texture)
    }

    /// Looks up a texture by handle.
    pub fn resolve(&self, id: TextureId) -> Result<&D::Texture> {
        self.registry.resolve(id)
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn viewport(&self) -> [u32; 2] {
        self.viewport
    }

    pub fn translator(&self) -> &DrawTranslator<D> {
        &self.translator
    }

    pub fn registry(&self) -> &TextureRegistry<D::Texture> {
        &self.registry
    }

    /// Releases every device resource the renderer created.
    pub fn destroy(mut self, device: &mut D) {
        if let Some(font) = self.registry.take_font_atlas() {
            device.destroy_texture(font);
        }
        self.translator.destroy(device);
        device.destroy_sampler(self.sampler);
        device.destroy_pipeline(self.pipeline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessDevice, PassCommand};
    use imbridge_core::{pack_color, DrawListBuilder, FontAtlas, IoState, Vec2};

    fn renderer(device: &mut HeadlessDevice) -> GuiRenderer<HeadlessDevice> {
        GuiRenderer::new(
            device,
            TextureFormat::Bgra8Unorm,
            [1280, 720],
            &AdapterOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_creation_allocates_resources() {
        let mut device = HeadlessDevice::new();
        let r = renderer(&mut device);
        assert_eq!(device.live_pipelines(), 1);
        assert_eq!(device.live_samplers(), 1);
        assert_eq!(device.live_buffers(), 2);
        assert_eq!(r.translator().vertex_capacity(), 4096);
        assert_eq!(r.translator().index_capacity(), 6144);

        r.destroy(&mut device);
        assert_eq!(device.live_pipelines(), 0);
        assert_eq!(device.live_samplers(), 0);
        assert_eq!(device.live_buffers(), 0);
    }

    #[test]
    fn test_font_atlas_upload_and_replace() {
        let mut device = HeadlessDevice::new();
        let mut r = renderer(&mut device);
        let mut fonts = FontAtlas::white(8, 8);

        let first = r.upload_font_atlas(&mut device, &mut fonts).unwrap();
        assert_eq!(fonts.texture_id(), Some(first));
        assert!(r.resolve(first).is_ok());

        let second = r.upload_font_atlas(&mut device, &mut fonts).unwrap();
        assert_ne!(first, second);
        assert_eq!(fonts.texture_id(), Some(second));
        assert!(r.resolve(first).is_err());
        assert_eq!(device.live_textures(), 1);

        r.destroy(&mut device);
        assert_eq!(device.live_textures(), 0);
    }

    #[test]
    fn test_resize_updates_projection_and_io() {
        let mut device = HeadlessDevice::new();
        let mut r = renderer(&mut device);
        let mut io = IoState::new();

        r.resize(&mut io, 800, 600);
        assert_eq!(io.display_size, [800.0, 600.0]);
        assert_eq!(r.viewport(), [800, 600]);
        assert_eq!(r.projection(), ortho_projection(800.0, 600.0));

        r.resize(&mut io, 0, 0);
        assert_eq!(io.display_size, [0.0, 0.0]);
        assert_eq!(r.viewport(), [800, 600]);
    }

    #[test]
    fn test_render_sequence() {
        let mut device = HeadlessDevice::new();
        let mut r = renderer(&mut device);
        let mut fonts = FontAtlas::white(4, 4);
        let font = r.upload_font_atlas(&mut device, &mut fonts).unwrap();

        let mut b = DrawListBuilder::new(font, fonts.white_uv());
        b.add_rect_filled(Vec2::ZERO, Vec2::splat(10.0), pack_color([255, 0, 0, 255]));
        let mut data = DrawData::new([1280.0, 720.0]);
        data.lists.push(b.build());
        r.upload(&mut device, &data).unwrap();

        {
            let mut pass = device.begin_pass();
            r.render(&mut pass).unwrap();
        }
        let commands = device.last_pass().unwrap();
        assert!(matches!(commands[0], PassCommand::BindPipeline { .. }));
        match &commands[1] {
            PassCommand::PushVertexUniforms(bytes) => {
                assert_eq!(bytes.as_slice(), &projection_bytes(&r.projection())[..]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(matches!(commands[2], PassCommand::BindVertexBuffer { .. }));
        assert!(matches!(
            commands[3],
            PassCommand::BindIndexBuffer {
                format: IndexFormat::Uint16,
                ..
            }
        ));
        assert_eq!(commands.len(), 7);
    }

    #[test]
    fn test_zero_initial_viewport_keeps_projection_finite() {
        let mut device = HeadlessDevice::new();
        let r = GuiRenderer::new(
            &mut device,
            TextureFormat::Bgra8Unorm,
            [0, 0],
            &AdapterOptions::default(),
        )
        .unwrap();
        assert_eq!(r.viewport(), [1, 1]);
        assert!(r.projection().to_cols_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_projection_offset_by_display_pos() {
        let mut device = HeadlessDevice::new();
        let mut r = renderer(&mut device);
        let mut fonts = FontAtlas::white(1, 1);
        let font = r.upload_font_atlas(&mut device, &mut fonts).unwrap();

        let mut b = DrawListBuilder::new(font, fonts.white_uv());
        b.add_rect_filled(Vec2::new(200.0, 100.0), Vec2::new(210.0, 110.0), pack_color([0, 0, 0, 255]));
        let mut data = DrawData::new([1280.0, 720.0]);
        data.display_pos = [200.0, 100.0];
        data.lists.push(b.build());
        r.upload(&mut device, &data).unwrap();
        {
            let mut pass = device.begin_pass();
            r.render(&mut pass).unwrap();
        }

        let PassCommand::PushVertexUniforms(bytes) = &device.last_pass().unwrap()[1] else {
            panic!("projection was not pushed first");
        };
        let cols: Vec<f32> = bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        let m = Mat4::from_cols_slice(&cols);
        // The display origin lands on the top-left corner of clip space.
        let corner = m * glam::Vec4::new(200.0, 100.0, 0.0, 1.0);
        assert!((corner.x + 1.0).abs() < 1e-5);
        assert!((corner.y - 1.0).abs() < 1e-5);
    }
}
