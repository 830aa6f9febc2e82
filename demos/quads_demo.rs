//! Opens a window and draws a grid of quads that light up under the cursor.
//!
//! Set `IMBRIDGE_CONFIG` to a JSON file to override the adapter options.
//!
//! Run with: cargo run --example quads_demo

use imbridge::app::{run, AppConfig, GuiApplication};
use imbridge::*;

const CELL: f32 = 48.0;
const GAP: f32 = 8.0;

struct Quads {
    fonts: FontAtlas,
    checker: Option<(WgpuTexture, TextureId)>,
    mouse: Vec2,
    held: bool,
    typed: String,
}

impl Quads {
    fn new() -> Self {
        Self {
            fonts: FontAtlas::white(4, 4),
            checker: None,
            mouse: Vec2::new(-1.0, -1.0),
            held: false,
            typed: String::new(),
        }
    }

    fn consume(&mut self, io: &mut IoState) {
        for event in io.drain_events() {
            match event {
                GuiEvent::MousePos { x, y } => self.mouse = Vec2::new(x, y),
                GuiEvent::MouseButton {
                    button: MouseButton::Left,
                    down,
                } => self.held = down,
                GuiEvent::Char(c) => {
                    self.typed.push(c);
                    log::info!("typed: {}", self.typed);
                }
                GuiEvent::Key {
                    key: GuiKey::Escape,
                    down: true,
                    ..
                } => self.typed.clear(),
                _ => {}
            }
        }
    }
}

fn checkerboard(size: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let v = if (x / 4 + y / 4) % 2 == 0 { 230 } else { 40 };
            pixels.extend_from_slice(&[v, v, v, 255]);
        }
    }
    pixels
}

impl GuiApplication for Quads {
    fn font_atlas(&mut self) -> &mut FontAtlas {
        &mut self.fonts
    }

    fn setup(&mut self, adapter: &mut GuiAdapter<WgpuDevice>, device: &mut WgpuDevice) -> Result<()> {
        let texture = device.create_texture(32, 32, TextureFormat::Rgba8Unorm)?;
        device.upload_texture(&texture, &checkerboard(32))?;
        let id = adapter.bind_texture(&texture);
        self.checker = Some((texture, id));
        Ok(())
    }

    fn frame(&mut self, io: &mut IoState) -> DrawData {
        self.consume(io);
        let mut data = DrawData::new(io.display_size);
        let Some(font) = self.fonts.texture_id() else {
            return data;
        };

        let [width, height] = io.display_size;
        let cols = ((width - GAP) / (CELL + GAP)).max(0.0) as u32;
        let rows = ((height - GAP) / (CELL + GAP)).max(0.0) as u32;

        let mut builder = DrawListBuilder::new(font, self.fonts.white_uv());
        for row in 0..rows {
            for col in 0..cols {
                let min = Vec2::new(GAP + col as f32 * (CELL + GAP), GAP + row as f32 * (CELL + GAP));
                let max = min + Vec2::splat(CELL);
                let hovered = self.mouse.cmpge(min).all() && self.mouse.cmplt(max).all();
                let color = match (hovered, self.held) {
                    (true, true) => pack_color([250, 200, 60, 255]),
                    (true, false) => pack_color([90, 160, 250, 255]),
                    _ => pack_color([60, 60, 70, 255]),
                };
                builder.add_rect_filled(min, max, color);
            }
        }

        // A clipped checkerboard following the cursor.
        if let Some((_, checker)) = &self.checker {
            builder
                .set_clip_rect(Vec2::ZERO, Vec2::new(width * 0.5, height))
                .set_texture(*checker)
                .add_image(
                    self.mouse - Vec2::splat(64.0),
                    self.mouse + Vec2::splat(64.0),
                    Vec2::ZERO,
                    Vec2::ONE,
                    pack_color([255, 255, 255, 200]),
                );
        }

        data.lists.push(builder.build());
        data
    }

    fn shutdown(&mut self, adapter: &mut GuiAdapter<WgpuDevice>, device: &mut WgpuDevice) {
        if let Some((texture, _)) = self.checker.take() {
            adapter.unbind_texture(&texture);
            device.destroy_texture(texture);
        }
    }
}

fn main() -> Result<()> {
    init_logging();

    let options = match std::env::var("IMBRIDGE_CONFIG") {
        Ok(path) => AdapterOptions::from_json_file(path)?,
        Err(_) => AdapterOptions::default(),
    };
    let config = AppConfig {
        title: "imbridge quads".to_string(),
        options,
        ..AppConfig::default()
    };
    run(Quads::new(), config)
}
