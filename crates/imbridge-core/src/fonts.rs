//! Font atlas export.

use glam::Vec2;

use crate::error::{BridgeError, Result};
use crate::texture::TextureId;

/// RGBA32 pixels of a font atlas, 4 bytes per texel, rows top to bottom.
#[derive(Debug, Clone, Copy)]
pub struct FontAtlasPixels<'a> {
    pub width: u32,
    pub height: u32,
    pub pixels: &'a [u8],
}

/// The GUI library's built-in font atlas.
pub trait FontAtlasSource {
    /// Builds the atlas if needed and exports it as RGBA32.
    fn rgba32(&mut self) -> FontAtlasPixels<'_>;
    /// Tells the GUI library which texture handle its glyphs live in.
    fn set_texture_id(&mut self, id: TextureId);
}

/// An atlas held as plain pixels.
#[derive(Debug, Clone)]
pub struct FontAtlas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    texture_id: Option<TextureId>,
}

impl FontAtlas {
    /// Wraps existing RGBA32 pixels.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(BridgeError::InvalidTextureData {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
            texture_id: None,
        })
    }

    /// An opaque white atlas, enough to draw untextured geometry.
    pub fn white(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![255; width as usize * height as usize * 4],
            texture_id: None,
        }
    }

    /// Texture handle assigned by the renderer, once uploaded.
    pub fn texture_id(&self) -> Option<TextureId> {
        self.texture_id
    }

    /// Texture coordinate of the first texel's center.
    pub fn white_uv(&self) -> Vec2 {
        Vec2::new(0.5 / self.width as f32, 0.5 / self.height as f32)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl FontAtlasSource for FontAtlas {
    fn rgba32(&mut self) -> FontAtlasPixels<'_> {
        FontAtlasPixels {
            width: self.width,
            height: self.height,
            pixels: &self.pixels,
        }
    }

    fn set_texture_id(&mut self, id: TextureId) {
        self.texture_id = Some(id);
    }
}
