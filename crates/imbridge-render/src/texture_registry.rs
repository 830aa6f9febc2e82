//! Texture registry mapping GUI texture handles to device textures.

use std::collections::HashMap;

use imbridge_core::{BridgeError, GpuTexture, Result, TextureId};

/// Registry of the textures draw commands may reference.
///
/// The font atlas lives in its own slot so that [`TextureRegistry::unbind`]
/// can never remove it. Each renderer owns one registry.
#[derive(Debug)]
pub struct TextureRegistry<T> {
    /// Map from handle -> user texture
    textures: HashMap<TextureId, T>,
    /// Currently installed font atlas
    font_atlas: Option<(TextureId, T)>,
}

impl<T> Default for TextureRegistry<T> {
    fn default() -> Self {
        Self {
            textures: HashMap::new(),
            font_atlas: None,
        }
    }
}

impl<T: GpuTexture> TextureRegistry<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `texture` and returns the handle draw commands use for it.
    ///
    /// Binding an already registered texture returns the same handle and
    /// leaves the registry unchanged.
    pub fn bind(&mut self, texture: &T) -> TextureId {
        let id = texture.id();
        if self.font_atlas_id() != Some(id) {
            self.textures.entry(id).or_insert_with(|| texture.clone());
        }
        id
    }

    /// Removes `texture` from the registry and returns the registry's copy.
    ///
    /// Unknown textures and the font atlas are left alone.
    pub fn unbind(&mut self, texture: &T) -> Option<T> {
        self.textures.remove(&texture.id())
    }

    /// Looks up the texture for `id`, consulting the font atlas slot first.
    pub fn resolve(&self, id: TextureId) -> Result<&T> {
        match &self.font_atlas {
            Some((font_id, font)) if *font_id == id => Ok(font),
            _ => self.textures.get(&id).ok_or(BridgeError::UnknownTexture(id)),
        }
    }

    /// Installs `texture` as the font atlas, returning the previous one.
    pub fn set_font_atlas(&mut self, texture: T) -> Option<T> {
        let id = texture.id();
        self.font_atlas.replace((id, texture)).map(|(_, old)| old)
    }

    /// Empties the font atlas slot.
    pub fn take_font_atlas(&mut self) -> Option<T> {
        self.font_atlas.take().map(|(_, tex)| tex)
    }

    /// Handle of the installed font atlas.
    pub fn font_atlas_id(&self) -> Option<TextureId> {
        self.font_atlas.as_ref().map(|(id, _)| *id)
    }

    /// Checks if `id` resolves.
    pub fn contains(&self, id: TextureId) -> bool {
        self.resolve(id).is_ok()
    }

    /// Number of user textures, not counting the font atlas.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Returns true if no user textures are registered.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
