//! Opaque texture handles shared between the GUI library and the renderer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a device texture as seen by the GUI library.
///
/// Only equality matters: the value is whatever identity the graphics device
/// reports for a texture, and the GUI library hands it back verbatim in its
/// draw commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextureId(u64);

impl TextureId {
    /// Wraps a raw device identity.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identity value.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:x}", self.0)
    }
}

impl From<TextureId> for u64 {
    fn from(id: TextureId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_equality() {
        assert_eq!(TextureId::new(7), TextureId::new(7));
        assert_ne!(TextureId::new(7), TextureId::new(8));
        assert_eq!(u64::from(TextureId::new(42)), 42);
    }

    #[test]
    fn test_display_is_hex() {
        assert_eq!(TextureId::new(255).to_string(), "#ff");
    }
}
