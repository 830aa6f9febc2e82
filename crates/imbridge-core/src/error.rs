//! Error types for imbridge.

use thiserror::Error;

use crate::texture::TextureId;

/// The main error type for imbridge operations.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// A draw command referenced a texture that was never bound.
    ///
    /// This is a registration bug in the caller, not a recoverable condition.
    #[error("texture {0} is not registered with the renderer")]
    UnknownTexture(TextureId),

    /// The graphics device rejected an operation.
    #[error("device error: {0}")]
    Device(String),

    /// Pixel data does not match the texture dimensions.
    #[error("texture data size mismatch: expected {expected} bytes, got {actual}")]
    InvalidTextureData { expected: usize, actual: usize },

    /// A buffer write violated the device's copy alignment.
    #[error("buffer write at offset {offset} is not aligned to {alignment} bytes")]
    UnalignedWrite { offset: u64, alignment: u64 },

    /// A buffer write ran past the end of the buffer.
    #[error("buffer write of {len} bytes at offset {offset} exceeds buffer size {size}")]
    WriteOutOfBounds { offset: u64, len: u64, size: u64 },

    /// Uniform data does not fit the pipeline's uniform block.
    #[error("uniform block size mismatch: expected {expected} bytes, got {actual}")]
    UniformSize { expected: u64, actual: u64 },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// A specialized Result type for imbridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;
