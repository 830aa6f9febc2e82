//! Screen-space projection for GUI vertices.

use glam::Mat4;

/// Size of the projection uniform block in bytes.
pub const PROJECTION_UNIFORM_SIZE: u64 = std::mem::size_of::<Mat4>() as u64;

/// Maps `(0, 0)..(width, height)` screen pixels, y down, to clip space.
pub fn ortho_projection(width: f32, height: f32) -> Mat4 {
    Mat4::orthographic_rh(0.0, width, height, 0.0, -1.0, 1.0)
}

/// Column-major bytes of `projection`, ready for a uniform upload.
pub fn projection_bytes(projection: &Mat4) -> [u8; 64] {
    let mut bytes = [0u8; 64];
    bytes.copy_from_slice(bytemuck::cast_slice(&projection.to_cols_array()));
    bytes
}
