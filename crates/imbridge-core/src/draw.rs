//! Per-frame draw data produced by the GUI library.
//!
//! The layout of [`DrawVert`] matches the GUI library's emitted vertices byte
//! for byte, so vertex arrays can be handed to the GPU without conversion.

use glam::Vec2;

use crate::texture::TextureId;

/// Index type used by draw lists.
pub type DrawIdx = u16;

/// A single GUI vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawVert {
    /// Position in screen pixels.
    pub pos: [f32; 2],
    /// Texture coordinate.
    pub uv: [f32; 2],
    /// Packed RGBA color, red in the lowest byte.
    pub col: u32,
}

impl DrawVert {
    /// Byte offset of the texture coordinate.
    pub const UV_OFFSET: u64 = 8;
    /// Byte offset of the packed color.
    pub const COL_OFFSET: u64 = 16;
    /// Size of one vertex in bytes.
    pub const STRIDE: u64 = std::mem::size_of::<Self>() as u64;

    pub fn new(pos: Vec2, uv: Vec2, col: u32) -> Self {
        Self {
            pos: pos.to_array(),
            uv: uv.to_array(),
            col,
        }
    }
}

/// Packs an RGBA color into the vertex color format.
pub const fn pack_color(rgba: [u8; 4]) -> u32 {
    u32::from_le_bytes(rgba)
}

/// One sub-range of a draw list sharing a clip rectangle and texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCmd {
    /// Clip rectangle `(x0, y0, x1, y1)` in screen pixels.
    pub clip_rect: [f32; 4],
    /// Texture to sample.
    pub texture_id: TextureId,
    /// Offset into the owning list's vertices added to every index.
    pub vtx_offset: u32,
    /// First index of this command within the owning list.
    pub idx_offset: u32,
    /// Number of indices, a multiple of three.
    pub elem_count: u32,
}

/// Vertices, indices and commands of one GUI layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub vtx_buffer: Vec<DrawVert>,
    pub idx_buffer: Vec<DrawIdx>,
    pub commands: Vec<DrawCmd>,
}

impl DrawList {
    /// Creates an empty draw list.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A full frame of GUI output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawData {
    /// Top-left of the rendered area in screen pixels.
    pub display_pos: [f32; 2],
    /// Size of the rendered area in screen pixels.
    pub display_size: [f32; 2],
    /// Lists in back-to-front order.
    pub lists: Vec<DrawList>,
}

impl DrawData {
    /// Creates draw data for a display of the given size.
    pub fn new(display_size: [f32; 2]) -> Self {
        Self {
            display_pos: [0.0, 0.0],
            display_size,
            lists: Vec::new(),
        }
    }

    /// Total vertex count across all lists.
    pub fn total_vtx_count(&self) -> usize {
        self.lists.iter().map(|l| l.vtx_buffer.len()).sum()
    }

    /// Total index count across all lists.
    pub fn total_idx_count(&self) -> usize {
        self.lists.iter().map(|l| l.idx_buffer.len()).sum()
    }

    /// Total command count across all lists.
    pub fn total_cmd_count(&self) -> usize {
        self.lists.iter().map(|l| l.commands.len()).sum()
    }

    /// Returns true if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.total_idx_count() == 0
    }
}

/// Assembles a [`DrawList`] out of textured quads.
///
/// Consecutive primitives sharing a clip rectangle and texture are merged into
/// one command. A new command restarts vertex numbering at the current end of
/// the vertex array and records that position as its `vtx_offset`.
#[derive(Debug)]
pub struct DrawListBuilder {
    list: DrawList,
    clip_rect: [f32; 4],
    texture_id: TextureId,
    white_uv: Vec2,
}

impl DrawListBuilder {
    /// Starts a list drawing with `texture_id` and no clipping.
    ///
    /// `white_uv` is the texture coordinate of an opaque white texel, used for
    /// untextured fills.
    pub fn new(texture_id: TextureId, white_uv: Vec2) -> Self {
        Self {
            list: DrawList::new(),
            clip_rect: [f32::MIN, f32::MIN, f32::MAX, f32::MAX],
            texture_id,
            white_uv,
        }
    }

    /// Sets the clip rectangle for subsequent primitives.
    pub fn set_clip_rect(&mut self, min: Vec2, max: Vec2) -> &mut Self {
        self.clip_rect = [min.x, min.y, max.x, max.y];
        self
    }

    /// Sets the texture for subsequent primitives.
    pub fn set_texture(&mut self, texture_id: TextureId) -> &mut Self {
        self.texture_id = texture_id;
        self
    }

    /// Adds a solid rectangle.
    pub fn add_rect_filled(&mut self, min: Vec2, max: Vec2, col: u32) -> &mut Self {
        let uv = self.white_uv;
        self.add_quad(min, max, uv, uv, col)
    }

    /// Adds a rectangle sampling `uv_min..uv_max` of the current texture.
    pub fn add_image(&mut self, min: Vec2, max: Vec2, uv_min: Vec2, uv_max: Vec2, col: u32) -> &mut Self {
        self.add_quad(min, max, uv_min, uv_max, col)
    }

    fn add_quad(&mut self, min: Vec2, max: Vec2, uv_min: Vec2, uv_max: Vec2, col: u32) -> &mut Self {
        let cmd = self.current_command();
        // Fits: current_command starts a new command before u16 overflow.
        let base = (self.list.vtx_buffer.len() as u32 - cmd.vtx_offset) as DrawIdx;

        self.list.vtx_buffer.extend_from_slice(&[
            DrawVert::new(min, uv_min, col),
            DrawVert::new(Vec2::new(max.x, min.y), Vec2::new(uv_max.x, uv_min.y), col),
            DrawVert::new(max, uv_max, col),
            DrawVert::new(Vec2::new(min.x, max.y), Vec2::new(uv_min.x, uv_max.y), col),
        ]);
        self.list
            .idx_buffer
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);

        if let Some(last) = self.list.commands.last_mut() {
            last.elem_count += 6;
        }
        self
    }

    /// Returns the open command, starting a new one when the state changed.
    fn current_command(&mut self) -> DrawCmd {
        let vtx_len = self.list.vtx_buffer.len() as u32;
        match self.list.commands.last() {
            Some(cmd)
                if cmd.clip_rect == self.clip_rect
                    && cmd.texture_id == self.texture_id
                    && vtx_len - cmd.vtx_offset + 4 <= u32::from(DrawIdx::MAX) =>
            {
                *cmd
            }
            _ => {
                let cmd = DrawCmd {
                    clip_rect: self.clip_rect,
                    texture_id: self.texture_id,
                    vtx_offset: vtx_len,
                    idx_offset: self.list.idx_buffer.len() as u32,
                    elem_count: 0,
                };
                self.list.commands.push(cmd);
                cmd
            }
        }
    }

    /// Finishes the list.
    pub fn build(self) -> DrawList {
        self.list
    }
}
