//! Description of the GUI pipeline.

use std::borrow::Cow;

use imbridge_core::{
    BlendMode, DrawVert, PipelineDescription, PrimitiveTopology, ShaderSource, TextureFormat,
    VertexAttribute, VertexFormat, VertexLayout,
};

use crate::projection::PROJECTION_UNIFORM_SIZE;

/// Built-in WGSL shader with `vs_main` and `fs_main` entry points.
pub const GUI_SHADER_WGSL: &str = include_str!("shaders/gui.wgsl");

/// Vertex and fragment shaders for the GUI pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuiShaders {
    pub vertex: ShaderSource,
    pub fragment: ShaderSource,
}

impl Default for GuiShaders {
    fn default() -> Self {
        Self {
            vertex: ShaderSource::new(GUI_SHADER_WGSL, "vs_main"),
            fragment: ShaderSource::new(GUI_SHADER_WGSL, "fs_main"),
        }
    }
}

/// Vertex layout of [`DrawVert`]: position, uv, packed color.
pub fn gui_vertex_layout() -> VertexLayout {
    VertexLayout {
        stride: DrawVert::STRIDE,
        attributes: vec![
            VertexAttribute {
                location: 0,
                format: VertexFormat::Float32x2,
                offset: 0,
            },
            VertexAttribute {
                location: 1,
                format: VertexFormat::Float32x2,
                offset: DrawVert::UV_OFFSET,
            },
            VertexAttribute {
                location: 2,
                format: VertexFormat::Unorm8x4,
                offset: DrawVert::COL_OFFSET,
            },
        ],
    }
}

/// Pipeline for flat textured triangle lists rendered into `color_format`.
///
/// No depth test, single sample, non-premultiplied alpha blending, and a
/// 64-byte projection uniform for the vertex stage.
pub fn gui_pipeline_description(shaders: GuiShaders, color_format: TextureFormat) -> PipelineDescription {
    PipelineDescription {
        label: Cow::Borrowed("imbridge gui pipeline"),
        vertex_shader: shaders.vertex,
        fragment_shader: shaders.fragment,
        vertex_layout: gui_vertex_layout(),
        topology: PrimitiveTopology::TriangleList,
        color_format,
        blend: BlendMode::NonPremultiplied,
        depth_test: false,
        sample_count: 1,
        vertex_uniform_size: PROJECTION_UNIFORM_SIZE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_covers_draw_vert() {
        let layout = gui_vertex_layout();
        assert_eq!(layout.stride, 20);
        let offsets: Vec<u64> = layout.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 8, 16]);
        assert_eq!(layout.attributes[2].format, VertexFormat::Unorm8x4);
    }

    #[test]
    fn test_pipeline_description() {
        let desc = gui_pipeline_description(GuiShaders::default(), TextureFormat::Bgra8Unorm);
        assert_eq!(desc.topology, PrimitiveTopology::TriangleList);
        assert_eq!(desc.blend, BlendMode::NonPremultiplied);
        assert!(!desc.depth_test);
        assert_eq!(desc.sample_count, 1);
        assert_eq!(desc.vertex_uniform_size, 64);
        assert_eq!(desc.vertex_shader.entry_point, "vs_main");
        assert_eq!(desc.fragment_shader.entry_point, "fs_main");
    }

    #[test]
    fn test_builtin_shader_declares_entry_points() {
        assert!(GUI_SHADER_WGSL.contains("fn vs_main"));
        assert!(GUI_SHADER_WGSL.contains("fn fs_main"));
    }
}
