//! Translation of GUI draw data into GPU buffers and indexed draws.
//!
//! A frame goes through two steps. [`DrawTranslator::upload`] runs before the
//! render pass: it grows the vertex and index buffers if the frame needs more
//! room, copies every list into them back to back, and records a draw plan.
//! [`DrawTranslator::render`] runs inside the pass and replays the plan,
//! resolving each command's texture and clamping its scissor rectangle.

use log::{debug, trace};

use imbridge_core::{
    BufferKind, DrawIdx, DrawIndexed, DrawData, DrawVert, GraphicsDevice, GrowthPolicy,
    RenderPass, Result, ScissorRect, TextureId,
};

use crate::texture_registry::TextureRegistry;

/// A device buffer with a capacity counted in elements.
#[derive(Debug)]
pub struct GpuBuffer<B> {
    buffer: B,
    kind: BufferKind,
    elem_size: usize,
    capacity: usize,
}

impl<B> GpuBuffer<B> {
    /// Allocates room for `capacity` elements of `elem_size` bytes.
    pub fn new<D>(device: &mut D, kind: BufferKind, elem_size: usize, capacity: usize) -> Result<Self>
    where
        D: GraphicsDevice<Buffer = B> + ?Sized,
    {
        let capacity = capacity.max(1);
        let buffer = device.create_buffer(kind, (capacity * elem_size) as u64)?;
        Ok(Self {
            buffer,
            kind,
            elem_size,
            capacity,
        })
    }

    /// The device buffer.
    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    /// Number of elements the buffer holds.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Makes room for at least `demand` elements.
    ///
    /// The replacement is created before the old buffer is released, so a
    /// failed allocation leaves the current buffer in place. Capacity never
    /// shrinks.
    pub fn reserve<D>(&mut self, device: &mut D, demand: usize, growth: GrowthPolicy) -> Result<bool>
    where
        D: GraphicsDevice<Buffer = B> + ?Sized,
    {
        if demand <= self.capacity {
            return Ok(false);
        }
        let capacity = growth.grow(demand).max(demand);
        let replacement = device.create_buffer(self.kind, (capacity * self.elem_size) as u64)?;
        let old = std::mem::replace(&mut self.buffer, replacement);
        device.destroy_buffer(old);
        debug!(
            "grew {:?} buffer from {} to {} elements",
            self.kind, self.capacity, capacity
        );
        self.capacity = capacity;
        Ok(true)
    }

    /// Releases the device buffer.
    pub fn destroy<D>(self, device: &mut D)
    where
        D: GraphicsDevice<Buffer = B> + ?Sized,
    {
        device.destroy_buffer(self.buffer);
    }
}

/// One draw of the current frame, in submission order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedDraw {
    pub texture_id: TextureId,
    /// Clip rectangle `(x0, y0, x1, y1)` as emitted by the GUI library.
    pub clip_rect: [f32; 4],
    /// First vertex of the command within the shared vertex buffer.
    pub base_vertex: u32,
    /// First index of the command within the shared index buffer.
    pub first_index: u32,
    pub elem_count: u32,
}

/// Clamps a clip rectangle to a `width` x `height` viewport.
///
/// Each edge is clamped independently, so a rectangle entirely outside the
/// viewport collapses to zero width or height instead of going negative.
pub fn clamp_scissor(clip_rect: [f32; 4], viewport: [u32; 2]) -> ScissorRect {
    let [w, h] = viewport;
    let clamp = |v: f32, max: u32| v.clamp(0.0, max as f32) as u32;

    let x0 = clamp(clip_rect[0], w);
    let y0 = clamp(clip_rect[1], h);
    let x1 = clamp(clip_rect[2], w);
    let y1 = clamp(clip_rect[3], h);

    ScissorRect {
        x: x0,
        y: y0,
        width: x1.saturating_sub(x0),
        height: y1.saturating_sub(y0),
    }
}

/// Owns the GUI vertex and index buffers and the per-frame draw plan.
pub struct DrawTranslator<D: GraphicsDevice + ?Sized> {
    vertices: GpuBuffer<D::Buffer>,
    indices: GpuBuffer<D::Buffer>,
    growth: GrowthPolicy,
    plan: Vec<PlannedDraw>,
    display_pos: [f32; 2],
    vtx_staging: Vec<DrawVert>,
    idx_staging: Vec<DrawIdx>,
}

impl<D: GraphicsDevice + ?Sized> DrawTranslator<D> {
    /// Allocates buffers for `vertex_capacity` vertices and `index_capacity`
    /// indices.
    pub fn new(
        device: &mut D,
        vertex_capacity: usize,
        index_capacity: usize,
        growth: GrowthPolicy,
    ) -> Result<Self> {
        let vertices = GpuBuffer::new(
            device,
            BufferKind::Vertex,
            std::mem::size_of::<DrawVert>(),
            vertex_capacity,
        )?;
        let indices = match GpuBuffer::new(
            device,
            BufferKind::Index,
            std::mem::size_of::<DrawIdx>(),
            index_capacity,
        ) {
            Ok(indices) => indices,
            Err(e) => {
                vertices.destroy(device);
                return Err(e);
            }
        };

        Ok(Self {
            vertices,
            indices,
            growth,
            plan: Vec::new(),
            display_pos: [0.0, 0.0],
            vtx_staging: Vec::new(),
            idx_staging: Vec::new(),
        })
    }

    /// Copies `draw_data` into the device buffers and records the draw plan.
    ///
    /// Must run outside a render pass. On error the plan is left empty, so a
    /// following [`render`](Self::render) draws nothing.
    pub fn upload(&mut self, device: &mut D, draw_data: &DrawData) -> Result<()> {
        self.plan.clear();
        self.display_pos = draw_data.display_pos;

        let vtx_total = draw_data.total_vtx_count();
        let idx_total = draw_data.total_idx_count();
        self.vertices.reserve(device, vtx_total, self.growth)?;
        self.indices.reserve(device, idx_total, self.growth)?;

        self.vtx_staging.clear();
        self.idx_staging.clear();
        let mut plan = Vec::with_capacity(draw_data.total_cmd_count());
        for list in &draw_data.lists {
            let running_vtx = self.vtx_staging.len() as u32;
            let running_idx = self.idx_staging.len() as u32;
            plan.extend(list.commands.iter().map(|cmd| PlannedDraw {
                texture_id: cmd.texture_id,
                clip_rect: cmd.clip_rect,
                base_vertex: running_vtx + cmd.vtx_offset,
                first_index: running_idx + cmd.idx_offset,
                elem_count: cmd.elem_count,
            }));
            self.vtx_staging.extend_from_slice(&list.vtx_buffer);
            self.idx_staging.extend_from_slice(&list.idx_buffer);
        }

        if !self.vtx_staging.is_empty() {
            device.write_buffer(self.vertices.buffer(), 0, bytemuck::cast_slice(&self.vtx_staging))?;
        }
        if !self.idx_staging.is_empty() {
            device.write_buffer(self.indices.buffer(), 0, bytemuck::cast_slice(&self.idx_staging))?;
        }

        trace!(
            "uploaded {} lists: {} vertices, {} indices, {} draws",
            draw_data.lists.len(),
            vtx_total,
            idx_total,
            plan.len()
        );
        self.plan = plan;
        Ok(())
    }

    /// Issues the planned draws into `pass`.
    ///
    /// The caller binds the pipeline and the buffers first. A command whose
    /// texture is not in `registry` aborts the frame with
    /// [`BridgeError::UnknownTexture`](imbridge_core::BridgeError::UnknownTexture)
    /// before anything is issued for it.
    pub fn render<P>(
        &self,
        pass: &mut P,
        registry: &TextureRegistry<D::Texture>,
        sampler: &D::Sampler,
        viewport: [u32; 2],
    ) -> Result<()>
    where
        P: RenderPass<D> + ?Sized,
    {
        for draw in &self.plan {
            let texture = registry.resolve(draw.texture_id)?;
            pass.bind_texture_sampler(texture, sampler);
            let [x0, y0, x1, y1] = draw.clip_rect;
            let [ox, oy] = self.display_pos;
            pass.set_scissor(clamp_scissor([x0 - ox, y0 - oy, x1 - ox, y1 - oy], viewport));
            pass.draw_indexed(DrawIndexed {
                base_vertex: draw.base_vertex,
                first_index: draw.first_index,
                triangle_count: draw.elem_count / 3,
            });
        }
        Ok(())
    }

    /// Draws recorded by the last upload.
    pub fn plan(&self) -> &[PlannedDraw] {
        &self.plan
    }

    /// Screen position of the viewport's top-left corner in the last upload.
    pub fn display_pos(&self) -> [f32; 2] {
        self.display_pos
    }

    pub fn vertex_buffer(&self) -> &D::Buffer {
        self.vertices.buffer()
    }

    pub fn index_buffer(&self) -> &D::Buffer {
        self.indices.buffer()
    }

    /// Vertex buffer capacity in vertices.
    pub fn vertex_capacity(&self) -> usize {
        self.vertices.capacity()
    }

    /// Index buffer capacity in indices.
    pub fn index_capacity(&self) -> usize {
        self.indices.capacity()
    }

    /// Releases both buffers.
    pub fn destroy(self, device: &mut D) {
        self.vertices.destroy(device);
        self.indices.destroy(device);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{DeviceCall, HeadlessDevice, HeadlessTexture, PassCommand};
    use imbridge_core::{pack_color, BridgeError, DrawList, DrawListBuilder, Vec2};
    use proptest::prelude::*;

    const WHITE: u32 = pack_color([255, 255, 255, 255]);

    fn quad_list(texture: TextureId, quads: usize) -> DrawList {
        let mut b = DrawListBuilder::new(texture, Vec2::ZERO);
        for i in 0..quads {
            let min = Vec2::splat(i as f32);
            b.add_rect_filled(min, min + Vec2::ONE, WHITE);
        }
        b.build()
    }

    fn setup(vtx: usize, idx: usize) -> (HeadlessDevice, DrawTranslator<HeadlessDevice>) {
        let mut device = HeadlessDevice::new();
        let translator = DrawTranslator::new(&mut device, vtx, idx, GrowthPolicy::Exact).unwrap();
        (device, translator)
    }

    #[test]
    fn test_clamp_scissor_inside() {
        let rect = clamp_scissor([10.0, 20.0, 110.0, 70.0], [800, 600]);
        assert_eq!(
            rect,
            ScissorRect {
                x: 10,
                y: 20,
                width: 100,
                height: 50
            }
        );
    }

    #[test]
    fn test_clamp_scissor_overhanging() {
        let rect = clamp_scissor([-50.0, -10.0, 900.0, 700.0], [800, 600]);
        assert_eq!(
            rect,
            ScissorRect {
                x: 0,
                y: 0,
                width: 800,
                height: 600
            }
        );
    }

    #[test]
    fn test_clamp_scissor_outside_is_empty() {
        let rect = clamp_scissor([900.0, 10.0, 1000.0, 20.0], [800, 600]);
        assert_eq!(rect.x, 800);
        assert_eq!(rect.width, 0);

        let inverted = clamp_scissor([50.0, 50.0, 10.0, 10.0], [800, 600]);
        assert_eq!(inverted.width, 0);
        assert_eq!(inverted.height, 0);
    }

    #[test]
    fn test_plan_offsets_across_lists() {
        let (mut device, mut translator) = setup(64, 64);
        let tex = TextureId::new(1);

        let mut second = DrawListBuilder::new(tex, Vec2::ZERO);
        second.add_rect_filled(Vec2::ZERO, Vec2::ONE, WHITE);
        second.set_texture(TextureId::new(2));
        second.add_rect_filled(Vec2::ZERO, Vec2::ONE, WHITE);

        let mut data = DrawData::new([100.0, 100.0]);
        data.lists.push(quad_list(tex, 2));
        data.lists.push(second.build());
        translator.upload(&mut device, &data).unwrap();

        let plan = translator.plan();
        assert_eq!(plan.len(), 3);
        assert_eq!((plan[0].base_vertex, plan[0].first_index, plan[0].elem_count), (0, 0, 12));
        assert_eq!((plan[1].base_vertex, plan[1].first_index), (8, 12));
        assert_eq!((plan[2].base_vertex, plan[2].first_index), (12, 18));
        assert_eq!(plan[2].texture_id, TextureId::new(2));
    }

    #[test]
    fn test_upload_writes_each_buffer_once() {
        let (mut device, mut translator) = setup(64, 64);
        device.clear_calls();

        let mut data = DrawData::new([100.0, 100.0]);
        data.lists.push(quad_list(TextureId::new(1), 1));
        data.lists.push(quad_list(TextureId::new(1), 1));
        translator.upload(&mut device, &data).unwrap();

        let writes: Vec<_> = device
            .calls()
            .iter()
            .filter(|c| matches!(c, DeviceCall::WriteBuffer { .. }))
            .collect();
        assert_eq!(writes.len(), 2);

        let vtx = device.buffer_data(translator.vertex_buffer()).unwrap();
        let expected: &[u8] = bytemuck::cast_slice(&data.lists[1].vtx_buffer);
        assert_eq!(&vtx[80..160], expected);
    }

    #[test]
    fn test_growth_replaces_buffer() {
        let (mut device, mut translator) = setup(4, 6);
        device.clear_calls();

        let mut data = DrawData::new([100.0, 100.0]);
        data.lists.push(quad_list(TextureId::new(1), 3));
        translator.upload(&mut device, &data).unwrap();

        assert_eq!(translator.vertex_capacity(), 12);
        assert_eq!(translator.index_capacity(), 18);
        // New buffer is created before the old one is destroyed.
        let calls = device.calls();
        let created = calls
            .iter()
            .position(|c| matches!(c, DeviceCall::CreateBuffer { kind: BufferKind::Vertex, .. }))
            .unwrap();
        let destroyed = calls
            .iter()
            .position(|c| matches!(c, DeviceCall::DestroyBuffer { .. }))
            .unwrap();
        assert!(created < destroyed);
        assert_eq!(device.live_buffers(), 2);
    }

    #[test]
    fn test_failed_growth_keeps_old_buffer() {
        let (mut device, mut translator) = setup(4, 6);
        device.set_fail_allocations(true);

        let mut data = DrawData::new([100.0, 100.0]);
        data.lists.push(quad_list(TextureId::new(1), 3));
        assert!(translator.upload(&mut device, &data).is_err());
        assert_eq!(translator.vertex_capacity(), 4);
        assert!(translator.plan().is_empty());
        assert!(device.buffer_data(translator.vertex_buffer()).is_some());
    }

    #[test]
    fn test_render_unknown_texture_stops() {
        let (mut device, mut translator) = setup(64, 64);
        let known = HeadlessTexture {
            id: 100,
            width: 1,
            height: 1,
            format: imbridge_core::TextureFormat::Rgba8Unorm,
        };
        let mut registry = TextureRegistry::new();
        registry.bind(&known);

        let mut data = DrawData::new([100.0, 100.0]);
        data.lists.push(quad_list(TextureId::new(100), 1));
        data.lists.push(quad_list(TextureId::new(555), 1));
        translator.upload(&mut device, &data).unwrap();

        let sampler = device.create_sampler(&Default::default()).unwrap();
        let result = {
            let mut pass = device.begin_pass();
            translator.render(&mut pass, &registry, &sampler, [100, 100])
        };
        assert!(matches!(result, Err(BridgeError::UnknownTexture(id)) if id == TextureId::new(555)));

        let commands = device.last_pass().unwrap();
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[2], PassCommand::DrawIndexed(_)));
    }

    #[test]
    fn test_scissor_relative_to_display_pos() {
        let (mut device, mut translator) = setup(64, 64);
        let texture = HeadlessTexture {
            id: 7,
            width: 1,
            height: 1,
            format: imbridge_core::TextureFormat::Rgba8Unorm,
        };
        let mut registry = TextureRegistry::new();
        registry.bind(&texture);

        let mut list = quad_list(TextureId::new(7), 1);
        list.commands[0].clip_rect = [100.0, 50.0, 300.0, 250.0];
        let mut data = DrawData::new([800.0, 600.0]);
        data.display_pos = [100.0, 50.0];
        data.lists.push(list);
        translator.upload(&mut device, &data).unwrap();
        assert_eq!(translator.display_pos(), [100.0, 50.0]);

        let sampler = device.create_sampler(&Default::default()).unwrap();
        {
            let mut pass = device.begin_pass();
            translator.render(&mut pass, &registry, &sampler, [800, 600]).unwrap();
        }
        assert_eq!(
            device.last_pass().unwrap()[1],
            PassCommand::SetScissor(ScissorRect {
                x: 0,
                y: 0,
                width: 200,
                height: 200,
            })
        );
    }

    #[test]
    fn test_empty_frame_issues_nothing() {
        let (mut device, mut translator) = setup(8, 8);
        device.clear_calls();
        translator.upload(&mut device, &DrawData::new([10.0, 10.0])).unwrap();
        assert!(device.calls().is_empty());
        assert!(translator.plan().is_empty());
    }

    proptest! {
        #[test]
        fn prop_capacity_monotonic_and_sufficient(
            frames in proptest::collection::vec(0usize..40, 1..12),
            doubling in any::<bool>(),
        ) {
            let growth = if doubling { GrowthPolicy::Doubling } else { GrowthPolicy::Exact };
            let mut device = HeadlessDevice::new();
            let mut translator =
                DrawTranslator::new(&mut device, 4, 6, growth).unwrap();
            let mut last = (translator.vertex_capacity(), translator.index_capacity());

            for quads in frames {
                let mut data = DrawData::new([100.0, 100.0]);
                data.lists.push(quad_list(TextureId::new(1), quads));
                translator.upload(&mut device, &data).unwrap();

                let now = (translator.vertex_capacity(), translator.index_capacity());
                prop_assert!(now.0 >= last.0 && now.1 >= last.1);
                prop_assert!(now.0 >= data.total_vtx_count());
                prop_assert!(now.1 >= data.total_idx_count());
                prop_assert_eq!(device.live_buffers(), 2);
                last = now;
            }
        }
    }
}
