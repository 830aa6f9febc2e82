//! End-to-end frames through the adapter on a headless device.

use imbridge::headless::{DeviceCall, HeadlessDevice, HeadlessTexture, PassCommand};
use imbridge::*;
use imbridge_core::{BufferKind, DrawIndexed, IndexFormat};

fn setup(options: &AdapterOptions) -> (HeadlessDevice, IoState, FontAtlas, GuiAdapter<HeadlessDevice>) {
    let mut device = HeadlessDevice::new();
    let mut io = IoState::new();
    let mut fonts = FontAtlas::white(8, 8);
    let adapter = GuiAdapter::new(
        &mut device,
        &mut io,
        &mut fonts,
        TextureFormat::Bgra8Unorm,
        [1280, 720],
        options,
        None,
    )
    .unwrap();
    (device, io, fonts, adapter)
}

fn quad(texture_id: TextureId, clip_rect: [f32; 4]) -> DrawList {
    let white = Vec2::new(0.0, 0.0);
    let col = pack_color([255, 255, 255, 255]);
    DrawList {
        vtx_buffer: vec![
            DrawVert::new(Vec2::new(10.0, 10.0), white, col),
            DrawVert::new(Vec2::new(50.0, 10.0), white, col),
            DrawVert::new(Vec2::new(50.0, 50.0), white, col),
            DrawVert::new(Vec2::new(10.0, 50.0), white, col),
        ],
        idx_buffer: vec![0, 1, 2, 0, 2, 3],
        commands: vec![DrawCmd {
            clip_rect,
            texture_id,
            vtx_offset: 0,
            idx_offset: 0,
            elem_count: 6,
        }],
    }
}

fn frame_of(lists: Vec<DrawList>) -> DrawData {
    let mut data = DrawData::new([1280.0, 720.0]);
    data.lists = lists;
    data
}

fn draws(commands: &[PassCommand]) -> Vec<DrawIndexed> {
    commands
        .iter()
        .filter_map(|c| match c {
            PassCommand::DrawIndexed(d) => Some(*d),
            _ => None,
        })
        .collect()
}

#[test]
fn test_single_quad_frame() {
    let (mut device, _io, fonts, mut adapter) = setup(&AdapterOptions::default());
    let font = fonts.texture_id().unwrap();

    adapter
        .upload(&mut device, &frame_of(vec![quad(font, [0.0, 0.0, 1280.0, 720.0])]))
        .unwrap();
    {
        let mut pass = device.begin_pass();
        adapter.render(&mut pass).unwrap();
    }

    let commands = device.last_pass().unwrap();
    assert_eq!(commands.len(), 7);
    assert!(matches!(commands[0], PassCommand::BindPipeline { .. }));
    assert!(matches!(&commands[1], PassCommand::PushVertexUniforms(bytes) if bytes.len() == 64));
    assert!(matches!(commands[2], PassCommand::BindVertexBuffer { .. }));
    assert!(matches!(
        commands[3],
        PassCommand::BindIndexBuffer {
            format: IndexFormat::Uint16,
            ..
        }
    ));
    assert!(matches!(commands[4], PassCommand::BindTextureSampler { texture, .. } if texture == font));
    assert_eq!(
        commands[5],
        PassCommand::SetScissor(ScissorRect {
            x: 0,
            y: 0,
            width: 1280,
            height: 720,
        })
    );
    assert_eq!(
        commands[6],
        PassCommand::DrawIndexed(DrawIndexed {
            base_vertex: 0,
            first_index: 0,
            triangle_count: 2,
        })
    );
}

#[test]
fn test_second_list_is_offset_by_the_first() {
    let (mut device, _io, fonts, mut adapter) = setup(&AdapterOptions::default());
    let font = fonts.texture_id().unwrap();
    let full = [0.0, 0.0, 1280.0, 720.0];

    adapter
        .upload(&mut device, &frame_of(vec![quad(font, full), quad(font, full)]))
        .unwrap();
    {
        let mut pass = device.begin_pass();
        adapter.render(&mut pass).unwrap();
    }

    let issued = draws(device.last_pass().unwrap());
    assert_eq!(issued.len(), 2);
    assert_eq!((issued[0].base_vertex, issued[0].first_index), (0, 0));
    assert_eq!((issued[1].base_vertex, issued[1].first_index), (4, 6));
}

#[test]
fn test_clip_rect_clamped_to_viewport() {
    let (mut device, _io, fonts, mut adapter) = setup(&AdapterOptions::default());
    let font = fonts.texture_id().unwrap();

    adapter
        .upload(
            &mut device,
            &frame_of(vec![
                quad(font, [-10.0, 20.0, 2000.0, 700.0]),
                quad(font, [1500.0, 800.0, 1600.0, 900.0]),
            ]),
        )
        .unwrap();
    {
        let mut pass = device.begin_pass();
        adapter.render(&mut pass).unwrap();
    }

    let scissors: Vec<ScissorRect> = device
        .last_pass()
        .unwrap()
        .iter()
        .filter_map(|c| match c {
            PassCommand::SetScissor(r) => Some(*r),
            _ => None,
        })
        .collect();
    assert_eq!(
        scissors[0],
        ScissorRect {
            x: 0,
            y: 20,
            width: 1280,
            height: 680,
        }
    );
    // Entirely off-screen: empty, and the draw is still issued.
    assert_eq!(scissors[1].width, 0);
    assert_eq!(scissors[1].height, 0);
    assert_eq!(draws(device.last_pass().unwrap()).len(), 2);
}

#[test]
fn test_buffers_grow_for_large_frames() {
    let (mut device, _io, fonts, mut adapter) = setup(&AdapterOptions::default());
    let font = fonts.texture_id().unwrap();
    assert_eq!(adapter.renderer().translator().vertex_capacity(), 4096);

    // 1250 quads: 5000 vertices, 7500 indices.
    let mut builder = DrawListBuilder::new(font, fonts.white_uv());
    for i in 0..1250 {
        let x = (i % 50) as f32 * 10.0;
        let y = (i / 50) as f32 * 10.0;
        builder.add_rect_filled(Vec2::new(x, y), Vec2::new(x + 8.0, y + 8.0), pack_color([0, 0, 0, 255]));
    }
    device.clear_calls();
    adapter.upload(&mut device, &frame_of(vec![builder.build()])).unwrap();

    let translator = adapter.renderer().translator();
    assert_eq!(translator.vertex_capacity(), 5000);
    assert_eq!(translator.index_capacity(), 7500);

    let created: Vec<&DeviceCall> = device
        .calls()
        .iter()
        .filter(|c| matches!(c, DeviceCall::CreateBuffer { .. }))
        .collect();
    assert_eq!(created.len(), 2);
    assert!(matches!(
        created[0],
        DeviceCall::CreateBuffer {
            kind: BufferKind::Vertex,
            size: 100_000,
            ..
        }
    ));

    // Shrinking back does not reallocate.
    device.clear_calls();
    adapter
        .upload(&mut device, &frame_of(vec![quad(font, [0.0, 0.0, 10.0, 10.0])]))
        .unwrap();
    assert!(!device
        .calls()
        .iter()
        .any(|c| matches!(c, DeviceCall::CreateBuffer { .. })));
    assert_eq!(adapter.renderer().translator().vertex_capacity(), 5000);
}

#[test]
fn test_user_texture_round_trip() {
    let (mut device, _io, _fonts, mut adapter) = setup(&AdapterOptions::default());
    let texture: HeadlessTexture = device.create_texture(2, 2, TextureFormat::Rgba8Unorm).unwrap();

    let id = adapter.bind_texture(&texture);
    assert_eq!(adapter.bind_texture(&texture), id);
    assert_eq!(adapter.renderer().resolve(id).unwrap(), &texture);

    adapter
        .upload(&mut device, &frame_of(vec![quad(id, [0.0, 0.0, 100.0, 100.0])]))
        .unwrap();
    {
        let mut pass = device.begin_pass();
        adapter.render(&mut pass).unwrap();
    }
    assert!(device
        .last_pass()
        .unwrap()
        .iter()
        .any(|c| matches!(c, PassCommand::BindTextureSampler { texture: t, .. } if *t == id)));

    assert_eq!(adapter.unbind_texture(&texture), Some(texture.clone()));
    assert!(matches!(
        adapter.renderer().resolve(id),
        Err(BridgeError::UnknownTexture(_))
    ));
    // Unbinding never destroys the caller's texture.
    assert!(device.texture_data(&texture).is_some());
}

#[test]
fn test_unknown_texture_stops_the_frame() {
    let (mut device, _io, fonts, mut adapter) = setup(&AdapterOptions::default());
    let font = fonts.texture_id().unwrap();
    let full = [0.0, 0.0, 1280.0, 720.0];

    adapter
        .upload(
            &mut device,
            &frame_of(vec![quad(font, full), quad(TextureId::new(9999), full), quad(font, full)]),
        )
        .unwrap();
    let result = {
        let mut pass = device.begin_pass();
        adapter.render(&mut pass)
    };

    assert!(matches!(result, Err(BridgeError::UnknownTexture(id)) if id == TextureId::new(9999)));
    // Only the first command made it.
    assert_eq!(draws(device.last_pass().unwrap()).len(), 1);
}

#[test]
fn test_resize_updates_projection_and_scissor() {
    let (mut device, mut io, fonts, mut adapter) = setup(&AdapterOptions::default());
    let font = fonts.texture_id().unwrap();

    adapter.resize(&mut io, 800, 600);
    assert_eq!(io.display_size, [800.0, 600.0]);
    assert_eq!(adapter.renderer().viewport(), [800, 600]);
    let corner = adapter.renderer().projection() * Vec4::new(800.0, 600.0, 0.0, 1.0);
    assert!((corner.x - 1.0).abs() < 1e-5);
    assert!((corner.y + 1.0).abs() < 1e-5);

    adapter
        .upload(&mut device, &frame_of(vec![quad(font, [0.0, 0.0, 1280.0, 720.0])]))
        .unwrap();
    {
        let mut pass = device.begin_pass();
        adapter.render(&mut pass).unwrap();
    }
    assert!(device.last_pass().unwrap().contains(&PassCommand::SetScissor(ScissorRect {
        x: 0,
        y: 0,
        width: 800,
        height: 600,
    })));
}

#[test]
fn test_options_from_json() {
    let options = AdapterOptions::from_json_str(
        r#"{ "initial_vertex_capacity": 16, "initial_index_capacity": 24, "growth": "Doubling" }"#,
    )
    .unwrap();
    let (mut device, _io, fonts, mut adapter) = setup(&options);
    let font = fonts.texture_id().unwrap();
    assert_eq!(adapter.renderer().translator().vertex_capacity(), 16);

    let mut builder = DrawListBuilder::new(font, fonts.white_uv());
    for i in 0..5 {
        let x = i as f32 * 10.0;
        builder.add_rect_filled(Vec2::new(x, 0.0), Vec2::new(x + 5.0, 5.0), pack_color([9, 9, 9, 255]));
    }
    adapter.upload(&mut device, &frame_of(vec![builder.build()])).unwrap();
    // 20 vertices round up to 32, 30 indices to 32.
    assert_eq!(adapter.renderer().translator().vertex_capacity(), 32);
    assert_eq!(adapter.renderer().translator().index_capacity(), 32);
}
