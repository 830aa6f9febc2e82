//! Translates one frame on the headless device and logs what it recorded.
//!
//! Run with: RUST_LOG=info cargo run --example headless_frame

use std::time::Duration;

use imbridge::headless::HeadlessDevice;
use imbridge::*;

fn main() -> Result<()> {
    init_logging();

    let mut device = HeadlessDevice::new();
    let mut io = IoState::new();
    let mut fonts = FontAtlas::white(8, 8);
    let mut adapter = GuiAdapter::new(
        &mut device,
        &mut io,
        &mut fonts,
        TextureFormat::Bgra8Unorm,
        [800, 600],
        &AdapterOptions::default(),
        Some(Box::new(MemoryClipboard::default())),
    )?;

    let mut snapshot = InputSnapshot::default();
    snapshot.mouse.x = 100.0;
    snapshot.mouse.y = 80.0;
    snapshot.keyboard.press(HostKey::LeftControl);
    snapshot.keyboard.press(HostKey::C);
    adapter.new_frame(&mut io, &snapshot, Duration::from_millis(16));
    for event in io.drain_events() {
        log::info!("event: {event:?}");
    }

    let font = fonts
        .texture_id()
        .ok_or_else(|| BridgeError::Device("font atlas was not uploaded".to_string()))?;
    let mut builder = DrawListBuilder::new(font, fonts.white_uv());
    builder
        .add_rect_filled(Vec2::new(10.0, 10.0), Vec2::new(200.0, 40.0), pack_color([40, 40, 40, 255]))
        .set_clip_rect(Vec2::new(0.0, 0.0), Vec2::new(900.0, 100.0))
        .add_rect_filled(Vec2::new(700.0, 20.0), Vec2::new(850.0, 60.0), pack_color([200, 0, 0, 255]));
    let mut data = DrawData::new(io.display_size);
    data.lists.push(builder.build());

    adapter.upload(&mut device, &data)?;
    {
        let mut pass = device.begin_pass();
        adapter.render(&mut pass)?;
    }

    for call in device.calls() {
        log::info!("device: {call:?}");
    }
    for command in device.last_pass().unwrap_or_default() {
        log::info!("pass: {command:?}");
    }

    adapter.destroy(&mut device);
    Ok(())
}
