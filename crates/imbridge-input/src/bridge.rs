//! Host input to GUI event translation.
//!
//! [`InputBridge::advance`] compares each snapshot with the previous one and
//! forwards only what changed: every press and release of a button or key
//! reaches the GUI exactly once. Mouse position and wheel are sampled values
//! and go out every tick.

use std::time::Duration;

use imbridge_core::{GuiEvent, GuiIo, GuiKey, ModifierPolicy, MouseButton, NativeKeyData};

use crate::host_key::HostKey;
use crate::keymap::to_gui_key;
use crate::snapshot::{InputSnapshot, KeyboardState};

/// Aggregate modifier state in [`GuiKey::MODIFIERS`] order.
fn modifier_state(keyboard: &KeyboardState) -> [bool; 4] {
    [
        keyboard.either_down(HostKey::LeftControl, HostKey::RightControl),
        keyboard.either_down(HostKey::LeftShift, HostKey::RightShift),
        keyboard.either_down(HostKey::LeftAlt, HostKey::RightAlt),
        keyboard.either_down(HostKey::LeftMeta, HostKey::RightMeta),
    ]
}

/// Edge-detecting input translator.
#[derive(Debug, Clone, Default)]
pub struct InputBridge {
    policy: ModifierPolicy,
    /// Button states of the previous sample, indexed by [`MouseButton::index`]
    buttons: [bool; 3],
    keys: KeyboardState,
    modifiers: [bool; 4],
}

impl InputBridge {
    pub fn new(policy: ModifierPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> ModifierPolicy {
        self.policy
    }

    /// Forwards one input sample to the GUI.
    ///
    /// Event order: mouse position, wheel, modifiers, buttons (left, right,
    /// middle), then keys in scancode order.
    pub fn advance<I>(&mut self, io: &mut I, snapshot: &InputSnapshot, delta: Duration)
    where
        I: GuiIo + ?Sized,
    {
        io.set_delta_time(delta.as_secs_f32());

        let mouse = &snapshot.mouse;
        io.add_event(GuiEvent::MousePos {
            x: mouse.x,
            y: mouse.y,
        });
        io.add_event(GuiEvent::MouseWheel {
            horizontal: 0.0,
            vertical: mouse.wheel,
        });

        let modifiers = modifier_state(&snapshot.keyboard);
        let any_pressed = MouseButton::ALL
            .iter()
            .any(|b| mouse.is_down(*b) && !self.buttons[b.index()])
            || snapshot.keyboard.iter().any(|k| !self.keys.is_down(k));
        for (i, key) in GuiKey::MODIFIERS.into_iter().enumerate() {
            let emit = match self.policy {
                ModifierPolicy::OnChange => modifiers[i] != self.modifiers[i],
                ModifierPolicy::OnKeyPress => any_pressed,
                ModifierPolicy::EveryTick => true,
            };
            if emit {
                io.add_event(GuiEvent::Key {
                    key,
                    down: modifiers[i],
                    native: None,
                });
            }
        }
        self.modifiers = modifiers;

        for button in MouseButton::ALL {
            let down = mouse.is_down(button);
            if down != self.buttons[button.index()] {
                io.add_event(GuiEvent::MouseButton { button, down });
                self.buttons[button.index()] = down;
            }
        }

        for key in HostKey::ALL {
            let down = snapshot.keyboard.is_down(key);
            if down != self.keys.is_down(key) {
                let code = key.native_code();
                io.add_event(GuiEvent::Key {
                    key: to_gui_key(key),
                    down,
                    native: Some(NativeKeyData {
                        keycode: code,
                        scancode: code,
                    }),
                });
            }
        }
        self.keys.clone_from(&snapshot.keyboard);
    }

    /// Forwards one typed character immediately.
    pub fn text_input<I>(&self, io: &mut I, ch: char)
    where
        I: GuiIo + ?Sized,
    {
        io.add_event(GuiEvent::Char(ch));
    }

    /// Forgets the previous sample, as if every input had been released.
    pub fn reset(&mut self) {
        self.buttons = [false; 3];
        self.keys.clear();
        self.modifiers = [false; 4];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imbridge_core::IoState;
    use proptest::prelude::*;

    const TICK: Duration = Duration::from_millis(16);

    fn keys(events: &[GuiEvent]) -> Vec<(GuiKey, bool)> {
        events
            .iter()
            .filter_map(|e| match e {
                GuiEvent::Key { key, down, .. } => Some((*key, *down)),
                _ => None,
            })
            .collect()
    }

    fn tick(bridge: &mut InputBridge, snapshot: &InputSnapshot) -> Vec<GuiEvent> {
        let mut io = IoState::new();
        bridge.advance(&mut io, snapshot, TICK);
        io.drain_events()
    }

    #[test]
    fn test_mouse_sampled_every_tick() {
        let mut bridge = InputBridge::default();
        let mut snap = InputSnapshot::new();
        snap.mouse.x = 10.0;
        snap.mouse.y = 20.0;
        snap.mouse.wheel = -1.5;

        let mut io = IoState::new();
        bridge.advance(&mut io, &snap, Duration::from_millis(500));
        assert!((io.delta_time - 0.5).abs() < f32::EPSILON);
        let events = io.drain_events();
        assert_eq!(
            events,
            vec![
                GuiEvent::MousePos { x: 10.0, y: 20.0 },
                GuiEvent::MouseWheel {
                    horizontal: 0.0,
                    vertical: -1.5
                },
            ]
        );
        assert_eq!(tick(&mut bridge, &snap).len(), 2);
    }

    #[test]
    fn test_button_edges() {
        let mut bridge = InputBridge::default();
        let mut snap = InputSnapshot::new();
        snap.mouse.left = true;
        snap.mouse.middle = true;

        let events = tick(&mut bridge, &snap);
        assert_eq!(
            &events[2..],
            &[
                GuiEvent::MouseButton {
                    button: MouseButton::Left,
                    down: true
                },
                GuiEvent::MouseButton {
                    button: MouseButton::Middle,
                    down: true
                },
            ]
        );
        // Held: nothing new.
        assert_eq!(tick(&mut bridge, &snap).len(), 2);

        snap.mouse.left = false;
        let events = tick(&mut bridge, &snap);
        assert_eq!(
            events[2],
            GuiEvent::MouseButton {
                button: MouseButton::Left,
                down: false
            }
        );
    }

    #[test]
    fn test_key_edges_carry_native_data() {
        let mut bridge = InputBridge::default();
        let mut snap = InputSnapshot::new();
        snap.keyboard.press(HostKey::F13);

        let events = tick(&mut bridge, &snap);
        assert_eq!(
            events[2],
            GuiEvent::Key {
                key: GuiKey::None,
                down: true,
                native: Some(NativeKeyData {
                    keycode: 104,
                    scancode: 104
                }),
            }
        );
        assert_eq!(tick(&mut bridge, &snap).len(), 2);
    }

    #[test]
    fn test_modifiers_on_change() {
        let mut bridge = InputBridge::new(ModifierPolicy::OnChange);
        let mut snap = InputSnapshot::new();
        snap.keyboard.press(HostKey::LeftControl);

        let events = keys(&tick(&mut bridge, &snap));
        assert_eq!(events, vec![(GuiKey::ModCtrl, true), (GuiKey::LeftCtrl, true)]);

        // The other side going down leaves the aggregate unchanged.
        snap.keyboard.press(HostKey::RightControl);
        assert_eq!(keys(&tick(&mut bridge, &snap)), vec![(GuiKey::RightCtrl, true)]);

        snap.keyboard.clear();
        let events = keys(&tick(&mut bridge, &snap));
        assert_eq!(events[0], (GuiKey::ModCtrl, false));
    }

    #[test]
    fn test_modifiers_on_key_press() {
        let mut bridge = InputBridge::new(ModifierPolicy::OnKeyPress);
        let mut snap = InputSnapshot::new();
        snap.keyboard.press(HostKey::LeftShift);

        let events = keys(&tick(&mut bridge, &snap));
        assert_eq!(
            &events[..4],
            &[
                (GuiKey::ModCtrl, false),
                (GuiKey::ModShift, true),
                (GuiKey::ModAlt, false),
                (GuiKey::ModSuper, false),
            ]
        );

        // Releasing alone is not a press, so modifiers stay quiet.
        snap.keyboard.clear();
        assert_eq!(keys(&tick(&mut bridge, &snap)), vec![(GuiKey::LeftShift, false)]);

        // A mouse press reports all four again.
        snap.mouse.right = true;
        assert_eq!(keys(&tick(&mut bridge, &snap)).len(), 4);
    }

    #[test]
    fn test_modifiers_every_tick() {
        let mut bridge = InputBridge::new(ModifierPolicy::EveryTick);
        let snap = InputSnapshot::new();
        assert_eq!(keys(&tick(&mut bridge, &snap)).len(), 4);
        assert_eq!(keys(&tick(&mut bridge, &snap)).len(), 4);
    }

    #[test]
    fn test_text_input_is_immediate() {
        let bridge = InputBridge::default();
        let mut io = IoState::new();
        bridge.text_input(&mut io, 'é');
        assert_eq!(io.events(), &[GuiEvent::Char('é')]);
    }

    #[test]
    fn test_reset_replays_held_input() {
        let mut bridge = InputBridge::default();
        let mut snap = InputSnapshot::new();
        snap.keyboard.press(HostKey::A);
        tick(&mut bridge, &snap);

        bridge.reset();
        assert_eq!(keys(&tick(&mut bridge, &snap)), vec![(GuiKey::A, true)]);
    }

    const SAMPLE_KEYS: [HostKey; 5] = [
        HostKey::A,
        HostKey::LeftShift,
        HostKey::RightShift,
        HostKey::KeypadEnter,
        HostKey::F20,
    ];

    fn snapshot_strategy() -> impl Strategy<Value = InputSnapshot> {
        (any::<[bool; 5]>(), any::<[bool; 3]>()).prop_map(|(keys, buttons)| {
            let mut snap = InputSnapshot::new();
            for (key, down) in SAMPLE_KEYS.iter().zip(keys) {
                snap.keyboard.set(*key, down);
            }
            snap.mouse.left = buttons[0];
            snap.mouse.right = buttons[1];
            snap.mouse.middle = buttons[2];
            snap
        })
    }

    proptest! {
        #[test]
        fn prop_edges_reported_exactly_once(
            snapshots in proptest::collection::vec(snapshot_strategy(), 1..20)
        ) {
            let mut bridge = InputBridge::new(ModifierPolicy::OnChange);
            let mut prev = InputSnapshot::new();

            for snap in &snapshots {
                let events = tick(&mut bridge, snap);

                for key in SAMPLE_KEYS {
                    let code = key.native_code();
                    let reported: Vec<bool> = events
                        .iter()
                        .filter_map(|e| match e {
                            GuiEvent::Key { down, native: Some(n), .. } if n.scancode == code => Some(*down),
                            _ => None,
                        })
                        .collect();
                    let now = snap.keyboard.is_down(key);
                    let expected = if now == prev.keyboard.is_down(key) { vec![] } else { vec![now] };
                    prop_assert_eq!(reported, expected);
                }

                for button in MouseButton::ALL {
                    let reported: Vec<bool> = events
                        .iter()
                        .filter_map(|e| match e {
                            GuiEvent::MouseButton { button: b, down } if *b == button => Some(*down),
                            _ => None,
                        })
                        .collect();
                    let now = snap.mouse.is_down(button);
                    let expected = if now == prev.mouse.is_down(button) { vec![] } else { vec![now] };
                    prop_assert_eq!(reported, expected);
                }

                let shift_now = modifier_state(&snap.keyboard)[1];
                let shift_before = modifier_state(&prev.keyboard)[1];
                let shift_events = events
                    .iter()
                    .filter(|e| matches!(e, GuiEvent::Key { key: GuiKey::ModShift, .. }))
                    .count();
                prop_assert_eq!(shift_events, usize::from(shift_now != shift_before));

                prev = snap.clone();
            }
        }
    }
}
