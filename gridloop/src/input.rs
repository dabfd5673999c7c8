// input.rs - Maps egui input into platform-neutral InputEvents

use std::time::Instant;

use egui::{Key, Modifiers, PointerButton, Pos2};

use crate::events::{ButtonState, InputEvent, KeyEvent, Keysym, MOD_ALT, MOD_CTRL, MOD_GUI, MOD_SHIFT};

/// Stateful translator: remembers where the pointer was so motion events
/// can carry relative deltas.
pub struct InputTranslator {
    started: Instant,
    last_pointer: Option<Pos2>,
}

impl Default for InputTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl InputTranslator {
    pub fn new() -> Self {
        Self { started: Instant::now(), last_pointer: None }
    }

    /// Milliseconds since the translator was created, saturating.
    pub fn timestamp(&self) -> u32 {
        u32::try_from(self.started.elapsed().as_millis()).unwrap_or(u32::MAX)
    }

    pub fn translate(&mut self, event: &egui::Event) -> Option<InputEvent> {
        let timestamp = self.timestamp();
        self.translate_at(event, timestamp)
    }

    pub fn translate_at(&mut self, event: &egui::Event, timestamp: u32) -> Option<InputEvent> {
        match event {
            egui::Event::Key { key, pressed, repeat, modifiers, .. } => {
                let key = KeyEvent {
                    symbol: key_symbol(*key),
                    modifiers: modifier_bits(*modifiers),
                    repeat: *repeat,
                    timestamp,
                };
                Some(if *pressed { InputEvent::KeyDown(key) } else { InputEvent::KeyUp(key) })
            }
            egui::Event::PointerMoved(pos) => {
                let (xrel, yrel) = match self.last_pointer {
                    Some(last) => ((pos.x - last.x).round() as i32, (pos.y - last.y).round() as i32),
                    None => (0, 0),
                };
                self.last_pointer = Some(*pos);
                Some(InputEvent::MouseMotion {
                    x: pos.x.round() as i32,
                    y: pos.y.round() as i32,
                    xrel,
                    yrel,
                    timestamp,
                })
            }
            egui::Event::PointerButton { pos, button, pressed, .. } => Some(InputEvent::MouseButton {
                x: pos.x.round() as i32,
                y: pos.y.round() as i32,
                button: button_number(*button),
                state: if *pressed { ButtonState::Pressed } else { ButtonState::Released },
                timestamp,
            }),
            egui::Event::Scroll(delta) => Some(InputEvent::MouseWheel {
                x: delta.x.round() as i32,
                y: delta.y.round() as i32,
                timestamp,
            }),
            egui::Event::PointerGone => {
                self.last_pointer = None;
                None
            }
            _ => None,
        }
    }
}

/// Single-character keys become `Char`, always unshifted like a keyboard
/// keysym; modifiers travel separately.
pub fn key_symbol(key: Key) -> Keysym {
    let name = key.name();
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Keysym::Char(c.to_ascii_lowercase()),
        _ => Keysym::Named(name),
    }
}

pub fn modifier_bits(modifiers: Modifiers) -> u16 {
    let mut bits = 0;
    if modifiers.shift {
        bits |= MOD_SHIFT;
    }
    if modifiers.ctrl {
        bits |= MOD_CTRL;
    }
    if modifiers.alt {
        bits |= MOD_ALT;
    }
    if modifiers.mac_cmd {
        bits |= MOD_GUI;
    }
    bits
}

/// 1 left, 2 middle, 3 right, then the extra buttons.
pub fn button_number(button: PointerButton) -> u8 {
    match button {
        PointerButton::Primary => 1,
        PointerButton::Middle => 2,
        PointerButton::Secondary => 3,
        PointerButton::Extra1 => 4,
        PointerButton::Extra2 => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn test_key_symbols() {
        assert_eq!(key_symbol(Key::Q), Keysym::Char('q'));
        assert_eq!(key_symbol(Key::A), Keysym::Char('a'));
        assert_eq!(key_symbol(Key::Num1), Keysym::Char('1'));
        assert_eq!(key_symbol(Key::Escape), Keysym::Named("Escape"));
    }

    #[test]
    fn test_shifted_key_stays_unshifted() {
        let mut translator = InputTranslator::new();
        let event = egui::Event::Key {
            key: Key::Q,
            pressed: true,
            repeat: false,
            modifiers: Modifiers::SHIFT,
        };

        let expected = KeyEvent { symbol: Keysym::Char('q'), modifiers: MOD_SHIFT, repeat: false, timestamp: 3 };
        assert_eq!(translator.translate_at(&event, 3), Some(InputEvent::KeyDown(expected)));
    }

    #[test]
    fn test_modifier_bits() {
        assert_eq!(modifier_bits(Modifiers::NONE), 0);
        assert_eq!(modifier_bits(Modifiers::SHIFT), MOD_SHIFT);
        assert_eq!(modifier_bits(Modifiers::CTRL | Modifiers::ALT), MOD_CTRL | MOD_ALT);
    }

    #[test]
    fn test_pointer_motion_is_relative() {
        let mut translator = InputTranslator::new();

        let first = translator.translate_at(&egui::Event::PointerMoved(pos2(10.0, 20.0)), 1);
        assert_eq!(first, Some(InputEvent::MouseMotion { x: 10, y: 20, xrel: 0, yrel: 0, timestamp: 1 }));

        let second = translator.translate_at(&egui::Event::PointerMoved(pos2(13.0, 15.0)), 2);
        assert_eq!(second, Some(InputEvent::MouseMotion { x: 13, y: 15, xrel: 3, yrel: -5, timestamp: 2 }));

        assert_eq!(translator.translate_at(&egui::Event::PointerGone, 3), None);
        let after_gone = translator.translate_at(&egui::Event::PointerMoved(pos2(1.0, 1.0)), 4);
        assert_eq!(after_gone, Some(InputEvent::MouseMotion { x: 1, y: 1, xrel: 0, yrel: 0, timestamp: 4 }));
    }

    #[test]
    fn test_pointer_button() {
        let mut translator = InputTranslator::new();
        let event = egui::Event::PointerButton {
            pos: pos2(5.0, 6.0),
            button: PointerButton::Secondary,
            pressed: false,
            modifiers: Modifiers::NONE,
        };

        assert_eq!(
            translator.translate_at(&event, 7),
            Some(InputEvent::MouseButton { x: 5, y: 6, button: 3, state: ButtonState::Released, timestamp: 7 })
        );
    }

    #[test]
    fn test_scroll_becomes_wheel() {
        let mut translator = InputTranslator::new();
        assert_eq!(
            translator.translate_at(&egui::Event::Scroll(vec2(0.0, -2.0)), 8),
            Some(InputEvent::MouseWheel { x: 0, y: -2, timestamp: 8 })
        );
    }

    #[test]
    fn test_unrelated_events_are_ignored() {
        let mut translator = InputTranslator::new();
        assert_eq!(translator.translate_at(&egui::Event::Text("q".into()), 0), None);
        assert_eq!(translator.translate_at(&egui::Event::Copy, 0), None);
    }
}
