//! Raw input collection from winit events
//!
//! Plays the event-source role: writes key, mouse and touch state into an
//! [`InputEngine`]. Positions are stored in logical points; the engine applies the
//! backing scale itself.

use winit::event::{ElementState, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::engine::InputEngine;
use super::mouse::{MouseButtons, Wheel};
use super::touch::TouchPoint;
use super::viewport::sanitize_scale;

/// Pixels per wheel line for devices reporting pixel deltas
const PIXELS_PER_LINE: f32 = 20.0;

/// Translates winit window events into engine state
#[derive(Debug, Clone)]
pub struct InputCollector {
    scale_factor: f32,
}

impl InputCollector {
    /// Creates a new input collector
    pub fn new() -> Self {
        Self { scale_factor: 1.0 }
    }

    /// Update scale factor (DPI scaling)
    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        self.scale_factor = sanitize_scale(scale_factor);
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Handle a winit window event
    pub fn handle_window_event(&mut self, event: &WindowEvent, engine: &mut InputEngine) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.key(engine, code, event.state == ElementState::Pressed);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(engine, position.x, position.y);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse_button(engine, *button, *state == ElementState::Pressed);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let (x, y) = match delta {
                    MouseScrollDelta::LineDelta(x, y) => (*x, *y),
                    MouseScrollDelta::PixelDelta(pos) => (
                        pos.x as f32 / PIXELS_PER_LINE,
                        pos.y as f32 / PIXELS_PER_LINE,
                    ),
                };
                self.wheel_lines(engine, x, y);
            }

            WindowEvent::Touch(touch) => {
                self.touch(
                    engine,
                    touch.id,
                    touch.phase,
                    touch.location.x,
                    touch.location.y,
                );
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.set_scale_factor(*scale_factor as f32);
            }

            _ => {}
        }
    }

    /// Records a physical key press or release
    pub fn key(&self, engine: &mut InputEngine, code: KeyCode, pressed: bool) {
        if let Some(scancode) = hid_scancode(code) {
            engine.keys_mut().set(scancode, pressed);
        }
    }

    /// Records a cursor move given in physical pixels
    pub fn cursor_moved(&self, engine: &mut InputEngine, x: f64, y: f64) {
        let x = to_points(x, self.scale_factor);
        let y = to_points(y, self.scale_factor);
        engine.mouse_mut().move_to(x, y);
    }

    pub fn mouse_button(&self, engine: &mut InputEngine, button: MouseButton, pressed: bool) {
        let button = match button {
            MouseButton::Left => MouseButtons::LEFT,
            MouseButton::Right => MouseButtons::RIGHT,
            _ => return,
        };
        engine.mouse_mut().set_button(button, pressed);
    }

    /// Accumulates wheel movement given in lines; positive y scrolls up, positive x right
    pub fn wheel_lines(&self, engine: &mut InputEngine, x: f32, y: f32) {
        let mouse = engine.mouse_mut();
        if y > 0.0 {
            mouse.add_wheel(Wheel::Up, ticks(y));
        } else if y < 0.0 {
            mouse.add_wheel(Wheel::Down, ticks(y));
        }
        if x > 0.0 {
            mouse.add_wheel(Wheel::Right, ticks(x));
        } else if x < 0.0 {
            mouse.add_wheel(Wheel::Left, ticks(x));
        }
    }

    /// Records a touch phase for a contact at a position in physical pixels
    pub fn touch(&self, engine: &mut InputEngine, id: u64, phase: TouchPhase, x: f64, y: f64) {
        let x = (x / f64::from(self.scale_factor)) as f32;
        let y = (y / f64::from(self.scale_factor)) as f32;
        let touches = engine.touches_mut();

        match phase {
            TouchPhase::Started => {
                if !touches.update(id, x, y) {
                    touches.push(TouchPoint::new(id, x, y));
                }
            }
            TouchPhase::Moved => {
                touches.update(id, x, y);
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                touches.remove(id);
            }
        }
    }

    /// Clears per-frame accumulators once the frame's queries are done
    pub fn end_frame(&self, engine: &mut InputEngine) {
        engine.mouse_mut().reset_wheel();
    }
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new()
    }
}

fn to_points(physical: f64, scale_factor: f32) -> i16 {
    let points = physical / f64::from(scale_factor);
    points.clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
}

fn ticks(lines: f32) -> i16 {
    lines.abs().ceil().min(f32::from(i16::MAX)) as i16
}

/// USB HID usage code for a physical key
pub fn hid_scancode(code: KeyCode) -> Option<u16> {
    let scancode = match code {
        KeyCode::KeyA => 4,
        KeyCode::KeyB => 5,
        KeyCode::KeyC => 6,
        KeyCode::KeyD => 7,
        KeyCode::KeyE => 8,
        KeyCode::KeyF => 9,
        KeyCode::KeyG => 10,
        KeyCode::KeyH => 11,
        KeyCode::KeyI => 12,
        KeyCode::KeyJ => 13,
        KeyCode::KeyK => 14,
        KeyCode::KeyL => 15,
        KeyCode::KeyM => 16,
        KeyCode::KeyN => 17,
        KeyCode::KeyO => 18,
        KeyCode::KeyP => 19,
        KeyCode::KeyQ => 20,
        KeyCode::KeyR => 21,
        KeyCode::KeyS => 22,
        KeyCode::KeyT => 23,
        KeyCode::KeyU => 24,
        KeyCode::KeyV => 25,
        KeyCode::KeyW => 26,
        KeyCode::KeyX => 27,
        KeyCode::KeyY => 28,
        KeyCode::KeyZ => 29,
        KeyCode::Digit1 => 30,
        KeyCode::Digit2 => 31,
        KeyCode::Digit3 => 32,
        KeyCode::Digit4 => 33,
        KeyCode::Digit5 => 34,
        KeyCode::Digit6 => 35,
        KeyCode::Digit7 => 36,
        KeyCode::Digit8 => 37,
        KeyCode::Digit9 => 38,
        KeyCode::Digit0 => 39,
        KeyCode::Enter => 40,
        KeyCode::Escape => 41,
        KeyCode::Backspace => 42,
        KeyCode::Tab => 43,
        KeyCode::Space => 44,
        KeyCode::Minus => 45,
        KeyCode::Equal => 46,
        KeyCode::BracketLeft => 47,
        KeyCode::BracketRight => 48,
        KeyCode::Backslash => 49,
        KeyCode::Semicolon => 51,
        KeyCode::Quote => 52,
        KeyCode::Backquote => 53,
        KeyCode::Comma => 54,
        KeyCode::Period => 55,
        KeyCode::Slash => 56,
        KeyCode::CapsLock => 57,
        KeyCode::F1 => 58,
        KeyCode::F2 => 59,
        KeyCode::F3 => 60,
        KeyCode::F4 => 61,
        KeyCode::F5 => 62,
        KeyCode::F6 => 63,
        KeyCode::F7 => 64,
        KeyCode::F8 => 65,
        KeyCode::F9 => 66,
        KeyCode::F10 => 67,
        KeyCode::F11 => 68,
        KeyCode::F12 => 69,
        KeyCode::PrintScreen => 70,
        KeyCode::ScrollLock => 71,
        KeyCode::Pause => 72,
        KeyCode::Insert => 73,
        KeyCode::Home => 74,
        KeyCode::PageUp => 75,
        KeyCode::Delete => 76,
        KeyCode::End => 77,
        KeyCode::PageDown => 78,
        KeyCode::ArrowRight => 79,
        KeyCode::ArrowLeft => 80,
        KeyCode::ArrowDown => 81,
        KeyCode::ArrowUp => 82,
        KeyCode::NumLock => 83,
        KeyCode::NumpadDivide => 84,
        KeyCode::NumpadMultiply => 85,
        KeyCode::NumpadSubtract => 86,
        KeyCode::NumpadAdd => 87,
        KeyCode::NumpadEnter => 88,
        KeyCode::Numpad1 => 89,
        KeyCode::Numpad2 => 90,
        KeyCode::Numpad3 => 91,
        KeyCode::Numpad4 => 92,
        KeyCode::Numpad5 => 93,
        KeyCode::Numpad6 => 94,
        KeyCode::Numpad7 => 95,
        KeyCode::Numpad8 => 96,
        KeyCode::Numpad9 => 97,
        KeyCode::Numpad0 => 98,
        KeyCode::NumpadDecimal => 99,
        KeyCode::ContextMenu => 101,
        KeyCode::NumpadEqual => 103,
        KeyCode::ControlLeft => 224,
        KeyCode::ShiftLeft => 225,
        KeyCode::AltLeft => 226,
        KeyCode::SuperLeft => 227,
        KeyCode::ControlRight => 228,
        KeyCode::ShiftRight => 229,
        KeyCode::AltRight => 230,
        KeyCode::SuperRight => 231,
        _ => return None,
    };
    Some(scancode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keymap::{Key, Keymap};
    use crate::input::mouse::Axis;
    use crate::input::viewport::ScaleMode;

    fn engine() -> InputEngine {
        InputEngine::init(Keymap::APPLE_HID, ScaleMode::Backing).unwrap()
    }

    #[test]
    fn test_key_events_reach_keymap_scancodes() {
        let mut engine = engine();
        let collector = InputCollector::new();

        collector.key(&mut engine, KeyCode::KeyX, true);
        collector.key(&mut engine, KeyCode::ShiftRight, true);

        let keymap = engine.keymap().clone();
        assert!(engine.keys().is_down(keymap.scancode(Key::X).unwrap()));
        assert!(engine.keys().is_down(keymap.scancode(Key::RSHIFT).unwrap()));

        collector.key(&mut engine, KeyCode::KeyX, false);
        assert!(!engine.keys().is_down(keymap.scancode(Key::X).unwrap()));
    }

    #[test]
    fn test_unmapped_key_is_ignored() {
        let mut engine = engine();
        InputCollector::new().key(&mut engine, KeyCode::F24, true);
        assert_eq!(engine.keys().pressed_count(), 0);
    }

    #[test]
    fn test_cursor_positions_are_logical() {
        let mut engine = engine();
        let mut collector = InputCollector::new();
        collector.set_scale_factor(2.0);

        collector.cursor_moved(&mut engine, 300.0, 90.0);
        assert_eq!(engine.mouse().position(Axis::X), 150);
        assert_eq!(engine.mouse().position(Axis::Y), 45);

        collector.cursor_moved(&mut engine, 1.0e9, -1.0e9);
        assert_eq!(engine.mouse().position(Axis::X), i16::MAX);
        assert_eq!(engine.mouse().position(Axis::Y), i16::MIN);
    }

    #[test]
    fn test_mouse_buttons() {
        let mut engine = engine();
        let collector = InputCollector::new();

        collector.mouse_button(&mut engine, MouseButton::Left, true);
        collector.mouse_button(&mut engine, MouseButton::Middle, true);
        assert_eq!(engine.mouse().buttons, MouseButtons::LEFT);

        collector.mouse_button(&mut engine, MouseButton::Left, false);
        assert!(engine.mouse().buttons.is_empty());
    }

    #[test]
    fn test_wheel_ticks_and_end_frame() {
        let mut engine = engine();
        let collector = InputCollector::new();

        collector.wheel_lines(&mut engine, 0.0, 1.0);
        collector.wheel_lines(&mut engine, 0.0, 0.3);
        collector.wheel_lines(&mut engine, -2.0, -1.0);

        assert_eq!(engine.mouse().wheel(Wheel::Up), 2);
        assert_eq!(engine.mouse().wheel(Wheel::Down), 1);
        assert_eq!(engine.mouse().wheel(Wheel::Left), 2);
        assert_eq!(engine.mouse().wheel(Wheel::Right), 0);

        collector.end_frame(&mut engine);
        assert_eq!(engine.mouse().wheel(Wheel::Up), 0);
        assert_eq!(engine.mouse().wheel(Wheel::Left), 0);
    }

    #[test]
    fn test_touch_lifecycle() {
        let mut engine = engine();
        let mut collector = InputCollector::new();
        collector.set_scale_factor(2.0);

        collector.touch(&mut engine, 10, TouchPhase::Started, 200.0, 100.0);
        collector.touch(&mut engine, 11, TouchPhase::Started, 0.0, 0.0);
        collector.touch(&mut engine, 10, TouchPhase::Moved, 220.0, 120.0);

        let first = engine.touches().get(0).unwrap();
        assert_eq!(first.contact, 10);
        assert_eq!((first.screen_x, first.screen_y), (110.0, 60.0));

        collector.touch(&mut engine, 10, TouchPhase::Ended, 220.0, 120.0);
        assert_eq!(engine.touch_count(), 1);
        assert_eq!(engine.touches().get(0).unwrap().contact, 11);

        collector.touch(&mut engine, 11, TouchPhase::Cancelled, 0.0, 0.0);
        assert_eq!(engine.touch_count(), 0);
    }

    #[test]
    fn test_hid_table_agrees_with_keymap() {
        let keymap = Keymap::try_from_entries(Keymap::APPLE_HID).unwrap();
        let pairs = [
            (KeyCode::KeyA, Key::A),
            (KeyCode::Enter, Key::RETURN),
            (KeyCode::ArrowUp, Key::UP),
            (KeyCode::Numpad0, Key::KP0),
            (KeyCode::SuperRight, Key::RSUPER),
        ];
        for (code, key) in pairs {
            assert_eq!(hid_scancode(code), keymap.scancode(key), "{:?}", code);
        }
    }
}
