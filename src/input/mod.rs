//! Unified input state
//!
//! Merges independently updated input sources into one value per query:
//! - Hardware joypad backends and a keyboard-to-joypad binding table
//! - A scan-code key table
//! - Mouse position, buttons and wheel ticks
//! - A bounded list of touch contacts, normalized against the display once per frame
//!
//! # Architecture
//!
//! ```text
//! Raw Input (winit) → InputCollector → InputEngine tables
//!                                          ↓
//!                                   poll (touch normalization)
//!                                          ↓
//!                       query(port, device, index, id) → i16
//!                         ↑                ↑
//!                   JoypadBackends    BindingTable
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut engine = InputEngine::init(Keymap::APPLE_HID, ScaleMode::Backing)?;
//! let mut collector = InputCollector::new();
//!
//! // In window_event()
//! collector.handle_window_event(&event, &mut engine);
//!
//! // Each frame
//! engine.poll(&display);
//! let ctx = QueryContext::new(Backends::new(Some(&pad), None), &binds, &display);
//! let buttons = engine.query(&ctx, 0, Device::Joypad, 0, joypad::MASK);
//! collector.end_frame(&mut engine);
//! ```

pub mod backend;
pub mod bindings;
mod collector;
pub mod device;
mod driver;
mod engine;
pub mod keymap;
pub mod keys;
pub mod mouse;
pub mod touch;
pub mod viewport;

// Re-export public API
pub use backend::{Backends, JoypadBackend, JoypadInfo, RumbleEffect, set_rumble};
pub use bindings::{BIND_LIST_END, BindingTable, FIRST_CUSTOM_BIND, Keybind, MAX_USERS, PortBinds};
pub use collector::{InputCollector, hid_scancode};
pub use device::{Capabilities, Device, joypad, mouse as mouse_id, pointer};
pub use driver::{DriverState, InputDriver};
pub use engine::{InputEngine, QueryContext};
pub use keymap::{KEY_LAST, Key, Keymap, KeymapEntry};
pub use keys::{KeyTable, MAX_KEYS};
pub use mouse::{Axis, MouseButtons, MouseState, Wheel};
pub use touch::{MAX_TOUCHES, NO_TOUCH, PointerSpace, TouchList, TouchPoint};
pub use viewport::{Display, FixedDisplay, ScaleMode, Translated, Viewport, translate};
