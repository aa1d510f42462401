//! Unified input state engine
//!
//! Owns the key table, mouse state and touch list that the event source writes,
//! normalizes touches once per frame, and resolves `(port, device, index, id)`
//! queries into a single `i16`.
//!
//! Queries never fail. Anything unsupported, out of range or unbound resolves to 0.

use tracing::info;

use super::backend::Backends;
use super::bindings::{BindingTable, PortBinds};
use super::device::{Capabilities, Device, joypad, mouse, pointer};
use super::keymap::{Key, Keymap, KeymapEntry};
use super::keys::KeyTable;
use super::mouse::{Axis, MouseButtons, MouseState, Wheel};
use super::touch::{MAX_TOUCHES, PointerSpace, TouchList};
use super::viewport::{Display, ScaleMode, normalize_touch};
use crate::error::Result;

/// Everything a query needs beyond the engine's own tables
#[derive(Clone, Copy)]
pub struct QueryContext<'a> {
    pub backends: Backends<'a>,
    pub binds: &'a BindingTable,
    /// Suppresses keyboard bindings in the button-mask query
    pub keyboard_mapping_blocked: bool,
    pub display: &'a dyn Display,
}

impl<'a> QueryContext<'a> {
    pub fn new(backends: Backends<'a>, binds: &'a BindingTable, display: &'a dyn Display) -> Self {
        Self {
            backends,
            binds,
            keyboard_mapping_blocked: false,
            display,
        }
    }

    pub fn with_mapping_blocked(mut self, blocked: bool) -> Self {
        self.keyboard_mapping_blocked = blocked;
        self
    }
}

/// Aggregate input state for the lifetime of an active driver
#[derive(Debug, Clone)]
pub struct InputEngine {
    keys: KeyTable,
    keymap: Keymap,
    mouse: MouseState,
    touches: TouchList,
    scale_mode: ScaleMode,
}

impl InputEngine {
    /// Device classes this engine answers for
    pub const CAPABILITIES: Capabilities = Capabilities::JOYPAD
        .union(Capabilities::MOUSE)
        .union(Capabilities::KEYBOARD)
        .union(Capabilities::POINTER)
        .union(Capabilities::ANALOG);

    /// Allocates zeroed tables and loads the platform keymap
    pub fn init(keymap: &[KeymapEntry], scale_mode: ScaleMode) -> Result<Self> {
        let engine = Self {
            keys: KeyTable::try_new()?,
            keymap: Keymap::try_from_entries(keymap)?,
            mouse: MouseState::new(),
            touches: TouchList::try_new()?,
            scale_mode,
        };

        info!(
            mapped_keys = engine.keymap.mapped_count(),
            ?scale_mode,
            "Input engine initialized"
        );

        Ok(engine)
    }

    /// Releases every key and drops the engine
    pub fn teardown(mut self) {
        let held = self.keys.pressed_count();
        self.keys.clear();
        info!(held_keys = held, "Input engine torn down");
    }

    /// Normalizes every active touch against the current display
    ///
    /// Call once per frame before queries that read pointer coordinates.
    pub fn poll(&mut self, display: &dyn Display) {
        let scale = self.scale_mode.factor(display);
        for point in self.touches.iter_mut() {
            normalize_touch(point, scale, display);
        }
    }

    /// Resolves a query against a raw device number
    pub fn query_raw(
        &mut self,
        ctx: &QueryContext<'_>,
        port: u32,
        device: u32,
        index: u32,
        id: u32,
    ) -> i16 {
        match Device::from_raw(device) {
            Some(device) => self.query(ctx, port, device, index, id),
            None => 0,
        }
    }

    /// Resolves the current logical value of one input
    pub fn query(
        &mut self,
        ctx: &QueryContext<'_>,
        port: u32,
        device: Device,
        index: u32,
        id: u32,
    ) -> i16 {
        match device {
            Device::Joypad if id == joypad::MASK => self.joypad_mask(ctx, port),
            Device::Joypad => self.joypad_button(ctx, port, id),
            // Analog sticks belong to the backends
            Device::Analog => 0,
            Device::Lightgun => 0,
            Device::Keyboard => i16::from(self.keyboard_key(id)),
            Device::Mouse => self.mouse_relative(id),
            Device::MouseScreen => self.mouse_screen(id, ctx.display),
            Device::Pointer => self.pointer(PointerSpace::Viewport, index, id),
            Device::PointerScreen => self.pointer(PointerSpace::Full, index, id),
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        Self::CAPABILITIES
    }

    fn key_down(&self, key: Key) -> bool {
        self.keymap
            .scancode(key)
            .is_some_and(|scancode| self.keys.is_down(scancode))
    }

    fn joypad_mask(&self, ctx: &QueryContext<'_>, port: u32) -> i16 {
        let Some(binds) = ctx.binds.port(port) else {
            return 0;
        };

        let mut mask = ctx.backends.mask(binds, port);
        if !ctx.keyboard_mapping_blocked {
            mask |= self.keyboard_mask(binds);
        }
        mask as i16
    }

    fn keyboard_mask(&self, binds: &PortBinds) -> u16 {
        binds
            .buttons()
            .iter()
            .enumerate()
            .filter(|(_, bind)| {
                bind.valid && bind.key.is_representable() && self.key_down(bind.key)
            })
            .fold(0, |mask, (bit, _)| mask | (1 << bit))
    }

    fn joypad_button(&self, ctx: &QueryContext<'_>, port: u32, id: u32) -> i16 {
        let Some(binds) = ctx.binds.port(port) else {
            return 0;
        };
        // Ids past the bind list have no slot and never resolve
        let Some(bind) = binds.get(id) else {
            return 0;
        };
        if !bind.valid {
            return 0;
        }

        let pressed = ctx.backends.button(binds, port, id) || self.key_down(bind.key);
        i16::from(pressed)
    }

    fn keyboard_key(&self, id: u32) -> bool {
        u16::try_from(id)
            .map(Key)
            .is_ok_and(|key| key.is_representable() && self.key_down(key))
    }

    fn mouse_relative(&mut self, id: u32) -> i16 {
        match id {
            mouse::X => self.mouse.consume_delta(Axis::X),
            mouse::Y => self.mouse.consume_delta(Axis::Y),
            _ => self.mouse_common(id),
        }
    }

    fn mouse_screen(&self, id: u32, display: &dyn Display) -> i16 {
        let axis = match id {
            mouse::X => Axis::X,
            mouse::Y => Axis::Y,
            _ => return self.mouse_common(id),
        };
        let scale = self.scale_mode.factor(display);
        (f32::from(self.mouse.position(axis)) * scale) as i16
    }

    fn mouse_common(&self, id: u32) -> i16 {
        match id {
            mouse::LEFT => i16::from(self.mouse.is_pressed(MouseButtons::LEFT)),
            mouse::RIGHT => i16::from(self.mouse.is_pressed(MouseButtons::RIGHT)),
            mouse::WHEELUP => self.mouse.wheel(Wheel::Up),
            mouse::WHEELDOWN => self.mouse.wheel(Wheel::Down),
            mouse::HORIZ_WHEELUP => self.mouse.wheel(Wheel::Left),
            mouse::HORIZ_WHEELDOWN => self.mouse.wheel(Wheel::Right),
            _ => 0,
        }
    }

    fn pointer(&self, space: PointerSpace, index: u32, id: u32) -> i16 {
        let count = self.touches.len();
        let Ok(index) = usize::try_from(index) else {
            return 0;
        };
        if index >= count || index >= MAX_TOUCHES {
            return 0;
        }
        let Some(touch) = self.touches.get(index) else {
            return 0;
        };

        let (x, y) = touch.coords(space);
        match id {
            pointer::PRESSED => i16::from(touch.is_pressed(space)),
            pointer::X => x,
            pointer::Y => y,
            pointer::COUNT => count as i16,
            _ => 0,
        }
    }

    pub fn scale_mode(&self) -> ScaleMode {
        self.scale_mode
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn keys(&self) -> &KeyTable {
        &self.keys
    }

    /// Key table, for the event source
    pub fn keys_mut(&mut self) -> &mut KeyTable {
        &mut self.keys
    }

    pub fn mouse(&self) -> &MouseState {
        &self.mouse
    }

    /// Mouse state, for the event source
    pub fn mouse_mut(&mut self) -> &mut MouseState {
        &mut self.mouse
    }

    pub fn touches(&self) -> &TouchList {
        &self.touches
    }

    /// Touch list, for the event source
    pub fn touches_mut(&mut self) -> &mut TouchList {
        &mut self.touches
    }

    /// Number of active touches
    pub fn touch_count(&self) -> usize {
        self.touches.len()
    }
}
