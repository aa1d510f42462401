//! Driver interface and lifecycle

use tracing::warn;

use super::backend::{self, JoypadBackend, RumbleEffect};
use super::device::Capabilities;
use super::engine::{InputEngine, QueryContext};
use super::keymap::KeymapEntry;
use super::viewport::{Display, ScaleMode};
use crate::error::Result;

/// Operations the frame loop invokes on an input driver
pub trait InputDriver {
    /// Name of this driver for diagnostics
    fn name(&self) -> &'static str;

    /// Per-frame update, run before any query of the frame
    fn poll(&mut self, display: &dyn Display);

    /// Current value of one input, 0 when unsupported
    fn state(
        &mut self,
        ctx: &QueryContext<'_>,
        port: u32,
        device: u32,
        index: u32,
        id: u32,
    ) -> i16;

    fn capabilities(&self) -> Capabilities;

    /// Forwards rumble to the backends. Returns false when nobody handled it.
    fn set_rumble(
        &self,
        primary: Option<&mut dyn JoypadBackend>,
        secondary: Option<&mut dyn JoypadBackend>,
        port: u32,
        effect: RumbleEffect,
        strength: u16,
    ) -> bool {
        backend::set_rumble(primary, secondary, port, effect, strength)
    }
}

impl InputDriver for InputEngine {
    fn name(&self) -> &'static str {
        "unified"
    }

    fn poll(&mut self, display: &dyn Display) {
        InputEngine::poll(self, display);
    }

    fn state(
        &mut self,
        ctx: &QueryContext<'_>,
        port: u32,
        device: u32,
        index: u32,
        id: u32,
    ) -> i16 {
        self.query_raw(ctx, port, device, index, id)
    }

    fn capabilities(&self) -> Capabilities {
        InputEngine::capabilities(self)
    }
}

/// Lifecycle of the engine behind a driver slot
#[derive(Debug, Default)]
pub enum DriverState {
    #[default]
    Uninitialized,
    Active(InputEngine),
    TornDown,
}

impl DriverState {
    /// Creates a fresh engine, tearing down any previous one
    ///
    /// On failure the state is left as it was.
    pub fn init(&mut self, keymap: &[KeymapEntry], scale_mode: ScaleMode) -> Result<()> {
        let engine = InputEngine::init(keymap, scale_mode).inspect_err(|e| {
            warn!(error = %e, "Input engine initialization failed");
        })?;

        self.teardown();
        *self = Self::Active(engine);
        Ok(())
    }

    /// Runs the per-frame poll; no-op unless active
    pub fn poll(&mut self, display: &dyn Display) {
        if let Self::Active(engine) = self {
            engine.poll(display);
        }
    }

    /// Resolves a query; 0 unless active
    pub fn query(
        &mut self,
        ctx: &QueryContext<'_>,
        port: u32,
        device: u32,
        index: u32,
        id: u32,
    ) -> i16 {
        match self {
            Self::Active(engine) => engine.query_raw(ctx, port, device, index, id),
            _ => 0,
        }
    }

    /// Releases keys and drops the engine; no-op unless active
    pub fn teardown(&mut self) {
        if !self.is_active() {
            return;
        }
        if let Self::Active(engine) = std::mem::replace(self, Self::TornDown) {
            engine.teardown();
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    pub fn engine(&self) -> Option<&InputEngine> {
        match self {
            Self::Active(engine) => Some(engine),
            _ => None,
        }
    }

    pub fn engine_mut(&mut self) -> Option<&mut InputEngine> {
        match self {
            Self::Active(engine) => Some(engine),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::bindings::BindingTable;
    use crate::input::backend::Backends;
    use crate::input::device::Device;
    use crate::input::keymap::{Key, Keymap};
    use crate::input::viewport::{FixedDisplay, Viewport};

    #[test]
    fn test_inactive_state_is_inert() {
        let mut state = DriverState::default();
        let binds = BindingTable::new();
        let display = FixedDisplay::new(1.0, Viewport::full(100, 100));
        let ctx = QueryContext::new(Backends::default(), &binds, &display);

        state.poll(&display);
        assert_eq!(state.query(&ctx, 0, Device::RAW_KEYBOARD, 0, 32), 0);
        state.teardown();
        assert!(matches!(state, DriverState::Uninitialized));
    }

    #[test]
    fn test_lifecycle_transitions() {
        let mut state = DriverState::default();
        state.init(Keymap::APPLE_HID, ScaleMode::Backing).unwrap();
        assert!(state.is_active());

        state.teardown();
        assert!(matches!(state, DriverState::TornDown));
        assert!(state.engine().is_none());

        // Idempotent
        state.teardown();
        assert!(matches!(state, DriverState::TornDown));
    }

    #[test]
    fn test_reinit_starts_with_released_keys() {
        let mut state = DriverState::default();
        state.init(Keymap::APPLE_HID, ScaleMode::Backing).unwrap();

        let engine = state.engine_mut().unwrap();
        let scancode = engine.keymap().scancode(Key::Q).unwrap();
        engine.keys_mut().set(scancode, true);

        state.teardown();
        state.init(Keymap::APPLE_HID, ScaleMode::Backing).unwrap();

        let binds = BindingTable::new();
        let display = FixedDisplay::new(1.0, Viewport::full(100, 100));
        let ctx = QueryContext::new(Backends::default(), &binds, &display);
        assert_eq!(state.query(&ctx, 0, Device::RAW_KEYBOARD, 0, u32::from(Key::Q.0)), 0);
    }

    #[test]
    fn test_engine_as_driver() {
        let driver: Box<dyn InputDriver> =
            Box::new(InputEngine::init(Keymap::APPLE_HID, ScaleMode::Native).unwrap());
        assert_eq!(driver.name(), "unified");
        assert_eq!(driver.capabilities(), InputEngine::CAPABILITIES);
        assert!(!driver.set_rumble(None, None, 0, RumbleEffect::Strong, 100));
    }
}
