//! Driver lifecycle health check

use crate::health::check::{CheckLog, CheckResult, SystemCheck};
use crate::input::{
    Backends, BindingTable, Device, DriverState, FixedDisplay, Key, Keymap, QueryContext,
    ScaleMode, Viewport, joypad,
};

/// Drives init, press, query, teardown and re-init through a driver slot
pub struct LifecycleCheck;

impl LifecycleCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LifecycleCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for LifecycleCheck {
    fn name(&self) -> &'static str {
        "Lifecycle"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates that teardown releases every key before the next init")
    }

    fn check(&self) -> CheckResult {
        let mut log = CheckLog::new();
        let binds = BindingTable::new();
        let display = FixedDisplay::new(1.0, Viewport::full(640, 480));
        let ctx = QueryContext::new(Backends::default(), &binds, &display);

        let mut state = DriverState::default();
        log.verify(
            state.query(&ctx, 0, Device::RAW_JOYPAD, 0, joypad::MASK) == 0,
            "Uninitialized driver answers 0",
        );

        if let Err(e) = state.init(Keymap::APPLE_HID, ScaleMode::Backing) {
            log.fail(format!("Initialization failed: {}", e));
            return log.finish("", "", "Engine could not be initialized");
        }
        log.ok("Engine initialized");

        // Press the key bound to START on port 0
        let pressed = state.engine_mut().and_then(|engine| {
            let scancode = engine.keymap().scancode(Key::RETURN)?;
            engine.keys_mut().set(scancode, true);
            Some(scancode)
        });
        log.verify(pressed.is_some(), "Start key has a scan code");

        let start_bit = 1 << joypad::START;
        log.verify(
            state.query(&ctx, 0, Device::RAW_JOYPAD, 0, joypad::MASK) == start_bit,
            "Held key shows up in the button mask",
        );
        log.verify(
            state.query(&ctx, 0, Device::RAW_KEYBOARD, 0, u32::from(Key::RETURN.0)) == 1,
            "Held key reads as pressed on the keyboard device",
        );

        state.teardown();
        log.verify(!state.is_active(), "Teardown deactivates the driver");
        log.verify(
            state.query(&ctx, 0, Device::RAW_KEYBOARD, 0, u32::from(Key::RETURN.0)) == 0,
            "Torn-down driver answers 0",
        );

        match state.init(Keymap::APPLE_HID, ScaleMode::Backing) {
            Ok(()) => {
                log.verify(
                    state.query(&ctx, 0, Device::RAW_JOYPAD, 0, joypad::MASK) == 0,
                    "Re-initialized engine starts with every key released",
                );
            }
            Err(e) => log.fail(format!("Re-initialization failed: {}", e)),
        }
        state.teardown();

        log.finish(
            "Init, teardown and re-init behave",
            "Lifecycle completed with warnings",
            "Lifecycle transitions misbehaved",
        )
    }
}
