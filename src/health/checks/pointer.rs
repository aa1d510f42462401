//! Touch normalization health check

use crate::health::check::{CheckLog, CheckResult, SystemCheck};
use crate::input::{
    Backends, BindingTable, Device, FixedDisplay, InputEngine, Keymap, NO_TOUCH, QueryContext,
    ScaleMode, TouchPoint, Viewport, pointer,
};

/// Feeds touches through poll on a high-density display and reads them back
pub struct PointerCheck {
    scale_factor: f32,
}

impl PointerCheck {
    pub fn new() -> Self {
        Self { scale_factor: 2.0 }
    }

    pub fn with_scale_factor(scale_factor: f32) -> Self {
        Self { scale_factor }
    }
}

impl Default for PointerCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for PointerCheck {
    fn name(&self) -> &'static str {
        "Pointer"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates touch scaling and viewport mapping")
    }

    fn check(&self) -> CheckResult {
        let mut log = CheckLog::new();

        let mut engine = match InputEngine::init(Keymap::APPLE_HID, ScaleMode::Backing) {
            Ok(engine) => engine,
            Err(e) => {
                log.fail(format!("Initialization failed: {}", e));
                return log.finish("", "", "Engine could not be initialized");
            }
        };

        // Native surface of a 200x100 logical window
        let width = (200.0 * self.scale_factor) as u32;
        let height = (100.0 * self.scale_factor) as u32;
        let display = FixedDisplay::new(self.scale_factor, Viewport::full(width, height));
        let binds = BindingTable::new();
        let ctx = QueryContext::new(Backends::default(), &binds, &display);

        // Centre of the surface, then one past its right edge
        engine.touches_mut().push(TouchPoint::new(1, 100.0, 50.0));
        engine.touches_mut().push(TouchPoint::new(2, 250.0, 50.0));
        engine.poll(&display);
        engine.poll(&display);

        let mut read =
            |device: Device, index: u32, id: u32| engine.query(&ctx, 0, device, index, id);

        log.verify(read(Device::Pointer, 0, pointer::COUNT) == 2, "Both contacts counted");
        log.verify(
            read(Device::Pointer, 0, pointer::X) == 0 && read(Device::Pointer, 0, pointer::Y) == 0,
            "Centre touch maps to the origin after two polls",
        );
        log.verify(
            read(Device::PointerScreen, 0, pointer::PRESSED) == 1,
            "Centre touch is pressed",
        );
        log.verify(
            read(Device::Pointer, 1, pointer::X) == NO_TOUCH,
            "Off-surface touch reports the sentinel",
        );
        log.verify(
            read(Device::Pointer, 1, pointer::PRESSED) == 0,
            "Off-surface touch is not pressed",
        );
        log.verify(
            read(Device::Pointer, 2, pointer::COUNT) == 0,
            "Index past the active contacts answers 0",
        );

        log.finish(
            format!("Touches normalized at {}x scale", self.scale_factor),
            "Pointer completed with warnings",
            "Touch normalization misbehaved",
        )
    }
}
