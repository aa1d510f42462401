//! Controller backend collaborator interface
//!
//! Backends are the hardware joypad sources polled for the same port. The engine
//! only reads them; it never owns or updates their state.

use tracing::debug;

use super::bindings::PortBinds;

/// Physical pad routing handed through to backends untouched
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoypadInfo {
    /// Physical pad index mapped to the queried port
    pub joy_idx: u32,
    /// Deflection above which an analog axis counts as a pressed button
    pub axis_threshold: f32,
}

impl Default for JoypadInfo {
    fn default() -> Self {
        Self {
            joy_idx: 0,
            axis_threshold: 0.5,
        }
    }
}

/// Rumble motor selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RumbleEffect {
    Strong,
    Weak,
}

/// A joypad data source
pub trait JoypadBackend {
    /// Name of this backend for diagnostics
    fn name(&self) -> &str;

    /// Full button bit-field for a port, bit `n` being joypad id `n`
    fn state(&self, info: &JoypadInfo, binds: &PortBinds, port: u32) -> i16;

    /// Whether a single button is pressed
    fn button(&self, info: &JoypadInfo, binds: &PortBinds, port: u32, id: u32) -> bool;

    /// Drives a rumble motor. Returns false when unsupported.
    fn set_rumble(&mut self, _port: u32, _effect: RumbleEffect, _strength: u16) -> bool {
        false
    }
}

/// The backends consulted for a query
#[derive(Clone, Copy, Default)]
pub struct Backends<'a> {
    pub primary: Option<&'a dyn JoypadBackend>,
    /// Alternate source polled for the same port; contributes nothing when absent
    pub secondary: Option<&'a dyn JoypadBackend>,
    pub info: JoypadInfo,
}

impl<'a> Backends<'a> {
    pub fn new(
        primary: Option<&'a dyn JoypadBackend>,
        secondary: Option<&'a dyn JoypadBackend>,
    ) -> Self {
        Self {
            primary,
            secondary,
            info: JoypadInfo::default(),
        }
    }

    /// Replaces the pad routing info
    pub fn with_info(mut self, info: JoypadInfo) -> Self {
        self.info = info;
        self
    }

    /// Backend masks OR'd together
    pub fn mask(&self, binds: &PortBinds, port: u32) -> u16 {
        let primary = self
            .primary
            .map_or(0, |backend| backend.state(&self.info, binds, port));
        let secondary = self
            .secondary
            .map_or(0, |backend| backend.state(&self.info, binds, port));
        (primary | secondary) as u16
    }

    /// Primary first, then secondary
    pub fn button(&self, binds: &PortBinds, port: u32, id: u32) -> bool {
        self.primary
            .is_some_and(|backend| backend.button(&self.info, binds, port, id))
            || self
                .secondary
                .is_some_and(|backend| backend.button(&self.info, binds, port, id))
    }
}

impl std::fmt::Debug for Backends<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backends")
            .field("primary", &self.primary.map(|b| b.name()))
            .field("secondary", &self.secondary.map(|b| b.name()))
            .field("info", &self.info)
            .finish()
    }
}

/// Forwards a rumble request to the primary backend, else the secondary
///
/// The first backend present decides the outcome; the secondary is not tried when
/// a primary exists but declines. Returns false when neither is present.
pub fn set_rumble(
    primary: Option<&mut dyn JoypadBackend>,
    secondary: Option<&mut dyn JoypadBackend>,
    port: u32,
    effect: RumbleEffect,
    strength: u16,
) -> bool {
    if let Some(backend) = primary {
        return backend.set_rumble(port, effect, strength);
    }
    if let Some(backend) = secondary {
        return backend.set_rumble(port, effect, strength);
    }
    debug!(port, ?effect, strength, "rumble request with no backend");
    false
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Backend reporting a fixed button mask
    #[derive(Debug, Default)]
    pub(crate) struct FakePad {
        pub mask: u16,
        pub rumble: Option<(u32, RumbleEffect, u16)>,
        pub accepts_rumble: bool,
    }

    impl FakePad {
        pub(crate) fn with_mask(mask: u16) -> Self {
            Self {
                mask,
                ..Self::default()
            }
        }
    }

    impl JoypadBackend for FakePad {
        fn name(&self) -> &str {
            "fake"
        }

        fn state(&self, _info: &JoypadInfo, _binds: &PortBinds, _port: u32) -> i16 {
            self.mask as i16
        }

        fn button(&self, _info: &JoypadInfo, _binds: &PortBinds, _port: u32, id: u32) -> bool {
            id < 16 && self.mask & (1 << id) != 0
        }

        fn set_rumble(&mut self, port: u32, effect: RumbleEffect, strength: u16) -> bool {
            self.rumble = Some((port, effect, strength));
            self.accepts_rumble
        }
    }

    #[test]
    fn test_mask_combines_backends() {
        let primary = FakePad::with_mask(0b0001);
        let secondary = FakePad::with_mask(0b1000_0000_0000_0000);
        let backends = Backends::new(Some(&primary), Some(&secondary));
        assert_eq!(backends.mask(&PortBinds::empty(), 0), 0b1000_0000_0000_0001);
    }

    #[test]
    fn test_missing_backends_contribute_nothing() {
        let backends = Backends::default();
        assert_eq!(backends.mask(&PortBinds::empty(), 0), 0);
        assert!(!backends.button(&PortBinds::empty(), 0, 0));
    }

    #[test]
    fn test_button_falls_back_to_secondary() {
        let primary = FakePad::with_mask(0);
        let secondary = FakePad::with_mask(0b100);
        let backends = Backends::new(Some(&primary), Some(&secondary));
        assert!(backends.button(&PortBinds::empty(), 0, 2));
        assert!(!backends.button(&PortBinds::empty(), 0, 3));
    }

    #[test]
    fn test_rumble_prefers_primary() {
        let mut primary = FakePad::default();
        let mut secondary = FakePad {
            accepts_rumble: true,
            ..FakePad::default()
        };

        let handled = set_rumble(
            Some(&mut primary),
            Some(&mut secondary),
            1,
            RumbleEffect::Strong,
            0xffff,
        );

        assert!(!handled);
        assert_eq!(primary.rumble, Some((1, RumbleEffect::Strong, 0xffff)));
        assert!(secondary.rumble.is_none());
    }

    #[test]
    fn test_rumble_uses_secondary_when_alone() {
        let mut secondary = FakePad {
            accepts_rumble: true,
            ..FakePad::default()
        };
        assert!(set_rumble(None, Some(&mut secondary), 0, RumbleEffect::Weak, 10));
        assert!(!set_rumble(None, None, 0, RumbleEffect::Weak, 10));
    }
}
