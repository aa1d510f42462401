//! Device classes, query ids and capability flags
//!
//! Raw device numbers follow the libretro device space. The screen-space mouse and
//! pointer variants set [`SCREEN_VARIANT`] on top of their base class.

/// Flag distinguishing the screen-space mouse and pointer variants
pub const SCREEN_VARIANT: u32 = 0x1_0000;

/// Device class targeted by a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Device {
    Joypad,
    /// Window-relative mouse: X/Y report movement since the last read
    Mouse,
    /// Screen-absolute mouse: X/Y report the scaled window position
    MouseScreen,
    Keyboard,
    Lightgun,
    Analog,
    /// Touch coordinates relative to the render viewport
    Pointer,
    /// Touch coordinates relative to the full display surface
    PointerScreen,
}

impl Device {
    pub const RAW_JOYPAD: u32 = 1;
    pub const RAW_MOUSE: u32 = 2;
    pub const RAW_KEYBOARD: u32 = 3;
    pub const RAW_LIGHTGUN: u32 = 4;
    pub const RAW_ANALOG: u32 = 5;
    pub const RAW_POINTER: u32 = 6;

    /// Decodes a raw device number. Unknown numbers map to `None`.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            Self::RAW_JOYPAD => Some(Self::Joypad),
            Self::RAW_MOUSE => Some(Self::Mouse),
            Self::RAW_KEYBOARD => Some(Self::Keyboard),
            Self::RAW_LIGHTGUN => Some(Self::Lightgun),
            Self::RAW_ANALOG => Some(Self::Analog),
            Self::RAW_POINTER => Some(Self::Pointer),
            r if r == Self::RAW_MOUSE | SCREEN_VARIANT => Some(Self::MouseScreen),
            r if r == Self::RAW_POINTER | SCREEN_VARIANT => Some(Self::PointerScreen),
            _ => None,
        }
    }

    /// Raw device number
    pub fn raw(self) -> u32 {
        match self {
            Self::Joypad => Self::RAW_JOYPAD,
            Self::Mouse => Self::RAW_MOUSE,
            Self::MouseScreen => Self::RAW_MOUSE | SCREEN_VARIANT,
            Self::Keyboard => Self::RAW_KEYBOARD,
            Self::Lightgun => Self::RAW_LIGHTGUN,
            Self::Analog => Self::RAW_ANALOG,
            Self::Pointer => Self::RAW_POINTER,
            Self::PointerScreen => Self::RAW_POINTER | SCREEN_VARIANT,
        }
    }
}

/// Joypad query ids
pub mod joypad {
    pub const B: u32 = 0;
    pub const Y: u32 = 1;
    pub const SELECT: u32 = 2;
    pub const START: u32 = 3;
    pub const UP: u32 = 4;
    pub const DOWN: u32 = 5;
    pub const LEFT: u32 = 6;
    pub const RIGHT: u32 = 7;
    pub const A: u32 = 8;
    pub const X: u32 = 9;
    pub const L: u32 = 10;
    pub const R: u32 = 11;
    pub const L2: u32 = 12;
    pub const R2: u32 = 13;
    pub const L3: u32 = 14;
    pub const R3: u32 = 15;
    /// Requests the full button bit-field
    pub const MASK: u32 = 256;
}

/// Mouse query ids
pub mod mouse {
    pub const X: u32 = 0;
    pub const Y: u32 = 1;
    pub const LEFT: u32 = 2;
    pub const RIGHT: u32 = 3;
    pub const WHEELUP: u32 = 4;
    pub const WHEELDOWN: u32 = 5;
    pub const MIDDLE: u32 = 6;
    pub const HORIZ_WHEELUP: u32 = 7;
    pub const HORIZ_WHEELDOWN: u32 = 8;
}

/// Pointer query ids
pub mod pointer {
    pub const X: u32 = 0;
    pub const Y: u32 = 1;
    pub const PRESSED: u32 = 2;
    pub const COUNT: u32 = 3;
}

bitflags::bitflags! {
    /// Device classes a driver can answer for, one bit per raw device number
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u64 {
        const JOYPAD   = 1 << Device::RAW_JOYPAD;
        const MOUSE    = 1 << Device::RAW_MOUSE;
        const KEYBOARD = 1 << Device::RAW_KEYBOARD;
        const LIGHTGUN = 1 << Device::RAW_LIGHTGUN;
        const ANALOG   = 1 << Device::RAW_ANALOG;
        const POINTER  = 1 << Device::RAW_POINTER;
    }
}

impl Capabilities {
    /// True if the class behind `device` is advertised
    pub fn supports(self, device: Device) -> bool {
        let base = device.raw() & !SCREEN_VARIANT;
        self.bits() & (1 << base) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_roundtrip_for_known_devices() {
        for device in [
            Device::Joypad,
            Device::Mouse,
            Device::MouseScreen,
            Device::Keyboard,
            Device::Lightgun,
            Device::Analog,
            Device::Pointer,
            Device::PointerScreen,
        ] {
            assert_eq!(Device::from_raw(device.raw()), Some(device));
        }
    }

    #[test]
    fn test_unknown_raw_devices() {
        assert_eq!(Device::from_raw(0), None);
        assert_eq!(Device::from_raw(7), None);
        assert_eq!(Device::from_raw(Device::RAW_JOYPAD | SCREEN_VARIANT), None);
    }

    #[test]
    fn test_capabilities_bits() {
        assert_eq!(Capabilities::JOYPAD.bits(), 0b10);
        assert_eq!(Capabilities::POINTER.bits(), 0b100_0000);
        let caps = Capabilities::JOYPAD | Capabilities::POINTER;
        assert!(caps.supports(Device::PointerScreen));
        assert!(!caps.supports(Device::Mouse));
    }
}
