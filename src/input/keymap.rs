//! Logical key ids and the keysym lookup table
//!
//! Logical keys live in the libretro key-code space and are what bindings and
//! keyboard queries speak. The [`Keymap`] translates them into the platform scan
//! codes that index the [`KeyTable`](super::keys::KeyTable).

use std::collections::TryReserveError;
use std::fmt;

/// Exclusive upper bound of the logical key space
pub const KEY_LAST: u16 = 324;

/// Logical key id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Key(pub u16);

impl Key {
    pub const UNKNOWN: Self = Self(0);
    pub const BACKSPACE: Self = Self(8);
    pub const TAB: Self = Self(9);
    pub const RETURN: Self = Self(13);
    pub const PAUSE: Self = Self(19);
    pub const ESCAPE: Self = Self(27);
    pub const SPACE: Self = Self(32);
    pub const QUOTE: Self = Self(39);
    pub const COMMA: Self = Self(44);
    pub const MINUS: Self = Self(45);
    pub const PERIOD: Self = Self(46);
    pub const SLASH: Self = Self(47);
    pub const NUM0: Self = Self(48);
    pub const NUM1: Self = Self(49);
    pub const NUM2: Self = Self(50);
    pub const NUM3: Self = Self(51);
    pub const NUM4: Self = Self(52);
    pub const NUM5: Self = Self(53);
    pub const NUM6: Self = Self(54);
    pub const NUM7: Self = Self(55);
    pub const NUM8: Self = Self(56);
    pub const NUM9: Self = Self(57);
    pub const SEMICOLON: Self = Self(59);
    pub const EQUALS: Self = Self(61);
    pub const LEFTBRACKET: Self = Self(91);
    pub const BACKSLASH: Self = Self(92);
    pub const RIGHTBRACKET: Self = Self(93);
    pub const BACKQUOTE: Self = Self(96);
    pub const A: Self = Self(97);
    pub const B: Self = Self(98);
    pub const C: Self = Self(99);
    pub const D: Self = Self(100);
    pub const E: Self = Self(101);
    pub const F: Self = Self(102);
    pub const G: Self = Self(103);
    pub const H: Self = Self(104);
    pub const I: Self = Self(105);
    pub const J: Self = Self(106);
    pub const K: Self = Self(107);
    pub const L: Self = Self(108);
    pub const M: Self = Self(109);
    pub const N: Self = Self(110);
    pub const O: Self = Self(111);
    pub const P: Self = Self(112);
    pub const Q: Self = Self(113);
    pub const R: Self = Self(114);
    pub const S: Self = Self(115);
    pub const T: Self = Self(116);
    pub const U: Self = Self(117);
    pub const V: Self = Self(118);
    pub const W: Self = Self(119);
    pub const X: Self = Self(120);
    pub const Y: Self = Self(121);
    pub const Z: Self = Self(122);
    pub const DELETE: Self = Self(127);
    pub const KP0: Self = Self(256);
    pub const KP1: Self = Self(257);
    pub const KP2: Self = Self(258);
    pub const KP3: Self = Self(259);
    pub const KP4: Self = Self(260);
    pub const KP5: Self = Self(261);
    pub const KP6: Self = Self(262);
    pub const KP7: Self = Self(263);
    pub const KP8: Self = Self(264);
    pub const KP9: Self = Self(265);
    pub const KP_PERIOD: Self = Self(266);
    pub const KP_DIVIDE: Self = Self(267);
    pub const KP_MULTIPLY: Self = Self(268);
    pub const KP_MINUS: Self = Self(269);
    pub const KP_PLUS: Self = Self(270);
    pub const KP_ENTER: Self = Self(271);
    pub const KP_EQUALS: Self = Self(272);
    pub const UP: Self = Self(273);
    pub const DOWN: Self = Self(274);
    pub const RIGHT: Self = Self(275);
    pub const LEFT: Self = Self(276);
    pub const INSERT: Self = Self(277);
    pub const HOME: Self = Self(278);
    pub const END: Self = Self(279);
    pub const PAGEUP: Self = Self(280);
    pub const PAGEDOWN: Self = Self(281);
    pub const F1: Self = Self(282);
    pub const F2: Self = Self(283);
    pub const F3: Self = Self(284);
    pub const F4: Self = Self(285);
    pub const F5: Self = Self(286);
    pub const F6: Self = Self(287);
    pub const F7: Self = Self(288);
    pub const F8: Self = Self(289);
    pub const F9: Self = Self(290);
    pub const F10: Self = Self(291);
    pub const F11: Self = Self(292);
    pub const F12: Self = Self(293);
    pub const NUMLOCK: Self = Self(300);
    pub const CAPSLOCK: Self = Self(301);
    pub const SCROLLOCK: Self = Self(302);
    pub const RSHIFT: Self = Self(303);
    pub const LSHIFT: Self = Self(304);
    pub const RCTRL: Self = Self(305);
    pub const LCTRL: Self = Self(306);
    pub const RALT: Self = Self(307);
    pub const LALT: Self = Self(308);
    pub const LSUPER: Self = Self(311);
    pub const RSUPER: Self = Self(312);
    pub const PRINT: Self = Self(316);
    pub const MENU: Self = Self(319);
}

/// Configuration names for logical keys
const NAMES: &[(&str, Key)] = &[
    ("nul", Key::UNKNOWN),
    ("backspace", Key::BACKSPACE),
    ("tab", Key::TAB),
    ("enter", Key::RETURN),
    ("pause", Key::PAUSE),
    ("escape", Key::ESCAPE),
    ("space", Key::SPACE),
    ("quote", Key::QUOTE),
    ("comma", Key::COMMA),
    ("minus", Key::MINUS),
    ("period", Key::PERIOD),
    ("slash", Key::SLASH),
    ("num0", Key::NUM0),
    ("num1", Key::NUM1),
    ("num2", Key::NUM2),
    ("num3", Key::NUM3),
    ("num4", Key::NUM4),
    ("num5", Key::NUM5),
    ("num6", Key::NUM6),
    ("num7", Key::NUM7),
    ("num8", Key::NUM8),
    ("num9", Key::NUM9),
    ("semicolon", Key::SEMICOLON),
    ("equals", Key::EQUALS),
    ("leftbracket", Key::LEFTBRACKET),
    ("backslash", Key::BACKSLASH),
    ("rightbracket", Key::RIGHTBRACKET),
    ("tilde", Key::BACKQUOTE),
    ("a", Key::A),
    ("b", Key::B),
    ("c", Key::C),
    ("d", Key::D),
    ("e", Key::E),
    ("f", Key::F),
    ("g", Key::G),
    ("h", Key::H),
    ("i", Key::I),
    ("j", Key::J),
    ("k", Key::K),
    ("l", Key::L),
    ("m", Key::M),
    ("n", Key::N),
    ("o", Key::O),
    ("p", Key::P),
    ("q", Key::Q),
    ("r", Key::R),
    ("s", Key::S),
    ("t", Key::T),
    ("u", Key::U),
    ("v", Key::V),
    ("w", Key::W),
    ("x", Key::X),
    ("y", Key::Y),
    ("z", Key::Z),
    ("del", Key::DELETE),
    ("keypad0", Key::KP0),
    ("keypad1", Key::KP1),
    ("keypad2", Key::KP2),
    ("keypad3", Key::KP3),
    ("keypad4", Key::KP4),
    ("keypad5", Key::KP5),
    ("keypad6", Key::KP6),
    ("keypad7", Key::KP7),
    ("keypad8", Key::KP8),
    ("keypad9", Key::KP9),
    ("kp_period", Key::KP_PERIOD),
    ("divide", Key::KP_DIVIDE),
    ("multiply", Key::KP_MULTIPLY),
    ("subtract", Key::KP_MINUS),
    ("add", Key::KP_PLUS),
    ("kp_enter", Key::KP_ENTER),
    ("kp_equals", Key::KP_EQUALS),
    ("up", Key::UP),
    ("down", Key::DOWN),
    ("right", Key::RIGHT),
    ("left", Key::LEFT),
    ("insert", Key::INSERT),
    ("home", Key::HOME),
    ("end", Key::END),
    ("pageup", Key::PAGEUP),
    ("pagedown", Key::PAGEDOWN),
    ("f1", Key::F1),
    ("f2", Key::F2),
    ("f3", Key::F3),
    ("f4", Key::F4),
    ("f5", Key::F5),
    ("f6", Key::F6),
    ("f7", Key::F7),
    ("f8", Key::F8),
    ("f9", Key::F9),
    ("f10", Key::F10),
    ("f11", Key::F11),
    ("f12", Key::F12),
    ("num_lock", Key::NUMLOCK),
    ("caps_lock", Key::CAPSLOCK),
    ("scroll_lock", Key::SCROLLOCK),
    ("rshift", Key::RSHIFT),
    ("shift", Key::LSHIFT),
    ("rctrl", Key::RCTRL),
    ("ctrl", Key::LCTRL),
    ("ralt", Key::RALT),
    ("alt", Key::LALT),
    ("super", Key::LSUPER),
    ("rsuper", Key::RSUPER),
    ("print_screen", Key::PRINT),
    ("menu", Key::MENU),
];

impl Key {
    /// Returns true if the id lies inside the logical key space
    pub fn is_representable(self) -> bool {
        self.0 < KEY_LAST
    }

    /// Looks up a key by its configuration name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("return") {
            return Some(Self::RETURN);
        }
        NAMES
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, key)| *key)
    }

    /// Configuration name of this key, if it has one
    pub fn name(self) -> Option<&'static str> {
        NAMES
            .iter()
            .find(|(_, key)| *key == self)
            .map(|(name, _)| *name)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "key#{}", self.0),
        }
    }
}

/// Platform keymap entry: logical key and the scan code that produces it
pub type KeymapEntry = (Key, u16);

/// Lookup table from logical key to platform scan code
#[derive(Debug, Clone)]
pub struct Keymap {
    lut: Vec<Option<u16>>,
}

impl Keymap {
    /// USB HID usage codes, as delivered by the Apple HID keyboard path
    pub const APPLE_HID: &'static [KeymapEntry] = &[
        (Key::A, 4),
        (Key::B, 5),
        (Key::C, 6),
        (Key::D, 7),
        (Key::E, 8),
        (Key::F, 9),
        (Key::G, 10),
        (Key::H, 11),
        (Key::I, 12),
        (Key::J, 13),
        (Key::K, 14),
        (Key::L, 15),
        (Key::M, 16),
        (Key::N, 17),
        (Key::O, 18),
        (Key::P, 19),
        (Key::Q, 20),
        (Key::R, 21),
        (Key::S, 22),
        (Key::T, 23),
        (Key::U, 24),
        (Key::V, 25),
        (Key::W, 26),
        (Key::X, 27),
        (Key::Y, 28),
        (Key::Z, 29),
        (Key::NUM1, 30),
        (Key::NUM2, 31),
        (Key::NUM3, 32),
        (Key::NUM4, 33),
        (Key::NUM5, 34),
        (Key::NUM6, 35),
        (Key::NUM7, 36),
        (Key::NUM8, 37),
        (Key::NUM9, 38),
        (Key::NUM0, 39),
        (Key::RETURN, 40),
        (Key::ESCAPE, 41),
        (Key::BACKSPACE, 42),
        (Key::TAB, 43),
        (Key::SPACE, 44),
        (Key::MINUS, 45),
        (Key::EQUALS, 46),
        (Key::LEFTBRACKET, 47),
        (Key::RIGHTBRACKET, 48),
        (Key::BACKSLASH, 49),
        (Key::SEMICOLON, 51),
        (Key::QUOTE, 52),
        (Key::BACKQUOTE, 53),
        (Key::COMMA, 54),
        (Key::PERIOD, 55),
        (Key::SLASH, 56),
        (Key::CAPSLOCK, 57),
        (Key::F1, 58),
        (Key::F2, 59),
        (Key::F3, 60),
        (Key::F4, 61),
        (Key::F5, 62),
        (Key::F6, 63),
        (Key::F7, 64),
        (Key::F8, 65),
        (Key::F9, 66),
        (Key::F10, 67),
        (Key::F11, 68),
        (Key::F12, 69),
        (Key::PRINT, 70),
        (Key::SCROLLOCK, 71),
        (Key::PAUSE, 72),
        (Key::INSERT, 73),
        (Key::HOME, 74),
        (Key::PAGEUP, 75),
        (Key::DELETE, 76),
        (Key::END, 77),
        (Key::PAGEDOWN, 78),
        (Key::RIGHT, 79),
        (Key::LEFT, 80),
        (Key::DOWN, 81),
        (Key::UP, 82),
        (Key::NUMLOCK, 83),
        (Key::KP_DIVIDE, 84),
        (Key::KP_MULTIPLY, 85),
        (Key::KP_MINUS, 86),
        (Key::KP_PLUS, 87),
        (Key::KP_ENTER, 88),
        (Key::KP1, 89),
        (Key::KP2, 90),
        (Key::KP3, 91),
        (Key::KP4, 92),
        (Key::KP5, 93),
        (Key::KP6, 94),
        (Key::KP7, 95),
        (Key::KP8, 96),
        (Key::KP9, 97),
        (Key::KP0, 98),
        (Key::KP_PERIOD, 99),
        (Key::MENU, 101),
        (Key::KP_EQUALS, 103),
        (Key::LCTRL, 224),
        (Key::LSHIFT, 225),
        (Key::LALT, 226),
        (Key::LSUPER, 227),
        (Key::RCTRL, 228),
        (Key::RSHIFT, 229),
        (Key::RALT, 230),
        (Key::RSUPER, 231),
    ];

    /// Builds the lookup table from a platform keymap
    ///
    /// Entries whose logical key is outside the key space are skipped. When a key
    /// appears twice the later entry wins.
    pub fn try_from_entries(entries: &[KeymapEntry]) -> Result<Self, TryReserveError> {
        let mut lut = Vec::new();
        lut.try_reserve_exact(usize::from(KEY_LAST))?;
        lut.resize(usize::from(KEY_LAST), None);

        for (key, scancode) in entries {
            if let Some(slot) = lut.get_mut(usize::from(key.0)) {
                *slot = Some(*scancode);
            }
        }

        Ok(Self { lut })
    }

    /// Scan code for a logical key, or `None` when out of range or unmapped
    pub fn scancode(&self, key: Key) -> Option<u16> {
        self.lut.get(usize::from(key.0)).copied().flatten()
    }

    /// Number of logical keys with a scan code
    pub fn mapped_count(&self) -> usize {
        self.lut.iter().filter(|entry| entry.is_some()).count()
    }
}
