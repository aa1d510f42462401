//! Keyboard-to-joypad binding table

use super::keymap::Key;

/// Number of digital joypad buttons; ids below this take part in the mask query
pub const FIRST_CUSTOM_BIND: usize = 16;

/// Bind slots per port: the digital buttons plus eight analog half-axis binds
pub const BIND_LIST_END: usize = FIRST_CUSTOM_BIND + 8;

/// Number of ports held by a [`BindingTable`]
pub const MAX_USERS: usize = 16;

/// Slot names in bind id order
const BUTTON_NAMES: [&str; BIND_LIST_END] = [
    "b",
    "y",
    "select",
    "start",
    "up",
    "down",
    "left",
    "right",
    "a",
    "x",
    "l",
    "r",
    "l2",
    "r2",
    "l3",
    "r3",
    "l_x_plus",
    "l_x_minus",
    "l_y_plus",
    "l_y_minus",
    "r_x_plus",
    "r_x_minus",
    "r_y_plus",
    "r_y_minus",
];

/// Bind id for a slot name (case-insensitive)
pub fn button_id(name: &str) -> Option<usize> {
    let name = name.trim();
    BUTTON_NAMES
        .iter()
        .position(|candidate| candidate.eq_ignore_ascii_case(name))
}

/// Slot name for a bind id
pub fn button_name(id: usize) -> Option<&'static str> {
    BUTTON_NAMES.get(id).copied()
}

/// A single binding slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Keybind {
    /// Whether this slot takes part in resolution at all
    pub valid: bool,
    pub key: Key,
}

/// All binding slots of one port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortBinds {
    binds: [Keybind; BIND_LIST_END],
}

impl PortBinds {
    /// Digital buttons valid but bound to nothing, analog halves invalid
    pub fn empty() -> Self {
        let mut binds = [Keybind::default(); BIND_LIST_END];
        for bind in &mut binds[..FIRST_CUSTOM_BIND] {
            bind.valid = true;
        }
        Self { binds }
    }

    /// Stock keyboard layout for the first player
    pub fn defaults() -> Self {
        let mut port = Self::empty();
        let layout = [
            ("b", Key::Z),
            ("y", Key::A),
            ("select", Key::RSHIFT),
            ("start", Key::RETURN),
            ("up", Key::UP),
            ("down", Key::DOWN),
            ("left", Key::LEFT),
            ("right", Key::RIGHT),
            ("a", Key::X),
            ("x", Key::S),
            ("l", Key::Q),
            ("r", Key::W),
        ];
        for (name, key) in layout {
            if let Some(id) = button_id(name) {
                port.bind(id, key);
            }
        }
        port
    }

    /// Binding for a bind id, or `None` past [`BIND_LIST_END`]
    pub fn get(&self, id: u32) -> Option<&Keybind> {
        usize::try_from(id).ok().and_then(|id| self.binds.get(id))
    }

    /// Binds a slot to a key and marks it valid. Out-of-range ids are ignored.
    pub fn bind(&mut self, id: usize, key: Key) {
        if let Some(slot) = self.binds.get_mut(id) {
            *slot = Keybind { valid: true, key };
        }
    }

    /// Marks a slot invalid
    pub fn unbind(&mut self, id: usize) {
        if let Some(slot) = self.binds.get_mut(id) {
            slot.valid = false;
        }
    }

    /// The digital button slots, in bit order
    pub fn buttons(&self) -> &[Keybind] {
        &self.binds[..FIRST_CUSTOM_BIND]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keybind> {
        self.binds.iter()
    }
}

impl Default for PortBinds {
    fn default() -> Self {
        Self::empty()
    }
}

/// Per-port binding slots for every user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingTable {
    ports: Vec<PortBinds>,
}

impl BindingTable {
    /// Port 0 gets the stock layout, every other port is empty
    pub fn new() -> Self {
        let mut table = Self::empty();
        table.ports[0] = PortBinds::defaults();
        table
    }

    /// Every port empty
    pub fn empty() -> Self {
        Self {
            ports: vec![PortBinds::empty(); MAX_USERS],
        }
    }

    pub fn port(&self, port: u32) -> Option<&PortBinds> {
        usize::try_from(port).ok().and_then(|port| self.ports.get(port))
    }

    pub fn port_mut(&mut self, port: usize) -> Option<&mut PortBinds> {
        self.ports.get_mut(port)
    }

    /// Binding for (port, id), or `None` when either is out of range
    pub fn get(&self, port: u32, id: u32) -> Option<&Keybind> {
        self.port(port).and_then(|binds| binds.get(id))
    }
}

impl Default for BindingTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_names() {
        assert_eq!(button_id("b"), Some(0));
        assert_eq!(button_id("START"), Some(3));
        assert_eq!(button_id("r3"), Some(15));
        assert_eq!(button_id("r_y_minus"), Some(BIND_LIST_END - 1));
        assert_eq!(button_id("turbo"), None);
        assert_eq!(button_name(8), Some("a"));
        assert_eq!(button_name(BIND_LIST_END), None);
    }

    #[test]
    fn test_empty_port_validity() {
        let port = PortBinds::empty();
        assert!(port.buttons().iter().all(|b| b.valid && b.key == Key::UNKNOWN));
        assert!(port.iter().skip(FIRST_CUSTOM_BIND).all(|b| !b.valid));
    }

    #[test]
    fn test_default_layout() {
        let table = BindingTable::new();
        assert_eq!(table.get(0, 0).map(|b| b.key), Some(Key::Z));
        assert_eq!(table.get(0, 3).map(|b| b.key), Some(Key::RETURN));
        assert_eq!(table.get(0, 11).map(|b| b.key), Some(Key::W));
        assert_eq!(table.get(1, 0).map(|b| b.key), Some(Key::UNKNOWN));
    }

    #[test]
    fn test_out_of_range_lookups() {
        let table = BindingTable::new();
        assert!(table.get(MAX_USERS as u32, 0).is_none());
        assert!(table.get(0, BIND_LIST_END as u32).is_none());
        assert!(table.get(0, 256).is_none());
    }

    #[test]
    fn test_bind_and_unbind() {
        let mut table = BindingTable::empty();
        let port = table.port_mut(2).unwrap();
        port.bind(16, Key::J);
        port.unbind(0);
        port.bind(BIND_LIST_END, Key::K);

        assert_eq!(table.get(2, 16), Some(&Keybind { valid: true, key: Key::J }));
        assert!(!table.get(2, 0).unwrap().valid);
    }
}
