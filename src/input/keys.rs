//! Scan-code key table

use std::collections::TryReserveError;

/// Number of platform scan codes tracked by the key table
pub const MAX_KEYS: usize = 256;

/// Dense "is this scan code down" table written by the event source
#[derive(Debug, Clone)]
pub struct KeyTable {
    down: Vec<bool>,
}

impl KeyTable {
    /// Reserves a table of [`MAX_KEYS`] released keys
    pub fn try_new() -> Result<Self, TryReserveError> {
        let mut down = Vec::new();
        down.try_reserve_exact(MAX_KEYS)?;
        down.resize(MAX_KEYS, false);
        Ok(Self { down })
    }

    /// Records a press or release. Scan codes past [`MAX_KEYS`] are ignored.
    pub fn set(&mut self, scancode: u16, pressed: bool) {
        if let Some(slot) = self.down.get_mut(usize::from(scancode)) {
            *slot = pressed;
        }
    }

    /// Returns true if the scan code is in range and currently down
    pub fn is_down(&self, scancode: u16) -> bool {
        self.down
            .get(usize::from(scancode))
            .copied()
            .unwrap_or(false)
    }

    /// Number of keys currently held
    pub fn pressed_count(&self) -> usize {
        self.down.iter().filter(|down| **down).count()
    }

    /// Releases every key
    pub fn clear(&mut self) {
        self.down.fill(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_is_released() {
        let table = KeyTable::try_new().unwrap();
        assert_eq!(table.pressed_count(), 0);
        assert!(!table.is_down(0));
        assert!(!table.is_down((MAX_KEYS - 1) as u16));
    }

    #[test]
    fn test_set_and_release() {
        let mut table = KeyTable::try_new().unwrap();
        table.set(4, true);
        assert!(table.is_down(4));
        assert_eq!(table.pressed_count(), 1);

        table.set(4, false);
        assert!(!table.is_down(4));
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut table = KeyTable::try_new().unwrap();
        table.set(MAX_KEYS as u16, true);
        table.set(u16::MAX, true);
        assert_eq!(table.pressed_count(), 0);
        assert!(!table.is_down(MAX_KEYS as u16));
        assert!(!table.is_down(u16::MAX));
    }

    #[test]
    fn test_clear() {
        let mut table = KeyTable::try_new().unwrap();
        table.set(4, true);
        table.set(225, true);
        table.clear();
        assert_eq!(table.pressed_count(), 0);
    }
}
