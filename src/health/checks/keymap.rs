//! Built-in keymap health check

use std::collections::HashSet;

use crate::health::check::{CheckLog, CheckResult, SystemCheck};
use crate::input::{BindingTable, Key, Keymap, KeymapEntry, MAX_KEYS};

/// Checks that a platform keymap fits the key tables and has no collisions
pub struct KeymapCheck {
    entries: &'static [KeymapEntry],
}

impl KeymapCheck {
    /// Checks the built-in HID keymap
    pub fn new() -> Self {
        Self {
            entries: Keymap::APPLE_HID,
        }
    }

    pub fn with_entries(entries: &'static [KeymapEntry]) -> Self {
        Self { entries }
    }
}

impl Default for KeymapCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for KeymapCheck {
    fn name(&self) -> &'static str {
        "Keymap"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates the platform keymap against the key space and scan-code table")
    }

    fn check(&self) -> CheckResult {
        let mut log = CheckLog::new();

        let out_of_space: Vec<_> = self
            .entries
            .iter()
            .filter(|(key, _)| !key.is_representable())
            .map(|(key, _)| key.to_string())
            .collect();
        log.verify(
            out_of_space.is_empty(),
            format!("Logical keys in range ({} outside)", out_of_space.len()),
        );

        let too_wide = self
            .entries
            .iter()
            .filter(|(_, scancode)| usize::from(*scancode) >= MAX_KEYS)
            .count();
        log.verify(
            too_wide == 0,
            format!("Scan codes below {} ({} outside)", MAX_KEYS, too_wide),
        );

        let mut keys = HashSet::new();
        let duplicated: Vec<_> = self
            .entries
            .iter()
            .filter(|(key, _)| !keys.insert(*key))
            .map(|(key, _)| key.to_string())
            .collect();
        if duplicated.is_empty() {
            log.ok("Each logical key mapped once");
        } else {
            log.warn(format!("Keys mapped twice: {}", duplicated.join(", ")));
        }

        let mut scancodes = HashSet::new();
        let shared = self
            .entries
            .iter()
            .filter(|(_, scancode)| !scancodes.insert(*scancode))
            .count();
        if shared == 0 {
            log.ok("Each scan code used once");
        } else {
            log.warn(format!("{} scan codes shared by several keys", shared));
        }

        match Keymap::try_from_entries(self.entries) {
            Ok(keymap) => {
                let defaults = BindingTable::new();
                let unmapped: Vec<_> = defaults
                    .port(0)
                    .into_iter()
                    .flat_map(|binds| binds.buttons().iter())
                    .filter(|bind| bind.valid && bind.key != Key::UNKNOWN)
                    .filter(|bind| keymap.scancode(bind.key).is_none())
                    .map(|bind| bind.key.to_string())
                    .collect();
                log.verify(
                    unmapped.is_empty(),
                    format!(
                        "Default bindings reachable ({} of {} keys mapped)",
                        keymap.mapped_count(),
                        self.entries.len()
                    ),
                );
            }
            Err(e) => log.fail(format!("Lookup table allocation failed: {}", e)),
        }

        log.finish(
            format!("{} entries validated", self.entries.len()),
            "Keymap has ambiguous entries",
            "Keymap does not fit the key tables",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::CheckStatus;

    static DUPLICATE: &[KeymapEntry] = &[(Key::A, 4), (Key::A, 5)];
    static OUT_OF_SPACE: &[KeymapEntry] = &[(Key(400), 4)];

    #[test]
    fn test_builtin_keymap_passes() {
        let result = KeymapCheck::new().check();
        assert_eq!(result.status, CheckStatus::Pass, "{:?}", result.details);
    }

    #[test]
    fn test_duplicate_key_is_reported() {
        // Default bindings are unreachable through this keymap
        assert_eq!(KeymapCheck::with_entries(DUPLICATE).check().status, CheckStatus::Fail);
        assert!(
            KeymapCheck::with_entries(DUPLICATE)
                .check()
                .details
                .iter()
                .any(|line| line.contains("Keys mapped twice"))
        );
    }

    #[test]
    fn test_unrepresentable_key_fails() {
        assert_eq!(KeymapCheck::with_entries(OUT_OF_SPACE).check().status, CheckStatus::Fail);
    }
}
