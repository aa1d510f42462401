//! Engine configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{InputError, Result};
use crate::input::bindings::{self, BindingTable};
use crate::input::{InputEngine, JoypadInfo, Key, Keymap, ScaleMode};

/// Prefix for environment overrides, e.g. `FRAME_INPUT_SCALE_MODE=native`
const ENV_PREFIX: &str = "FRAME_INPUT";

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    /// Whether raw positions need the display's backing scale applied
    pub scale_mode: ScaleMode,
    /// Initial game-focus state: keyboard bindings excluded from the button mask
    pub keyboard_mapping_blocked: bool,
    /// Forwarded to joypad backends
    pub axis_threshold: f32,
    /// Per-port keyboard bindings, button name to key name
    pub ports: Vec<BTreeMap<String, String>>,
}

impl EngineConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Profiles are loaded from config files in the following order:
    /// 1. config/{profile}.toml (profile-specific configuration)
    /// 2. Environment variables with prefix FRAME_INPUT_ (e.g., FRAME_INPUT_SCALE_MODE=native)
    ///
    /// Config files are searched for in:
    /// 1. Next to the executable (target/debug/config or target/release/config)
    /// 2. In the current directory (./config)
    pub fn load(profile: &str) -> Result<Self> {
        let source = match Self::find_config_dir() {
            Some(dir) => File::from(dir.join(profile).as_path()).required(false),
            None => File::with_name(&format!("config/{}", profile)).required(false),
        };

        Self::build(Config::builder().add_source(source), profile)
    }

    /// Loads a profile from an explicit config directory
    pub fn load_from_dir(dir: &Path, profile: &str) -> Result<Self> {
        let source = File::from(dir.join(profile).as_path()).required(false);
        Self::build(Config::builder().add_source(source), profile)
    }

    fn build(builder: ConfigBuilder<DefaultState>, profile: &str) -> Result<Self> {
        // Single _ after the prefix, __ between nested fields
        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override("profile", profile)?
            .build()?;

        let config: Self = config.try_deserialize()?;
        info!(
            profile = %config.profile,
            scale_mode = ?config.scale_mode,
            ports = config.ports.len(),
            "Loaded input configuration"
        );
        Ok(config)
    }

    /// Finds the config directory by searching in multiple locations
    fn find_config_dir() -> Option<PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = PathBuf::from("config");
        if cwd_config.exists() {
            return Some(cwd_config);
        }

        None
    }

    /// Loads configuration using the FRAME_INPUT_PROFILE environment variable,
    /// defaulting to "release"
    pub fn load_from_env() -> Result<Self> {
        let profile =
            std::env::var("FRAME_INPUT_PROFILE").unwrap_or_else(|_| "release".to_string());
        Self::load(&profile)
    }

    /// Resolves the configured port bindings into a binding table
    ///
    /// With no ports configured, port 0 gets the stock layout.
    pub fn binding_table(&self) -> Result<BindingTable> {
        if self.ports.is_empty() {
            return Ok(BindingTable::new());
        }

        let mut table = BindingTable::empty();
        for (port, entries) in self.ports.iter().enumerate() {
            let binds = table
                .port_mut(port)
                .ok_or(InputError::PortOutOfRange { port })?;

            for (button, key_name) in entries {
                let id = bindings::button_id(button).ok_or_else(|| InputError::UnknownButton {
                    name: button.clone(),
                })?;
                let key = Key::from_name(key_name).ok_or_else(|| InputError::UnknownKey {
                    name: key_name.clone(),
                })?;
                binds.bind(id, key);
            }
        }

        Ok(table)
    }

    /// Pad routing info handed to backends
    pub fn joypad_info(&self, joy_idx: u32) -> JoypadInfo {
        JoypadInfo {
            joy_idx,
            axis_threshold: self.axis_threshold,
        }
    }

    /// Creates an engine with the built-in keymap and this configuration's scale mode
    pub fn init_engine(&self) -> Result<InputEngine> {
        InputEngine::init(Keymap::APPLE_HID, self.scale_mode)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            profile: "release".to_string(),
            scale_mode: ScaleMode::Backing,
            keyboard_mapping_blocked: false,
            axis_threshold: 0.5,
            ports: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MAX_USERS;
    use std::fs;

    fn write_profile(dir: &Path, profile: &str, contents: &str) {
        fs::write(dir.join(format!("{}.toml", profile)), contents).unwrap();
    }

    #[test]
    fn test_missing_profile_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::load_from_dir(dir.path(), "nowhere").unwrap();
        assert_eq!(config.profile, "nowhere");
        assert_eq!(config.scale_mode, ScaleMode::Backing);
        assert!(!config.keyboard_mapping_blocked);
        assert!(config.ports.is_empty());
    }

    #[test]
    fn test_profile_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        write_profile(
            dir.path(),
            "touch",
            r#"
scale_mode = "native"
keyboard_mapping_blocked = true
axis_threshold = 0.25

[[ports]]
b = "k"
start = "space"

[[ports]]
a = "keypad5"
"#,
        );

        let config = EngineConfig::load_from_dir(dir.path(), "touch").unwrap();
        assert_eq!(config.scale_mode, ScaleMode::Native);
        assert!(config.keyboard_mapping_blocked);
        assert_eq!(config.joypad_info(3).axis_threshold, 0.25);
        assert_eq!(config.joypad_info(3).joy_idx, 3);

        let table = config.binding_table().unwrap();
        assert_eq!(table.get(0, 0).map(|b| b.key), Some(Key::K));
        assert_eq!(table.get(0, 3).map(|b| b.key), Some(Key::SPACE));
        assert_eq!(table.get(1, 8).map(|b| b.key), Some(Key::KP5));
        // Unlisted buttons stay unbound
        assert_eq!(table.get(0, 8).map(|b| b.key), Some(Key::UNKNOWN));
    }

    #[test]
    fn test_default_bindings_without_ports() {
        let table = EngineConfig::default().binding_table().unwrap();
        assert_eq!(table, BindingTable::new());
    }

    #[test]
    fn test_bad_bindings_are_rejected() {
        let mut config = EngineConfig::default();
        config.ports = vec![BTreeMap::from([("b".to_string(), "nokey".to_string())])];
        assert!(matches!(
            config.binding_table(),
            Err(InputError::UnknownKey { name }) if name == "nokey"
        ));

        config.ports = vec![BTreeMap::from([("turbo".to_string(), "z".to_string())])];
        assert!(matches!(
            config.binding_table(),
            Err(InputError::UnknownButton { name }) if name == "turbo"
        ));

        config.ports = vec![BTreeMap::new(); MAX_USERS + 1];
        assert!(matches!(
            config.binding_table(),
            Err(InputError::PortOutOfRange { port }) if port == MAX_USERS
        ));
    }

    #[test]
    fn test_init_engine_uses_scale_mode() {
        let config = EngineConfig {
            scale_mode: ScaleMode::Native,
            ..EngineConfig::default()
        };
        let engine = config.init_engine().unwrap();
        assert_eq!(engine.scale_mode(), ScaleMode::Native);
    }
}
