//! Configuration system health check

use crate::config::EngineConfig;
use crate::health::check::{CheckLog, CheckResult, SystemCheck};

/// Checks that every profile loads and its bindings resolve
pub struct ConfigCheck {
    profiles: Vec<&'static str>,
}

impl ConfigCheck {
    /// Creates a new config check with default profiles
    pub fn new() -> Self {
        Self {
            profiles: vec!["debug", "release"],
        }
    }

    pub fn with_profiles(profiles: Vec<&'static str>) -> Self {
        Self { profiles }
    }

    fn check_profile(log: &mut CheckLog, profile: &str) {
        let config = match EngineConfig::load(profile) {
            Ok(config) => config,
            Err(e) => {
                log.fail(format!("Profile '{}': failed to load - {}", profile, e));
                return;
            }
        };

        match config.binding_table() {
            Ok(_) => log.ok(format!(
                "Profile '{}': loaded ({:?} scale, {} configured ports)",
                profile,
                config.scale_mode,
                config.ports.len()
            )),
            Err(e) => log.fail(format!("Profile '{}': bad bindings - {}", profile, e)),
        }
    }
}

impl Default for ConfigCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates profile loading and binding resolution")
    }

    fn check(&self) -> CheckResult {
        let mut log = CheckLog::new();

        for profile in &self.profiles {
            Self::check_profile(&mut log, profile);
        }

        // A broken environment override should not fail the whole suite
        match EngineConfig::load_from_env() {
            Ok(config) => log.ok(format!("Environment config: profile '{}'", config.profile)),
            Err(e) => log.warn(format!("Environment config: {}", e)),
        }

        log.finish(
            format!("{} profiles validated", self.profiles.len()),
            "Config loaded with warnings",
            "Failed to load one or more config profiles",
        )
    }
}
