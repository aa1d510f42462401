//! Health check system for validating configuration and engine behavior
//!
//! Useful for:
//! - Validating a deployment's config profiles before launch
//! - CI health checks
//! - Narrowing down input problems to a layer (config, keymap, lifecycle, touch)
//!
//! # Example
//!
//! ```no_run
//! use frame_input::health::{HealthCheckRunner, checks::*};
//!
//! let report = HealthCheckRunner::new()
//!     .add_check(ConfigCheck::new())
//!     .add_check(KeymapCheck::new())
//!     .add_check(LifecycleCheck::new())
//!     .add_check(PointerCheck::new())
//!     .run();
//!
//! if report.is_healthy() {
//!     println!("All systems operational!");
//! }
//! ```

pub mod check;
pub mod checks;
pub mod reporter;
pub mod runner;

pub use check::{CheckLog, CheckResult, CheckStatus, SystemCheck};
pub use reporter::{format_report, print_report};
pub use runner::{HealthCheckReport, HealthCheckRunner};

/// Runs all default health checks and returns a report
pub fn run_all_checks() -> HealthCheckReport {
    HealthCheckRunner::new()
        .add_check(checks::ConfigCheck::new())
        .add_check(checks::KeymapCheck::new())
        .add_check(checks::LifecycleCheck::new())
        .add_check(checks::PointerCheck::new())
        .run()
}
