//! Frame Input
//!
//! Unified per-frame input state: joypad backends, keyboard bindings, mouse and
//! touch merged behind a single `(port, device, index, id)` query.

/// Profile-based engine configuration
pub mod config;

/// Error type shared by initialization and configuration
pub mod error;

/// Self-diagnostics for configuration and engine behavior
pub mod health;

/// Input tables, query resolution and the driver lifecycle
pub mod input;

pub use config::EngineConfig;
pub use error::{InputError, Result};
