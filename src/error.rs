//! Error types for the input engine
//!
//! Only setup can fail. Queries degrade to zero instead of erroring, so nothing on
//! the per-frame path returns [`InputError`].

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors raised while creating the engine or loading its configuration
#[derive(Error, Debug)]
pub enum InputError {
    /// One of the fixed-capacity tables could not be reserved
    #[error("failed to allocate input tables: {0}")]
    Allocation(#[from] TryReserveError),

    /// Configuration files or environment could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A binding names a key that does not exist
    #[error("unknown key name: {name}")]
    UnknownKey { name: String },

    /// A binding names a joypad button that does not exist
    #[error("unknown joypad button: {name}")]
    UnknownButton { name: String },

    /// More ports were configured than the binding table can hold
    #[error("port {port} exceeds the number of supported users")]
    PortOutOfRange { port: usize },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, InputError>;
