//! Built-in health checks for the input engine

pub mod config;
pub mod keymap;
pub mod lifecycle;
pub mod pointer;

pub use config::ConfigCheck;
pub use keymap::KeymapCheck;
pub use lifecycle::LifecycleCheck;
pub use pointer::PointerCheck;
