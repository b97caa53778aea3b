//! kbdmap — interactive per-key LED mapping for sysfs keyboard backlights.

pub mod config;
pub mod error;
pub mod led;
pub mod mapping;
pub mod prompt;
pub mod session;

pub use error::KbdmapError;
