//! Unified error type for the kbdmap-lib crate.
//!
//! [`KbdmapError`] covers the two fatal session preconditions (`NotRoot`,
//! `NoDevicesFound`) plus I/O, JSON, config and color errors. LED write
//! failures are deliberately absent: they are logged and skipped, never raised.

use std::fmt;
use std::path::PathBuf;

/// Unified error type for kbdmap-lib operations.
#[derive(Debug)]
pub enum KbdmapError {
    /// The process lacks the privilege needed to write LED control files.
    NotRoot,
    /// Enumeration of the LED class directory matched nothing.
    NoDevicesFound { dir: PathBuf },
    /// Standard I/O error (mapping file, config persistence, directory scan).
    Io(std::io::Error),
    /// Mapping file (de)serialization error.
    Json(serde_json::Error),
    /// Configuration validation error.
    Config(String),
    /// Color parsing error.
    Color(String),
}

impl fmt::Display for KbdmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KbdmapError::NotRoot => write!(f, "this tool must be run as root (sudo)"),
            KbdmapError::NoDevicesFound { dir } => {
                write!(f, "no keyboard backlight LEDs found in {}", dir.display())
            }
            KbdmapError::Io(e) => write!(f, "I/O error: {e}"),
            KbdmapError::Json(e) => write!(f, "JSON error: {e}"),
            KbdmapError::Config(e) => write!(f, "Config error: {e}"),
            KbdmapError::Color(e) => write!(f, "Color error: {e}"),
        }
    }
}

impl std::error::Error for KbdmapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KbdmapError::Io(e) => Some(e),
            KbdmapError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for KbdmapError {
    fn from(e: std::io::Error) -> Self {
        KbdmapError::Io(e)
    }
}

impl From<serde_json::Error> for KbdmapError {
    fn from(e: serde_json::Error) -> Self {
        KbdmapError::Json(e)
    }
}

/// Crate-level Result alias using [`KbdmapError`].
pub type Result<T> = std::result::Result<T, KbdmapError>;
