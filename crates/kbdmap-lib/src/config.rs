//! Application configuration — TOML-based, platform-aware paths.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::led::{LEDS_DIR, MAX_BRIGHTNESS, Rgb};
use crate::mapping::MAPPING_FILE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// LED class directory to scan. Default: "/sys/class/leds".
    #[serde(default = "default_leds_dir")]
    pub leds_dir: PathBuf,

    /// Color used to light the LED under test (hex or name). Default: "#FF0000" (red).
    #[serde(default = "default_probe_color")]
    pub probe_color: String,

    /// Value written to the brightness control file. Default: 255.
    #[serde(default = "default_brightness")]
    pub brightness: u8,

    /// Pause after the initial all-off, in milliseconds. Default: 1000.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Mapping output file, relative to the working directory unless absolute.
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,
}

fn default_leds_dir() -> PathBuf {
    PathBuf::from(LEDS_DIR)
}
fn default_probe_color() -> String {
    "#FF0000".into()
}
fn default_brightness() -> u8 {
    MAX_BRIGHTNESS
}
fn default_settle_ms() -> u64 {
    1000
}
fn default_output_file() -> PathBuf {
    PathBuf::from(MAPPING_FILE)
}

impl Default for Config {
    fn default() -> Self {
        Config {
            leds_dir: default_leds_dir(),
            probe_color: default_probe_color(),
            brightness: default_brightness(),
            settle_ms: default_settle_ms(),
            output_file: default_output_file(),
        }
    }
}

/// Validation errors that [`Config::validate`] can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The `probe_color` field could not be parsed.
    InvalidColor(String),
    /// The `probe_color` is black, so the LED under test would stay dark.
    InvisibleProbe,
    /// The `brightness` is zero.
    ZeroBrightness,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidColor(e) => write!(f, "Invalid probe color: {e}"),
            ValidationError::InvisibleProbe => write!(f, "Probe color cannot be black/off"),
            ValidationError::ZeroBrightness => write!(f, "Brightness cannot be 0"),
        }
    }
}

impl Config {
    /// Platform-specific config directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("kbdmap"))
    }

    /// Full path to config file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Load config from disk, or return defaults if not found.
    pub fn load() -> Self {
        let (config, warnings) = Self::load_with_warnings();
        for w in &warnings {
            log::warn!("{w}");
        }
        config
    }

    /// Load config from the default path, returning the config and any parse warnings.
    pub fn load_with_warnings() -> (Self, Vec<String>) {
        let Some(path) = Self::path() else {
            return (Self::default(), vec![]);
        };
        Self::load_from(&path)
    }

    /// Load config from an arbitrary path, returning the config and any parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, vec![]),
                Err(e) => {
                    let warning = format!(
                        "config parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Parsed probe color.
    pub fn probe_rgb(&self) -> crate::error::Result<Rgb> {
        Rgb::parse(&self.probe_color)
    }

    /// Validate the entire config, collecting all errors.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        match self.probe_rgb() {
            Ok(rgb) if rgb.is_off() => errors.push(ValidationError::InvisibleProbe),
            Ok(_) => {}
            Err(e) => errors.push(ValidationError::InvalidColor(e.to_string())),
        }

        if self.brightness == 0 {
            errors.push(ValidationError::ZeroBrightness);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
