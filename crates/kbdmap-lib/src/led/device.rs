//! LED class device enumeration.
//!
//! Keyboard backlight controllers expose one LED class entry per key (or zone),
//! named `<color>:kbd_backlight` for the first and `<color>:kbd_backlight_<N>`
//! for the rest.

use std::path::{Path, PathBuf};

use crate::error::{KbdmapError, Result};

/// Default LED class directory.
pub const LEDS_DIR: &str = "/sys/class/leds";

/// Device name marker: entries must contain `:kbd_backlight`.
const NAME_MARKER: &str = ":kbd_backlight";
const INDEX_BASE: &str = "kbd_backlight";

/// Index assigned to entries whose name carries no parseable index.
pub const UNPARSED_INDEX: i64 = -1;

/// Control file accepting `"R G B"`.
pub const INTENSITY_FILE: &str = "multi_intensity";
/// Control file accepting a decimal brightness.
pub const BRIGHTNESS_FILE: &str = "brightness";

/// One controllable LED, as discovered on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedDevice {
    /// Control directory, e.g. `/sys/class/leds/rgb:kbd_backlight_3`.
    pub path: PathBuf,
    /// Index derived from the name, [`UNPARSED_INDEX`] if none.
    pub index: i64,
    /// Raw directory name.
    pub name: String,
}

impl LedDevice {
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let index = parse_led_index(&name);
        LedDevice { path, index, name }
    }

    pub fn intensity_path(&self) -> PathBuf {
        self.path.join(INTENSITY_FILE)
    }

    pub fn brightness_path(&self) -> PathBuf {
        self.path.join(BRIGHTNESS_FILE)
    }

    /// Whether the controller exposes per-channel color for this entry.
    pub fn supports_color(&self) -> bool {
        self.intensity_path().exists()
    }
}

/// Extract the LED index from a device name.
///
/// - `...kbd_backlight` → 0
/// - `...kbd_backlight_<N>` → N
/// - anything else → [`UNPARSED_INDEX`]
pub fn parse_led_index(name: &str) -> i64 {
    if name.ends_with(INDEX_BASE) {
        return 0;
    }
    let Some((_, digits)) = name.rsplit_once("kbd_backlight_") else {
        return UNPARSED_INDEX;
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return UNPARSED_INDEX;
    }
    digits.parse().unwrap_or(UNPARSED_INDEX)
}

/// Whether a directory entry name looks like a keyboard backlight LED.
fn is_kbd_backlight(name: &str) -> bool {
    !name.starts_with('.') && name.contains(NAME_MARKER)
}

/// Scan `dir` for keyboard backlight entries, sorted ascending by index.
///
/// Entries with [`UNPARSED_INDEX`] sort first. Ties keep scan order.
/// An unreadable directory counts as empty.
pub fn enumerate_leds(dir: &Path) -> Vec<LedDevice> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("reading {}: {e}", dir.display());
            return Vec::new();
        }
    };

    let mut leds: Vec<LedDevice> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| is_kbd_backlight(&entry.file_name().to_string_lossy()))
        .map(|entry| LedDevice::from_path(entry.path()))
        .collect();

    // sort_by_key is stable
    leds.sort_by_key(|led| led.index);
    leds
}

/// Like [`enumerate_leds`], but an empty result is an error.
pub fn discover(dir: &Path) -> Result<Vec<LedDevice>> {
    let leds = enumerate_leds(dir);
    if leds.is_empty() {
        return Err(KbdmapError::NoDevicesFound {
            dir: dir.to_path_buf(),
        });
    }
    log::debug!("found {} LED devices in {}", leds.len(), dir.display());
    Ok(leds)
}
