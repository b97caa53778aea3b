//! LED control operations — set color, turn everything off, scoped cleanup.

use std::io;
use std::path::Path;

use super::color::Rgb;
use super::device::LedDevice;

/// Maximum value accepted by the brightness control file.
pub const MAX_BRIGHTNESS: u8 = 255;

/// Something that can set an LED's color.
///
/// Implementations never fail outward: write errors are reported through the
/// log and the call becomes a no-op for that device.
pub trait LedController {
    fn set_color(&self, led: &LedDevice, color: Rgb);
}

/// Writes directly to LED class control files.
#[derive(Debug, Clone, Copy)]
pub struct SysfsController {
    brightness: u8,
}

impl Default for SysfsController {
    fn default() -> Self {
        SysfsController {
            brightness: MAX_BRIGHTNESS,
        }
    }
}

impl SysfsController {
    pub fn new(brightness: u8) -> Self {
        SysfsController { brightness }
    }

    fn write_colour(&self, led: &LedDevice, color: Rgb) -> io::Result<()> {
        // Ordering matters: intensity before brightness.
        write_control(&led.intensity_path(), &color.intensity_string())?;
        write_control(&led.brightness_path(), &self.brightness.to_string())
    }
}

fn write_control(path: &Path, value: &str) -> io::Result<()> {
    log::debug!("{} <- {value}", path.display());
    std::fs::write(path, value)
        .map_err(|e| io::Error::new(e.kind(), format!("{}: {e}", path.display())))
}

impl LedController for SysfsController {
    fn set_color(&self, led: &LedDevice, color: Rgb) {
        // No multi_intensity file: per-key color unsupported for this entry.
        if !led.supports_color() {
            return;
        }
        if let Err(e) = self.write_colour(led, color) {
            log::error!("writing to {}: {e}", led.path.display());
        }
    }
}

/// Set every device to off, in order.
pub fn turn_off_all(controller: &impl LedController, leds: &[LedDevice]) {
    for led in leds {
        controller.set_color(led, Rgb::OFF);
    }
}

/// Turns every LED off when dropped, including during panic unwinding.
pub struct AllOffGuard<'a, C: LedController> {
    controller: &'a C,
    leds: &'a [LedDevice],
}

impl<'a, C: LedController> AllOffGuard<'a, C> {
    pub fn new(controller: &'a C, leds: &'a [LedDevice]) -> Self {
        AllOffGuard { controller, leds }
    }
}

impl<C: LedController> Drop for AllOffGuard<'_, C> {
    fn drop(&mut self) {
        turn_off_all(self.controller, self.leds);
    }
}

// ── Recording controller for testing ──

/// In-memory controller for unit and integration tests.
#[doc(hidden)]
pub mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;

    /// Records every `set_color` call as `(device name, color)`.
    ///
    /// Devices listed in `failing` behave like a write error: the call is
    /// logged and not recorded.
    #[derive(Default)]
    pub struct RecordingController {
        pub commands: RefCell<Vec<(String, Rgb)>>,
        pub failing: RefCell<HashSet<String>>,
    }

    impl RecordingController {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_on(&self, name: &str) {
            self.failing.borrow_mut().insert(name.to_string());
        }

        /// Commands sent to one device, in order.
        pub fn commands_for(&self, name: &str) -> Vec<Rgb> {
            self.commands
                .borrow()
                .iter()
                .filter(|(n, _)| n == name)
                .map(|(_, c)| *c)
                .collect()
        }

        /// Whether the last command for every device that was ever lit is off.
        pub fn all_dark(&self) -> bool {
            let commands = self.commands.borrow();
            let lit: HashSet<&str> = commands
                .iter()
                .filter(|(_, c)| !c.is_off())
                .map(|(n, _)| n.as_str())
                .collect();
            lit.into_iter()
                .all(|name| self.commands_for(name).last().is_some_and(Rgb::is_off))
        }
    }

    impl LedController for RecordingController {
        fn set_color(&self, led: &LedDevice, color: Rgb) {
            if self.failing.borrow().contains(&led.name) {
                log::error!("writing to {}: mock: failure injected", led.path.display());
                return;
            }
            self.commands.borrow_mut().push((led.name.clone(), color));
        }
    }
}
