//! LED devices — enumeration, color, control.

mod color;
mod device;
mod ops;

pub use color::Rgb;
pub use device::{
    BRIGHTNESS_FILE, INTENSITY_FILE, LEDS_DIR, LedDevice, UNPARSED_INDEX, discover,
    enumerate_leds, parse_led_index,
};
pub use ops::{AllOffGuard, LedController, MAX_BRIGHTNESS, SysfsController, mock, turn_off_all};
