//! `off` subcommand — turn every keyboard backlight LED off.

use super::{Config, Result, SysfsController, led, session};

pub(super) fn cmd_off(config: &Config) -> Result<()> {
    let leds = session::prepare(&config.leds_dir)?;
    led::turn_off_all(&SysfsController::new(config.brightness), &leds);
    println!(
        "Turned off {} LED{}.",
        leds.len(),
        if leds.len() == 1 { "" } else { "s" }
    );
    Ok(())
}
