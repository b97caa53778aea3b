//! `devices` subcommand — list keyboard backlight LEDs.

use super::{Config, DeviceJson, DevicesOutput, Result, led, path_string};

pub(super) fn cmd_devices(config: &Config, json: bool) -> Result<()> {
    let leds = led::enumerate_leds(&config.leds_dir);

    if json {
        let output = DevicesOutput {
            leds_dir: path_string(&config.leds_dir),
            count: leds.len(),
            devices: leds.iter().map(DeviceJson::from).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if leds.is_empty() {
        println!(
            "No keyboard backlight LEDs found in {}.",
            config.leds_dir.display()
        );
        return Ok(());
    }

    println!(
        "Found {} LED device{} in {}:",
        leds.len(),
        if leds.len() == 1 { "" } else { "s" },
        config.leds_dir.display()
    );
    println!();

    for (i, dev) in leds.iter().enumerate() {
        let note = if dev.supports_color() {
            ""
        } else {
            "  (no color control)"
        };
        println!("  [{:>3}] index {:>3}  {}{note}", i + 1, dev.index, dev.name);
    }

    Ok(())
}
