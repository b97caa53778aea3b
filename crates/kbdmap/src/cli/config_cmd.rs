//! `config` subcommand — show current configuration and file paths.

use std::path::PathBuf;

use super::{Config, ConfigOutput, Result, kv, kv_indent, kv_width, path_string};

pub(super) fn cmd_config(config: Config, config_path: Option<PathBuf>, json: bool) -> Result<()> {
    let config_exists = config_path.as_ref().is_some_and(|p| p.exists());

    if json {
        let output = ConfigOutput {
            config_file: config_path.as_deref().map(path_string),
            config_file_exists: config_exists,
            settings: config,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let w = kv_width(
        &["Config file:"],
        &[
            "leds_dir:",
            "probe_color:",
            "brightness:",
            "settle_ms:",
            "output_file:",
        ],
    );

    match &config_path {
        Some(p) if config_exists => kv("Config file:", format_args!("{} (loaded)", p.display()), w),
        Some(p) => kv(
            "Config file:",
            format_args!("{} (not found, using defaults)", p.display()),
            w,
        ),
        None => kv("Config file:", "(no config directory)", w),
    }
    println!();

    println!("Settings:");
    kv_indent("leds_dir:", config.leds_dir.display(), w);
    kv_indent("probe_color:", &config.probe_color, w);
    kv_indent("brightness:", config.brightness, w);
    kv_indent("settle_ms:", config.settle_ms, w);
    kv_indent("output_file:", config.output_file.display(), w);

    if let Err(errors) = config.validate() {
        for e in errors {
            log::warn!("{e}");
        }
    }

    Ok(())
}
