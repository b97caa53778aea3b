//! CLI subcommands — mapping session, device listing, LED reset, results.

mod config_cmd;
mod devices;
mod map;
mod off;
mod show;

use std::path::{Path, PathBuf};

use clap::Subcommand;
use serde::Serialize;

pub(super) use crate::RUNNING;
pub(super) use kbdmap_lib::KbdmapError;
pub(super) use kbdmap_lib::config::Config;
pub(super) use kbdmap_lib::error::Result;
pub(super) use kbdmap_lib::led::{self, LedDevice, SysfsController};
pub(super) use kbdmap_lib::mapping::KeyMapping;
pub(super) use kbdmap_lib::prompt::StdinPrompt;
pub(super) use kbdmap_lib::session;

const PADDING: usize = 2;

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn format_kv(key: &str, value: impl std::fmt::Display, w: usize) -> String {
    format!("{key:<width$}{value}", width = w)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{}", format_kv(key, value, w));
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {key:<width$}{value}", width = w - 2);
}

/// Options shared by every subcommand.
pub struct Globals {
    pub json: bool,
    pub config: Option<PathBuf>,
    pub leds_dir: Option<PathBuf>,
}

/// Load the config file (custom or default) and apply global overrides.
pub(super) fn load_config(globals: &Globals) -> Config {
    let mut config = match &globals.config {
        Some(path) => {
            let (config, warnings) = Config::load_from(path);
            for w in &warnings {
                log::warn!("{w}");
            }
            config
        }
        None => Config::load(),
    };
    if let Some(dir) = &globals.leds_dir {
        config.leds_dir = dir.clone();
    }
    config
}

/// The config file in effect: `--config`, else the platform default.
pub(super) fn config_path(globals: &Globals) -> Option<PathBuf> {
    globals.config.clone().or_else(Config::path)
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct DeviceJson {
    pub index: i64,
    pub name: String,
    pub path: String,
    pub color_control: bool,
}

impl From<&LedDevice> for DeviceJson {
    fn from(led: &LedDevice) -> Self {
        DeviceJson {
            index: led.index,
            name: led.name.clone(),
            path: led.path.display().to_string(),
            color_control: led.supports_color(),
        }
    }
}

#[derive(Serialize)]
pub(super) struct DevicesOutput {
    pub leds_dir: String,
    pub count: usize,
    pub devices: Vec<DeviceJson>,
}

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: Option<String>,
    pub config_file_exists: bool,
    pub settings: Config,
}

fn path_string(path: &Path) -> String {
    path.display().to_string()
}

#[derive(Subcommand)]
pub enum Command {
    /// Light each LED in turn and record which key it belongs to
    Map {
        /// Mapping output file (default: from config, led_mapping_results.json)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Probe color (#RRGGBB or a name like red, green, white)
        #[arg(long)]
        color: Option<String>,
        /// Pause after turning all LEDs off, in milliseconds
        #[arg(long)]
        settle_ms: Option<u64>,
    },

    /// List keyboard backlight LED devices
    Devices,

    /// Turn every keyboard backlight LED off
    Off,

    /// Print a saved mapping file
    Show {
        /// Mapping file (default: the configured output file)
        file: Option<PathBuf>,
    },

    /// Show current configuration and file paths
    Config,
}

impl Default for Command {
    fn default() -> Self {
        Command::Map {
            output: None,
            color: None,
            settle_ms: None,
        }
    }
}

/// Warn if `--json` was passed to a command that doesn't support it.
fn warn_json_unsupported(cmd_name: &str) {
    log::warn!("--json is not supported for `{cmd_name}` (ignored)");
}

pub fn run(cmd: Command, globals: &Globals) -> Result<()> {
    let config = load_config(globals);
    match cmd {
        Command::Map {
            output,
            color,
            settle_ms,
        } => {
            if globals.json {
                warn_json_unsupported("map");
            }
            map::cmd_map(config, output, color, settle_ms)
        }
        Command::Devices => devices::cmd_devices(&config, globals.json),
        Command::Off => {
            if globals.json {
                warn_json_unsupported("off");
            }
            off::cmd_off(&config)
        }
        Command::Show { file } => show::cmd_show(&config, file, globals.json),
        Command::Config => config_cmd::cmd_config(config, config_path(globals), globals.json),
    }
}
