//! kbdmap — map keyboard backlight LEDs to key names, one LED at a time.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;

mod cli;

/// Shared shutdown flag — cleared by the Ctrl+C handler.
pub static RUNNING: AtomicBool = AtomicBool::new(true);

#[derive(Parser)]
#[command(
    name = "kbdmap",
    version,
    about = "Interactively map per-key keyboard backlight LEDs to key names"
)]
struct Args {
    /// Output as JSON (for devices, show, config)
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the default location
    #[arg(long = "config", global = true, value_name = "FILE")]
    config_file: Option<PathBuf>,

    /// LED class directory to scan (default: from config, /sys/class/leds)
    #[arg(long, global = true)]
    leds_dir: Option<PathBuf>,

    /// Defaults to `map`
    #[command(subcommand)]
    command: Option<cli::Command>,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    ctrlc::set_handler(move || {
        RUNNING.store(false, Ordering::SeqCst);
    })
    .ok();

    let globals = cli::Globals {
        json: args.json,
        config: args.config_file,
        leds_dir: args.leds_dir,
    };
    let command = args.command.unwrap_or_default();

    if let Err(e) = cli::run(command, &globals) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
