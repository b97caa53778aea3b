//! `map` subcommand — light each LED and ask the operator which key it is.

use std::path::PathBuf;
use std::time::Duration;

use super::{Config, KbdmapError, RUNNING, Result, StdinPrompt, SysfsController, session};

/// Apply per-run flags on top of the loaded config.
fn effective_config(
    mut config: Config,
    output: Option<PathBuf>,
    color: Option<String>,
    settle_ms: Option<u64>,
) -> Result<Config> {
    if let Some(output) = output {
        config.output_file = output;
    }
    if let Some(color) = color {
        config.probe_color = color;
    }
    if let Some(ms) = settle_ms {
        config.settle_ms = ms;
    }
    config.validate().map_err(|errors| {
        let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        KbdmapError::Config(msgs.join("; "))
    })?;
    Ok(config)
}

pub(super) fn cmd_map(
    config: Config,
    output: Option<PathBuf>,
    color: Option<String>,
    settle_ms: Option<u64>,
) -> Result<()> {
    let config = effective_config(config, output, color, settle_ms)?;
    let probe_color = config.probe_rgb()?;

    let mut stdout = std::io::stdout();
    session::print_banner(&mut stdout);

    let leds = session::prepare(&config.leds_dir)?;
    println!("Found {} LED devices.", leds.len());

    let controller = SysfsController::new(config.brightness);
    let mut prompt = StdinPrompt::new(&RUNNING);
    let opts = session::SessionOptions {
        probe_color,
        settle: Duration::from_millis(config.settle_ms),
        output: config.output_file.clone(),
    };

    let report = session::run_session(&controller, &leds, &mut prompt, &mut stdout, &opts)?;
    log::debug!(
        "session ended ({:?}) after {} of {} LEDs, {} mapped",
        report.end,
        report.probed,
        leds.len(),
        report.mapping.len()
    );
    Ok(())
}
