//! Interactive mapping session.
//!
//! Lights each LED in turn, asks the operator which key lit up, and records
//! the answer. Every LED is switched off again before the session returns,
//! whichever way it ends.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{KbdmapError, Result};
use crate::led::{self, AllOffGuard, LedController, LedDevice, Rgb, UNPARSED_INDEX};
use crate::mapping::KeyMapping;
use crate::prompt::{InputOutcome, Prompt};

pub const QUESTION: &str = "Which key is this? (Enter='no', 'exit'=stop): ";

/// Per-run settings.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Color of the LED under test.
    pub probe_color: Rgb,
    /// Pause after the initial all-off.
    pub settle: Duration,
    /// Where the mapping is written.
    pub output: PathBuf,
}

/// How the probing loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Every device was probed.
    Completed,
    /// The operator typed `exit`.
    ExitRequested,
    /// Ctrl+C or closed input.
    Interrupted,
}

/// Outcome of [`run_session`].
#[derive(Debug)]
pub struct SessionReport {
    pub end: SessionEnd,
    /// Devices lit during the run.
    pub probed: usize,
    pub mapping: KeyMapping,
    /// Set when the mapping was written.
    pub saved_to: Option<PathBuf>,
}

/// Classified operator answer for one LED.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Answer {
    Skip,
    Key(String),
    Exit,
    Interrupt,
}

impl From<InputOutcome> for Answer {
    fn from(outcome: InputOutcome) -> Self {
        match outcome {
            InputOutcome::Input(s) if s.is_empty() || s.eq_ignore_ascii_case("no") => Answer::Skip,
            InputOutcome::Input(s) => Answer::Key(s),
            InputOutcome::ExitRequested => Answer::Exit,
            InputOutcome::Interrupted => Answer::Interrupt,
        }
    }
}

/// Fail unless running with root privileges.
pub fn ensure_root() -> Result<()> {
    #[cfg(unix)]
    {
        if !nix::unistd::geteuid().is_root() {
            return Err(KbdmapError::NotRoot);
        }
    }
    Ok(())
}

/// Session preconditions: root, then at least one LED under `leds_dir`.
pub fn prepare(leds_dir: &Path) -> Result<Vec<LedDevice>> {
    ensure_root()?;
    led::discover(leds_dir)
}

/// Operator instructions shown before anything else.
pub fn print_banner(out: &mut impl Write) {
    let rule = "-".repeat(44);
    writeln!(out, "Keyboard backlight key mapping (interactive)").ok();
    writeln!(out, "{rule}").ok();
    writeln!(out, "This tool will light up each LED one by one.").ok();
    writeln!(out, "Please type the name of the key that lights up.").ok();
    writeln!(out, "If NO key lights up, type 'no' or just press Enter.").ok();
    writeln!(out, "If you want to exit and save, type 'exit'.").ok();
    writeln!(out, "{rule}").ok();
}

/// Run the probe loop over `leds`, then persist whatever was collected.
///
/// Output write errors are ignored; the only error returned is a failure to
/// save a non-empty mapping, after all LEDs have been turned off.
pub fn run_session(
    controller: &impl LedController,
    leds: &[LedDevice],
    prompt: &mut impl Prompt,
    out: &mut impl Write,
    opts: &SessionOptions,
) -> Result<SessionReport> {
    let mut mapping = KeyMapping::new();

    let (end, probed) = {
        let _all_off = AllOffGuard::new(controller, leds);
        led::turn_off_all(controller, leds);
        if !opts.settle.is_zero() {
            std::thread::sleep(opts.settle);
        }
        probe_all(controller, leds, prompt, out, opts.probe_color, &mut mapping)
    };

    match end {
        SessionEnd::ExitRequested => {
            writeln!(out, "Stopping at operator request.").ok();
        }
        SessionEnd::Interrupted => {
            writeln!(out, "\nMapping interrupted.").ok();
        }
        SessionEnd::Completed => {}
    }

    let saved_to = finalize(&mapping, out, &opts.output)?;

    Ok(SessionReport {
        end,
        probed,
        mapping,
        saved_to,
    })
}

fn probe_all(
    controller: &impl LedController,
    leds: &[LedDevice],
    prompt: &mut impl Prompt,
    out: &mut impl Write,
    probe_color: Rgb,
    mapping: &mut KeyMapping,
) -> (SessionEnd, usize) {
    let total = leds.len();

    for (i, led) in leds.iter().enumerate() {
        controller.set_color(led, probe_color);
        writeln!(
            out,
            "\n[{}/{total}] LED Index: {} ({}) is ON ({probe_color}).",
            i + 1,
            led.index,
            led.name
        )
        .ok();
        out.flush().ok();

        let answer = Answer::from(prompt.ask(QUESTION));
        controller.set_color(led, Rgb::OFF);

        match answer {
            Answer::Exit => return (SessionEnd::ExitRequested, i + 1),
            Answer::Interrupt => return (SessionEnd::Interrupted, i + 1),
            Answer::Skip => {
                writeln!(out, "Skipped index {}", led.index).ok();
            }
            Answer::Key(name) => {
                if let Some(previous) = mapping.insert(led.index, name.as_str()) {
                    if led.index == UNPARSED_INDEX {
                        log::warn!(
                            "{} has no parseable index; \"{previous}\" in the {UNPARSED_INDEX} slot replaced by \"{name}\"",
                            led.name
                        );
                    } else {
                        log::warn!(
                            "index {} was mapped to \"{previous}\", now \"{name}\"",
                            led.index
                        );
                    }
                }
                writeln!(out, "Saved: index {} -> {name}", led.index).ok();
            }
        }
    }

    (SessionEnd::Completed, total)
}

/// Write and echo a non-empty mapping.
fn finalize(mapping: &KeyMapping, out: &mut impl Write, output: &Path) -> Result<Option<PathBuf>> {
    if mapping.is_empty() {
        writeln!(out, "\nNo mapping results to save.").ok();
        return Ok(None);
    }

    let saved = mapping.save_to(output);
    match &saved {
        Ok(()) => {
            writeln!(out, "\nMapping results saved to {}", output.display()).ok();
        }
        Err(e) => {
            log::error!("saving mapping to {}: {e}", output.display());
        }
    }
    // Echo even when the save failed, so nothing collected is lost.
    writeln!(out, "{}", mapping.to_json(2)?).ok();
    saved?;
    Ok(Some(output.to_path_buf()))
}
