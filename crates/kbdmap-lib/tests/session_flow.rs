//! Integration tests: full mapping sessions against a fake LED class tree.
//!
//! A temporary directory stands in for `/sys/class/leds`; the real sysfs
//! controller writes into it, so the control file contents after a session
//! show exactly what the hardware would have been left with.

use std::path::Path;
use std::time::Duration;

use kbdmap_lib::KbdmapError;
use kbdmap_lib::led::{self, BRIGHTNESS_FILE, INTENSITY_FILE, Rgb, SysfsController};
use kbdmap_lib::mapping::{KeyMapping, MAPPING_FILE};
use kbdmap_lib::prompt::ScriptedPrompt;
use kbdmap_lib::session::{SessionEnd, SessionOptions, run_session};

/// Helper: build a fake LED class directory with the given entry names.
fn fake_leds_dir(names: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in names {
        let led = dir.path().join(name);
        std::fs::create_dir(&led).unwrap();
        std::fs::write(led.join(INTENSITY_FILE), "9 9 9").unwrap();
        std::fs::write(led.join(BRIGHTNESS_FILE), "0").unwrap();
    }
    dir
}

fn intensity(leds_dir: &Path, name: &str) -> String {
    std::fs::read_to_string(leds_dir.join(name).join(INTENSITY_FILE)).unwrap()
}

fn options(out_dir: &Path) -> SessionOptions {
    SessionOptions {
        probe_color: Rgb::RED,
        settle: Duration::ZERO,
        output: out_dir.join(MAPPING_FILE),
    }
}

const FOUR: [&str; 4] = [
    "rgb:kbd_backlight_3",
    "rgb:kbd_backlight",
    "rgb:kbd_backlight_2",
    "rgb:kbd_backlight_1",
];

// ── Test: documented operator sequence ──

#[test]
fn shift_no_empty_exit_sequence() {
    let leds_dir = fake_leds_dir(&FOUR);
    let out_dir = tempfile::tempdir().unwrap();
    let leds = led::discover(leds_dir.path()).unwrap();
    let indices: Vec<i64> = leds.iter().map(|l| l.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);

    let mut prompt = ScriptedPrompt::new(["left_shift", "no", "", "exit"]);
    let report = run_session(
        &SysfsController::default(),
        &leds,
        &mut prompt,
        &mut Vec::new(),
        &options(out_dir.path()),
    )
    .unwrap();

    assert_eq!(report.end, SessionEnd::ExitRequested);

    let path = out_dir.path().join(MAPPING_FILE);
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw, serde_json::json!({ "0": "left_shift" }));
    assert_eq!(KeyMapping::load_from(&path).unwrap(), report.mapping);

    // Every LED is off, including ones never probed.
    for name in FOUR {
        assert_eq!(intensity(leds_dir.path(), name), "0 0 0", "{name}");
    }
}

// ── Test: output file format ──

#[test]
fn output_file_is_four_space_indented() {
    let leds_dir = fake_leds_dir(&["rgb:kbd_backlight", "rgb:kbd_backlight_1"]);
    let out_dir = tempfile::tempdir().unwrap();
    let leds = led::discover(leds_dir.path()).unwrap();

    let mut prompt = ScriptedPrompt::new(["esc", "f1"]);
    run_session(
        &SysfsController::default(),
        &leds,
        &mut prompt,
        &mut Vec::new(),
        &options(out_dir.path()),
    )
    .unwrap();

    let contents = std::fs::read_to_string(out_dir.path().join(MAPPING_FILE)).unwrap();
    assert_eq!(contents, "{\n    \"0\": \"esc\",\n    \"1\": \"f1\"\n}");
}

// ── Test: previous run's file is replaced, never merged ──

#[test]
fn previous_results_are_overwritten() {
    let leds_dir = fake_leds_dir(&["rgb:kbd_backlight"]);
    let out_dir = tempfile::tempdir().unwrap();
    let path = out_dir.path().join(MAPPING_FILE);
    std::fs::write(&path, "{\"5\": \"old\"}").unwrap();
    let leds = led::discover(leds_dir.path()).unwrap();

    let mut prompt = ScriptedPrompt::new(["new"]);
    run_session(
        &SysfsController::default(),
        &leds,
        &mut prompt,
        &mut Vec::new(),
        &options(out_dir.path()),
    )
    .unwrap();

    let loaded = KeyMapping::load_from(&path).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.get(0), Some("new"));
}

// ── Test: nothing labelled leaves any previous file alone ──

#[test]
fn all_skipped_writes_no_file() {
    let leds_dir = fake_leds_dir(&["rgb:kbd_backlight", "rgb:kbd_backlight_1"]);
    let out_dir = tempfile::tempdir().unwrap();
    let leds = led::discover(leds_dir.path()).unwrap();

    let mut prompt = ScriptedPrompt::new(["NO", ""]);
    let mut out = Vec::new();
    let report = run_session(
        &SysfsController::default(),
        &leds,
        &mut prompt,
        &mut out,
        &options(out_dir.path()),
    )
    .unwrap();

    assert_eq!(report.end, SessionEnd::Completed);
    assert!(!out_dir.path().join(MAPPING_FILE).exists());
    assert!(String::from_utf8(out).unwrap().contains("No mapping results to save."));
}

// ── Test: a broken control file does not derail the session ──

#[test]
fn broken_led_is_skipped() {
    let leds_dir = fake_leds_dir(&["rgb:kbd_backlight", "rgb:kbd_backlight_2"]);
    // Entry 1 has a directory in place of its intensity file: every write fails.
    let broken = leds_dir.path().join("rgb:kbd_backlight_1");
    std::fs::create_dir_all(broken.join(INTENSITY_FILE)).unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let leds = led::discover(leds_dir.path()).unwrap();
    assert_eq!(leds.len(), 3);

    let mut prompt = ScriptedPrompt::new(["a", "b", "c"]);
    let report = run_session(
        &SysfsController::default(),
        &leds,
        &mut prompt,
        &mut Vec::new(),
        &options(out_dir.path()),
    )
    .unwrap();

    assert_eq!(report.end, SessionEnd::Completed);
    assert_eq!(report.mapping.len(), 3);
    assert_eq!(intensity(leds_dir.path(), "rgb:kbd_backlight_2"), "0 0 0");
}

// ── Test: entries without color control are prompted but never written ──

#[test]
fn colorless_entry_is_untouched() {
    let leds_dir = fake_leds_dir(&["rgb:kbd_backlight"]);
    let plain = leds_dir.path().join("white:kbd_backlight_1");
    std::fs::create_dir(&plain).unwrap();
    std::fs::write(plain.join(BRIGHTNESS_FILE), "3").unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let leds = led::discover(leds_dir.path()).unwrap();

    let mut prompt = ScriptedPrompt::new(["", ""]);
    let report = run_session(
        &SysfsController::default(),
        &leds,
        &mut prompt,
        &mut Vec::new(),
        &options(out_dir.path()),
    )
    .unwrap();

    assert_eq!(report.probed, 2);
    assert_eq!(
        std::fs::read_to_string(plain.join(BRIGHTNESS_FILE)).unwrap(),
        "3"
    );
    assert!(!plain.join(INTENSITY_FILE).exists());
}

// ── Test: empty LED directory ──

#[test]
fn empty_directory_is_fatal() {
    let leds_dir = tempfile::tempdir().unwrap();
    let err = led::discover(leds_dir.path()).unwrap_err();
    assert!(matches!(err, KbdmapError::NoDevicesFound { .. }));
}
