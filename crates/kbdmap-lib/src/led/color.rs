//! Color parsing and formatting for multi-color LED class devices.
//!
//! The kernel `multi_intensity` file takes one decimal value per channel,
//! space separated, e.g. `"255 0 0"`.

use std::fmt;

use crate::error::{KbdmapError, Result};

/// Requested per-channel intensity for one LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const OFF: Rgb = Rgb::new(0, 0, 0);
    pub const RED: Rgb = Rgb::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    pub fn is_off(&self) -> bool {
        *self == Rgb::OFF
    }

    /// The string written to a `multi_intensity` control file.
    pub fn intensity_string(&self) -> String {
        format!("{} {} {}", self.r, self.g, self.b)
    }

    /// Parse a color string.
    ///
    /// Accepts:
    /// - Hex: `"#FF0000"`, `"FF0000"`, `"#ff0000"`
    /// - Named: `"red"`, `"green"`, `"blue"`, `"white"`, `"orange"`, `"yellow"`, `"purple"`, `"cyan"`
    pub fn parse(s: &str) -> Result<Rgb> {
        let s = s.trim();

        match s.to_lowercase().as_str() {
            "red" => return Ok(Rgb::RED),
            "green" => return Ok(Rgb::new(0, 255, 0)),
            "blue" => return Ok(Rgb::new(0, 0, 255)),
            "white" => return Ok(Rgb::new(255, 255, 255)),
            "orange" => return Ok(Rgb::new(255, 128, 0)),
            "yellow" => return Ok(Rgb::new(255, 255, 0)),
            "purple" => return Ok(Rgb::new(128, 0, 255)),
            "cyan" => return Ok(Rgb::new(0, 255, 255)),
            "off" | "black" => return Ok(Rgb::OFF),
            _ => {}
        }

        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(KbdmapError::Color(format!(
                "Invalid color: {s} (use #RRGGBB or a color name)"
            )));
        }
        let val = u32::from_str_radix(hex, 16)
            .map_err(|_| KbdmapError::Color(format!("Invalid hex color: {s}")))?;
        Ok(Rgb::new(
            ((val >> 16) & 0xFF) as u8,
            ((val >> 8) & 0xFF) as u8,
            (val & 0xFF) as u8,
        ))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
