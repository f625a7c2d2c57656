//! Color specifications for rendered QR images

use crate::error::{Error, Result};
use image::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const NAMED: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("lime", [0, 255, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("cyan", [0, 255, 255]),
    ("aqua", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("fuchsia", [255, 0, 255]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("silver", [192, 192, 192]),
    ("maroon", [128, 0, 0]),
    ("olive", [128, 128, 0]),
    ("purple", [128, 0, 128]),
    ("teal", [0, 128, 128]),
    ("navy", [0, 0, 128]),
    ("orange", [255, 165, 0]),
    ("brown", [165, 42, 42]),
    ("pink", [255, 192, 203]),
];

/// A color as written in configuration (`red`, `#ff0000`, `#f00`) together
/// with its resolved RGB value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    spec: String,
    rgb: [u8; 3],
}

impl Color {
    /// Parse a color name or hex triplet.
    pub fn parse(spec: &str) -> Result<Self> {
        let trimmed = spec.trim();
        let rgb = match trimmed.strip_prefix('#') {
            Some(hex) => parse_hex(hex),
            None => {
                let lower = trimmed.to_ascii_lowercase();
                NAMED
                    .iter()
                    .find(|(name, _)| *name == lower)
                    .map(|(_, rgb)| *rgb)
            }
        }
        .ok_or_else(|| Error::Color(spec.to_string()))?;

        Ok(Self {
            spec: trimmed.to_string(),
            rgb,
        })
    }

    pub(crate) fn from_parts(spec: &str, rgb: [u8; 3]) -> Self {
        Self {
            spec: spec.to_string(),
            rgb,
        }
    }

    /// Color as an `image` pixel
    pub fn to_rgb(&self) -> Rgb<u8> {
        Rgb(self.rgb)
    }

    /// The original textual specification
    pub fn as_str(&self) -> &str {
        &self.spec
    }
}

fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (slot, ch) in out.iter_mut().zip(hex.chars()) {
                let v = ch.to_digit(16)? as u8;
                *slot = v * 17;
            }
            Some(out)
        }
        6 => {
            let mut out = [0u8; 3];
            for (i, slot) in out.iter_mut().enumerate() {
                *slot = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
            }
            Some(out)
        }
        _ => None,
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.spec
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_colors_are_case_insensitive() {
        assert_eq!(Color::parse("Red").unwrap().to_rgb(), Rgb([255, 0, 0]));
        assert_eq!(Color::parse("WHITE").unwrap().to_rgb(), Rgb([255, 255, 255]));
        assert_eq!(Color::parse("yellow").unwrap().to_rgb(), Rgb([255, 255, 0]));
    }

    #[test]
    fn hex_colors() {
        assert_eq!(Color::parse("#1a2B3c").unwrap().to_rgb(), Rgb([0x1a, 0x2b, 0x3c]));
        assert_eq!(Color::parse("#f80").unwrap().to_rgb(), Rgb([0xff, 0x88, 0x00]));
    }

    #[test]
    fn keeps_original_spelling() {
        let color = Color::parse(" Blue ").unwrap();
        assert_eq!(color.as_str(), "Blue");
        assert_eq!(color.to_string(), "Blue");
    }

    #[test]
    fn rejects_unknown() {
        assert!(matches!(Color::parse("chartreuse-ish"), Err(Error::Color(_))));
        assert!(Color::parse("#12").is_err());
        assert!(Color::parse("#gggggg").is_err());
        assert!(Color::parse("").is_err());
    }
}
