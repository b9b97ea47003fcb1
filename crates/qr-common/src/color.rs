//! Color specifications accepted for QR foreground and background.
//!
//! Colors arrive from HTML color pickers (`#rrggbb`), from widgets that emit
//! CSS functional notation (`rgba(12.0, 34.5, 56, 1)`), or as plain names.
//! QR output is always opaque, so any alpha component is parsed and dropped.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::QrError;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to an opaque RGBA array.
    pub fn to_rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    /// `#rrggbb` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// WCAG relative luminance in [0, 1].
    pub fn relative_luminance(&self) -> f64 {
        let channel = |c: u8| {
            let c = c as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }

    /// WCAG contrast ratio between two colors, from 1.0 (identical) to 21.0.
    pub fn contrast_ratio(&self, other: &Color) -> f64 {
        let a = self.relative_luminance();
        let b = other.relative_luminance();
        let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
        (hi + 0.05) / (lo + 0.05)
    }

    /// Parse a color, naming the offending request parameter on failure.
    pub fn parse_param(param: &str, value: &str) -> Result<Self, QrError> {
        value
            .parse::<Color>()
            .map_err(|e| QrError::invalid(param, e.to_string()))
    }
}

impl FromStr for Color {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(QrError::Validation("color is empty".to_string()));
        }

        let lower = s.to_lowercase();
        if let Some(hex) = lower.strip_prefix('#') {
            return parse_hex_color(hex).ok_or_else(|| {
                QrError::Validation(format!("malformed hex color '{}'", s))
            });
        }
        if let Some(args) = functional_args(&lower, "rgba") {
            return parse_functional(args, 4)
                .ok_or_else(|| QrError::Validation(format!("malformed rgba() color '{}'", s)));
        }
        if let Some(args) = functional_args(&lower, "rgb") {
            return parse_functional(args, 3)
                .ok_or_else(|| QrError::Validation(format!("malformed rgb() color '{}'", s)));
        }

        named_color(&lower).ok_or_else(|| QrError::Validation(format!("unknown color '{}'", s)))
    }
}

impl TryFrom<String> for Color {
    type Error = QrError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => {
            let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|n| n * 17);
            Some(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
        }
        // 8 digits carry alpha, which is ignored
        6 | 8 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
        _ => None,
    }
}

/// Returns the comma-separated arguments of `name(...)`.
fn functional_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_functional(args: &str, expected: usize) -> Option<Color> {
    let parts: Vec<f64> = args
        .split(',')
        .map(|p| p.trim().parse::<f64>().ok())
        .collect::<Option<Vec<_>>>()?;
    if parts.len() != expected || parts.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return None;
    }

    let channel = |v: f64| if v <= 255.0 { Some(v.trunc() as u8) } else { None };
    Some(Color::rgb(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?))
}

fn named_color(name: &str) -> Option<Color> {
    let color = match name {
        "black" => Color::rgb(0, 0, 0),
        "white" => Color::rgb(255, 255, 255),
        "red" => Color::rgb(255, 0, 0),
        "green" => Color::rgb(0, 128, 0),
        "lime" => Color::rgb(0, 255, 0),
        "blue" => Color::rgb(0, 0, 255),
        "navy" => Color::rgb(0, 0, 128),
        "yellow" => Color::rgb(255, 255, 0),
        "cyan" | "aqua" => Color::rgb(0, 255, 255),
        "magenta" | "fuchsia" => Color::rgb(255, 0, 255),
        "orange" => Color::rgb(255, 165, 0),
        "purple" => Color::rgb(128, 0, 128),
        "teal" => Color::rgb(0, 128, 128),
        "maroon" => Color::rgb(128, 0, 0),
        "olive" => Color::rgb(128, 128, 0),
        "silver" => Color::rgb(192, 192, 192),
        "gray" | "grey" => Color::rgb(128, 128, 128),
        _ => return None,
    };
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_forms() {
        assert_eq!("#FF5500".parse::<Color>().unwrap(), Color::rgb(255, 85, 0));
        assert_eq!("#f50".parse::<Color>().unwrap(), Color::rgb(255, 85, 0));
        assert_eq!("#11223380".parse::<Color>().unwrap(), Color::rgb(0x11, 0x22, 0x33));
        assert!("#12345".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
    }

    #[test]
    fn test_functional_forms() {
        assert_eq!(
            "rgba(12.7, 34.2, 56, 1)".parse::<Color>().unwrap(),
            Color::rgb(12, 34, 56)
        );
        assert_eq!("rgb(0, 128, 255)".parse::<Color>().unwrap(), Color::rgb(0, 128, 255));
        assert_eq!("RGB( 1,2,3 )".parse::<Color>().unwrap(), Color::rgb(1, 2, 3));
        assert!("rgb(1, 2)".parse::<Color>().is_err());
        assert!("rgba(1, 2, 3)".parse::<Color>().is_err());
        assert!("rgb(300, 0, 0)".parse::<Color>().is_err());
        assert!("rgb(-1, 0, 0)".parse::<Color>().is_err());
    }

    #[test]
    fn test_named_colors() {
        assert_eq!("black".parse::<Color>().unwrap(), Color::BLACK);
        assert_eq!(" White ".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!("grey".parse::<Color>().unwrap(), "gray".parse::<Color>().unwrap());
        assert!("mauve-ish".parse::<Color>().is_err());
        assert!("".parse::<Color>().is_err());
    }

    #[test]
    fn test_parse_param_names_field() {
        let err = Color::parse_param("fill_color", "nope").unwrap_err();
        assert!(err.to_string().contains("fill_color"));
        assert_eq!(err.error_code(), "ValidationError");
    }

    #[test]
    fn test_contrast_ratio() {
        let ratio = Color::BLACK.contrast_ratio(&Color::WHITE);
        assert!((ratio - 21.0).abs() < 0.01);
        assert!((Color::WHITE.contrast_ratio(&Color::WHITE) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&Color::rgb(255, 0, 16)).unwrap();
        assert_eq!(json, "\"#ff0010\"");
        let back: Color = serde_json::from_str("\"navy\"").unwrap();
        assert_eq!(back, Color::rgb(0, 0, 128));
        assert!(serde_json::from_str::<Color>("\"not-a-color\"").is_err());
    }
}
