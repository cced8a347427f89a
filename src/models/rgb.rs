//! RGB color handling with hex parsing and canonical formatting.

// Allow small types passed by reference for API consistency
#![allow(clippy::trivially_copy_pass_by_ref)]

use anyhow::{Context, Result};
use std::fmt;
use std::str::FromStr;

/// RGB color value with hex string representation.
///
/// Palette entries, template substitutions, and reverse-mapping lookups all
/// go through this type, so two spellings of the same color (`#abc`,
/// `#AABBCC`, `aabbcc`) compare equal once parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RgbColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl RgbColor {
    /// Creates a new `RgbColor` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses an `RgbColor` from a hex string.
    ///
    /// Supports "#RRGGBB", "RRGGBB" and the shorthand "#RGB"/"RGB", in any
    /// letter case. Shorthand digits are doubled (`#8af` is `#88AAFF`).
    ///
    /// # Examples
    ///
    /// ```
    /// use ppr::models::RgbColor;
    ///
    /// let color = RgbColor::from_hex("#81a1c1").unwrap();
    /// assert_eq!(color, RgbColor::new(0x81, 0xA1, 0xC1));
    ///
    /// let color = RgbColor::from_hex("#222").unwrap();
    /// assert_eq!(color, RgbColor::new(0x22, 0x22, 0x22));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color format.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let trimmed = hex.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!("Invalid hex color '{hex}'. Expected #RRGGBB or #RGB");
        }

        let expanded = match digits.len() {
            6 => digits.to_string(),
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            _ => anyhow::bail!("Invalid hex color '{hex}'. Expected 6 or 3 hex digits"),
        };

        let r = u8::from_str_radix(&expanded[0..2], 16)
            .context(format!("Invalid red channel in hex color '{hex}'"))?;
        let g = u8::from_str_radix(&expanded[2..4], 16)
            .context(format!("Invalid green channel in hex color '{hex}'"))?;
        let b = u8::from_str_radix(&expanded[4..6], 16)
            .context(format!("Invalid blue channel in hex color '{hex}'"))?;

        Ok(Self::new(r, g, b))
    }

    /// Converts the color to a hex string in the format "#RRGGBB" (uppercase).
    ///
    /// # Examples
    ///
    /// ```
    /// use ppr::models::RgbColor;
    ///
    /// assert_eq!(RgbColor::new(46, 52, 64).to_hex(), "#2E3440");
    /// ```
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Returns the color as an opaque RGBA pixel.
    #[must_use]
    pub const fn to_rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl FromStr for RgbColor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_valid() {
        assert_eq!(
            RgbColor::from_hex("#FF0000").unwrap(),
            RgbColor::new(255, 0, 0)
        );
        assert_eq!(
            RgbColor::from_hex("00ff00").unwrap(),
            RgbColor::new(0, 255, 0)
        );
        assert_eq!(
            RgbColor::from_hex("  #0000Ff ").unwrap(),
            RgbColor::new(0, 0, 255)
        );
    }

    #[test]
    fn test_from_hex_shorthand() {
        assert_eq!(
            RgbColor::from_hex("#8af").unwrap(),
            RgbColor::new(0x88, 0xAA, 0xFF)
        );
        assert_eq!(RgbColor::from_hex("fff").unwrap(), RgbColor::new(255, 255, 255));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(RgbColor::from_hex("#FF00").is_err());
        assert!(RgbColor::from_hex("#GG0000").is_err());
        assert!(RgbColor::from_hex("").is_err());
        assert!(RgbColor::from_hex("#FF00000").is_err());
        assert!(RgbColor::from_hex("#+1+2+3").is_err());
    }

    #[test]
    fn test_to_hex_uppercase() {
        assert_eq!(RgbColor::new(0x81, 0xa1, 0xc1).to_hex(), "#81A1C1");
        assert_eq!(RgbColor::new(0, 0, 0).to_hex(), "#000000");
    }

    #[test]
    fn test_display_matches_to_hex() {
        let color = RgbColor::new(0x2E, 0x34, 0x40);
        assert_eq!(color.to_string(), color.to_hex());
    }

    #[test]
    fn test_from_str() {
        let color: RgbColor = "#ECEFF4".parse().unwrap();
        assert_eq!(color, RgbColor::new(0xEC, 0xEF, 0xF4));
    }
}
