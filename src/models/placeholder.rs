//! Palette slot identifiers (`base00` .. `base17`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::palette::PaletteSystem;

/// One named color slot of a Base16/Base24 palette.
///
/// The textual key is `base` plus two uppercase hex digits. `Base00..Base0F`
/// belong to both systems; `Base10..Base17` only to base24.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Placeholder {
    Base00,
    Base01,
    Base02,
    Base03,
    Base04,
    Base05,
    Base06,
    Base07,
    Base08,
    Base09,
    Base0A,
    Base0B,
    Base0C,
    Base0D,
    Base0E,
    Base0F,
    Base10,
    Base11,
    Base12,
    Base13,
    Base14,
    Base15,
    Base16,
    Base17,
}

impl Placeholder {
    /// Every slot in required-key order.
    pub const ALL: [Self; 24] = [
        Self::Base00,
        Self::Base01,
        Self::Base02,
        Self::Base03,
        Self::Base04,
        Self::Base05,
        Self::Base06,
        Self::Base07,
        Self::Base08,
        Self::Base09,
        Self::Base0A,
        Self::Base0B,
        Self::Base0C,
        Self::Base0D,
        Self::Base0E,
        Self::Base0F,
        Self::Base10,
        Self::Base11,
        Self::Base12,
        Self::Base13,
        Self::Base14,
        Self::Base15,
        Self::Base16,
        Self::Base17,
    ];

    /// Slots a palette of `system` must define, in canonical order.
    #[must_use]
    pub fn required(system: PaletteSystem) -> &'static [Self] {
        match system {
            PaletteSystem::Base16 => &Self::ALL[..16],
            PaletteSystem::Base24 => &Self::ALL[..],
        }
    }

    /// Position of the slot (0 for base00, 0x17 for base17).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Canonical textual key, e.g. `base0A`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Base00 => "base00",
            Self::Base01 => "base01",
            Self::Base02 => "base02",
            Self::Base03 => "base03",
            Self::Base04 => "base04",
            Self::Base05 => "base05",
            Self::Base06 => "base06",
            Self::Base07 => "base07",
            Self::Base08 => "base08",
            Self::Base09 => "base09",
            Self::Base0A => "base0A",
            Self::Base0B => "base0B",
            Self::Base0C => "base0C",
            Self::Base0D => "base0D",
            Self::Base0E => "base0E",
            Self::Base0F => "base0F",
            Self::Base10 => "base10",
            Self::Base11 => "base11",
            Self::Base12 => "base12",
            Self::Base13 => "base13",
            Self::Base14 => "base14",
            Self::Base15 => "base15",
            Self::Base16 => "base16",
            Self::Base17 => "base17",
        }
    }

    /// Looks up a slot from the two hex digits after `base` (any case).
    ///
    /// Returns `None` for digits outside `00..=17`.
    #[must_use]
    pub fn from_hex_digits(digits: &str) -> Option<Self> {
        if digits.len() != 2 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let value = u8::from_str_radix(digits, 16).ok()?;
        Self::ALL.get(usize::from(value)).copied()
    }

    /// Parses a key such as `base0d` or `base0D`.
    ///
    /// The `base` prefix must be lowercase; the digits are case-insensitive.
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        key.trim()
            .strip_prefix("base")
            .and_then(Self::from_hex_digits)
    }

    /// Conventional role of the slot in Base16 schemes.
    #[must_use]
    pub const fn role(self) -> &'static str {
        match self {
            Self::Base00 => "Default Background",
            Self::Base01 => "Lighter Background (status bars)",
            Self::Base02 => "Selection Background",
            Self::Base03 => "Comments, Invisibles, Line Highlighting",
            Self::Base04 => "Dark Foreground (status bars)",
            Self::Base05 => "Default Foreground, Caret, Delimiters",
            Self::Base06 => "Light Foreground",
            Self::Base07 => "Light Background",
            Self::Base08 => "Red (variables, tags, diff deleted)",
            Self::Base09 => "Orange (integers, constants)",
            Self::Base0A => "Yellow (classes, search highlight)",
            Self::Base0B => "Green (strings, diff inserted)",
            Self::Base0C => "Cyan (support, regex, escapes)",
            Self::Base0D => "Blue (functions, headings)",
            Self::Base0E => "Magenta (keywords, storage)",
            Self::Base0F => "Brown (deprecated, embedded tags)",
            Self::Base10 => "Darker Background",
            Self::Base11 => "Darkest Background",
            Self::Base12 => "Bright Red",
            Self::Base13 => "Bright Yellow",
            Self::Base14 => "Bright Green",
            Self::Base15 => "Bright Cyan",
            Self::Base16 => "Bright Blue",
            Self::Base17 => "Bright Magenta",
        }
    }

    /// The `{{baseXX}}` token for this slot.
    #[must_use]
    pub fn token(self) -> String {
        format!("{{{{{}}}}}", self.as_str())
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Placeholder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Self::parse(s).ok_or_else(|| anyhow::anyhow!("Unknown placeholder '{s}'"))
    }
}

impl Serialize for Placeholder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Placeholder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Self::parse(&key).ok_or_else(|| serde::de::Error::custom(format!("unknown key '{key}'")))
    }
}
