//! Palette definitions (Base16 and Base24 schemes).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::placeholder::Placeholder;
use super::rgb::RgbColor;

/// Palette convention, which decides the set of required slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteSystem {
    /// 16 slots, `base00..base0F`
    Base16,
    /// 24 slots, `base00..base17`
    Base24,
}

impl PaletteSystem {
    /// Lowercase name used in files and directory names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Base16 => "base16",
            Self::Base24 => "base24",
        }
    }

    /// Both systems, in scan order.
    pub const ALL: [Self; 2] = [Self::Base16, Self::Base24];
}

impl fmt::Display for PaletteSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaletteSystem {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim() {
            "base16" => Ok(Self::Base16),
            "base24" => Ok(Self::Base24),
            other => anyhow::bail!("Unsupported palette system '{other}'. Must be 'base16' or 'base24'"),
        }
    }
}

/// Whether a palette is meant for dark or light desktops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Dark background
    Dark,
    /// Light background
    Light,
    /// Unspecified
    #[default]
    Any,
}

impl Variant {
    /// Lowercase name used in files and CLI flags.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Any => "any",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            "any" | "" => Ok(Self::Any),
            other => anyhow::bail!("Invalid variant '{other}'. Must be 'dark', 'light', or 'any'"),
        }
    }
}

/// A validated, immutable color scheme.
///
/// `entries` holds exactly the slots required by `system`; construction
/// through [`Palette::new`] enforces this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Base16 or Base24
    pub system: PaletteSystem,
    /// Display name
    pub name: String,
    /// Scheme author
    pub author: String,
    /// Dark/light hint
    pub variant: Variant,
    entries: BTreeMap<Placeholder, RgbColor>,
}

impl Palette {
    /// Builds a palette, keeping only the slots `system` requires.
    ///
    /// # Errors
    ///
    /// Returns the list of missing slots if any required slot is absent.
    pub fn new(
        system: PaletteSystem,
        name: impl Into<String>,
        author: impl Into<String>,
        variant: Variant,
        mut entries: BTreeMap<Placeholder, RgbColor>,
    ) -> Result<Self, Vec<Placeholder>> {
        let required = Placeholder::required(system);
        let missing: Vec<Placeholder> = required
            .iter()
            .filter(|slot| !entries.contains_key(slot))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(missing);
        }

        entries.retain(|slot, _| required.contains(slot));

        Ok(Self {
            system,
            name: name.into(),
            author: author.into(),
            variant,
            entries,
        })
    }

    /// Color for a slot, if the palette's system defines it.
    #[must_use]
    pub fn get(&self, slot: Placeholder) -> Option<RgbColor> {
        self.entries.get(&slot).copied()
    }

    /// Entries in required-key order.
    pub fn entries(&self) -> impl Iterator<Item = (Placeholder, RgbColor)> + '_ {
        self.entries.iter().map(|(slot, color)| (*slot, *color))
    }

    /// Number of stored entries (16 or 24).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed palette; provided for symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
