//! Reverse color mapping: turn a plain SVG into a reusable template.
//!
//! Colors found in the document are mapped to palette slots (from a named
//! palette, explicit pairs, or interactive prompts) and rewritten as
//! `{{baseXX}}` tokens.

use anyhow::{Context, Result};
use regex::Captures;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use crate::error::PprError;
use crate::models::{Palette, PaletteSystem, Placeholder, RgbColor};
use crate::parser::svg_colors::{color_literal_regex, extract_colors, paint_regex};

/// How document colors are matched to slots.
pub enum MappingStrategy<'a> {
    /// Exact color matches against a palette's entries
    ByPalette(&'a Palette),
    /// User-supplied `color -> slot` pairs
    Explicit(BTreeMap<RgbColor, Placeholder>),
    /// Ask for each color on `output`, read answers from `input`
    Interactive {
        /// Answer source
        input: &'a mut dyn BufRead,
        /// Prompt sink
        output: &'a mut dyn Write,
    },
}

/// Result of mapping a document's colors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorMapping {
    /// Mapped colors, in document order
    pub mapped: Vec<(RgbColor, Placeholder)>,
    /// Colors left as literals, in document order
    pub unmapped: Vec<RgbColor>,
}

impl ColorMapping {
    /// Slot a color maps to, if any.
    pub fn get(&self, color: RgbColor) -> Option<Placeholder> {
        self.mapped
            .iter()
            .find(|(c, _)| *c == color)
            .map(|(_, slot)| *slot)
    }

    /// True when no color was mapped.
    pub fn is_empty(&self) -> bool {
        self.mapped.is_empty()
    }

    fn push(&mut self, color: RgbColor, slot: Option<Placeholder>) {
        match slot {
            Some(slot) => self.mapped.push((color, slot)),
            None => self.unmapped.push(color),
        }
    }
}

/// Maps the colors of `doc` using `strategy`.
pub fn map_to_palette(doc: &str, strategy: MappingStrategy<'_>) -> Result<ColorMapping> {
    let colors = extract_colors(doc);
    match strategy {
        MappingStrategy::ByPalette(palette) => Ok(map_by_palette(&colors, palette)),
        MappingStrategy::Explicit(pairs) => Ok(map_explicit(&colors, &pairs)),
        MappingStrategy::Interactive { input, output } => map_interactive(&colors, input, output),
    }
}

/// Reverse index from palette values to slots.
///
/// Built in required-key order so the lowest slot wins when a palette
/// repeats a color.
pub fn reverse_index(palette: &Palette) -> BTreeMap<RgbColor, Placeholder> {
    let mut index = BTreeMap::new();
    for (slot, color) in palette.entries() {
        index.entry(color).or_insert(slot);
    }
    index
}

fn map_by_palette(colors: &[RgbColor], palette: &Palette) -> ColorMapping {
    let index = reverse_index(palette);
    let mut mapping = ColorMapping::default();
    for color in colors {
        mapping.push(*color, index.get(color).copied());
    }
    mapping
}

fn map_explicit(colors: &[RgbColor], pairs: &BTreeMap<RgbColor, Placeholder>) -> ColorMapping {
    let mut mapping = ColorMapping::default();
    for color in colors {
        mapping.push(*color, pairs.get(color).copied());
    }
    // Pairs for colors the extractor did not see still apply on rewrite.
    for (color, slot) in pairs {
        if !colors.contains(color) {
            mapping.mapped.push((*color, *slot));
        }
    }
    mapping
}

/// Parses `color=placeholder` pairs (e.g. `#81a1c1=base0D`).
///
/// Placeholders must be base16 slots.
pub fn parse_explicit_pairs(pairs: &[String]) -> Result<BTreeMap<RgbColor, Placeholder>, PprError> {
    let base16 = Placeholder::required(PaletteSystem::Base16);
    let mut map = BTreeMap::new();

    for pair in pairs {
        let (color, key) = pair
            .split_once('=')
            .ok_or_else(|| PprError::InvalidMapping(pair.clone()))?;
        let color =
            RgbColor::from_hex(color).map_err(|_| PprError::InvalidMapping(pair.clone()))?;
        let slot = Placeholder::parse(key)
            .filter(|slot| base16.contains(slot))
            .ok_or_else(|| PprError::InvalidMapping(pair.clone()))?;
        map.insert(color, slot);
    }

    Ok(map)
}

fn map_interactive(
    colors: &[RgbColor],
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<ColorMapping> {
    let base16 = Placeholder::required(PaletteSystem::Base16);
    let available: Vec<&str> = base16.iter().map(|slot| slot.as_str()).collect();
    let mut mapping = ColorMapping::default();

    writeln!(output, "Base16 color meanings:").context("Failed to write prompt")?;
    for slot in base16 {
        writeln!(output, "  {}: {}", slot, slot.role()).context("Failed to write prompt")?;
    }
    writeln!(output).context("Failed to write prompt")?;

    let mut exhausted = false;
    for color in colors {
        if exhausted {
            mapping.unmapped.push(*color);
            continue;
        }

        write!(
            output,
            "Map color {} to which Base16 placeholder? (Available: {}, or 'skip'): ",
            color,
            available.join(", ")
        )
        .context("Failed to write prompt")?;
        output.flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .context("Failed to read mapping answer")?;
        if read == 0 {
            exhausted = true;
            mapping.unmapped.push(*color);
            continue;
        }

        let answer = line.trim();
        if answer.is_empty() || answer.eq_ignore_ascii_case("skip") {
            mapping.unmapped.push(*color);
            continue;
        }

        match Placeholder::parse(answer).filter(|slot| base16.contains(slot)) {
            Some(slot) => mapping.mapped.push((*color, slot)),
            None => {
                writeln!(output, "Invalid placeholder '{answer}', skipping...")
                    .context("Failed to write prompt")?;
                mapping.unmapped.push(*color);
            }
        }
    }

    Ok(mapping)
}

/// Replaces mapped color literals with their `{{baseXX}}` tokens.
///
/// Fill and stroke values are rewritten in any spelling, shorthand
/// included. Elsewhere only six-digit literals are rewritten, and never
/// inside `url(#…)` or `href="#…"` fragment references.
pub fn rewrite(doc: &str, mapping: &ColorMapping) -> String {
    let lookup: BTreeMap<RgbColor, Placeholder> = mapping.mapped.iter().copied().collect();
    let token_for = |literal: &str| {
        RgbColor::from_hex(literal)
            .ok()
            .and_then(|color| lookup.get(&color))
            .map(|slot| slot.token())
    };

    let painted = paint_regex().replace_all(doc, |caps: &Captures<'_>| {
        let (Some(whole), Some(literal)) = (caps.get(0), caps.get(1)) else {
            return caps[0].to_string();
        };
        match token_for(literal.as_str()) {
            Some(token) => {
                let prefix = &whole.as_str()[..literal.start() - whole.start()];
                format!("{prefix}{token}")
            }
            None => whole.as_str().to_string(),
        }
    });

    color_literal_regex()
        .replace_all(&painted, |caps: &Captures<'_>| {
            if caps.get(1).is_some() {
                return caps[0].to_string();
            }
            token_for(&caps[0]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
