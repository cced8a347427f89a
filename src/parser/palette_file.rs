//! Palette YAML parsing and canonical serialization.
//!
//! Palette files look like:
//!
//! ```yaml
//! system: "base16"
//! name: "Nord"
//! author: "arcticicestudio"
//! variant: "dark"
//! palette:
//!   base00: "#2E3440"
//!   base01: "#3B4252"
//! ```
//!
//! Parsing is strict about the schema (system, required keys, color values)
//! and lenient about extras: unknown keys are reported and dropped.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::PprError;
use crate::models::{Palette, PaletteSystem, Placeholder, RgbColor, Variant};

/// On-disk shape of a palette file before validation.
#[derive(Debug, Deserialize)]
struct RawPalette {
    system: Option<String>,
    name: Option<String>,
    author: Option<String>,
    variant: Option<String>,
    #[serde(default)]
    palette: BTreeMap<String, String>,
}

/// Reads and validates a palette file.
///
/// A missing `name` falls back to the file stem.
pub fn parse_palette_file(path: &Path) -> Result<Palette> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read palette file: {}", path.display()))?;
    parse_palette_str(&content, path)
}

/// Parses and validates palette YAML. `path` is used for the fallback name
/// and for error messages.
pub fn parse_palette_str(content: &str, path: &Path) -> Result<Palette> {
    let malformed = |reason: String| PprError::MalformedPalette {
        path: path.to_path_buf(),
        reason,
    };

    let raw: RawPalette =
        serde_yml::from_str(content).map_err(|e| malformed(format!("invalid YAML: {e}")))?;

    let system: PaletteSystem = raw
        .system
        .as_deref()
        .ok_or_else(|| malformed("missing 'system' field".to_string()))?
        .parse()
        .map_err(|e: anyhow::Error| malformed(e.to_string()))?;

    let variant: Variant = raw
        .variant
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|e: anyhow::Error| malformed(e.to_string()))?;

    let required = Placeholder::required(system);
    let mut entries = BTreeMap::new();

    for (key, value) in &raw.palette {
        let Some(slot) = Placeholder::parse(key) else {
            tracing::warn!("{}: ignoring unknown palette key '{}'", path.display(), key);
            continue;
        };
        if !required.contains(&slot) {
            tracing::warn!(
                "{}: ignoring key '{}', not part of {}",
                path.display(),
                key,
                system
            );
            continue;
        }
        let color = RgbColor::from_hex(value)
            .map_err(|e| malformed(format!("bad value for {key}: {e}")))?;
        entries.insert(slot, color);
    }

    let name = raw.name.filter(|n| !n.trim().is_empty()).unwrap_or_else(|| {
        path.file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    });

    Palette::new(system, name, raw.author.unwrap_or_default(), variant, entries).map_err(
        |missing| {
            let keys: Vec<&str> = missing.iter().map(|slot| slot.as_str()).collect();
            malformed(format!("missing required keys: {}", keys.join(", "))).into()
        },
    )
}

/// Renders a palette in canonical form.
///
/// Every scalar is double-quoted and entries follow required-key order, so
/// the output is stable across saves.
pub fn generate_palette_yaml(palette: &Palette) -> String {
    let mut output = String::new();
    output.push_str(&format!("system: {}\n", quote(palette.system.as_str())));
    output.push_str(&format!("name: {}\n", quote(&palette.name)));
    output.push_str(&format!("author: {}\n", quote(&palette.author)));
    output.push_str(&format!("variant: {}\n", quote(palette.variant.as_str())));
    output.push_str("palette:\n");
    for (slot, color) in palette.entries() {
        output.push_str(&format!("  {}: {}\n", slot.as_str(), quote(&color.to_hex())));
    }
    output
}

/// Writes a palette file atomically, creating parent directories.
pub fn save_palette_file(palette: &Palette, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    atomic_write(path, &generate_palette_yaml(palette))
}

/// A JSON string literal is also a valid double-quoted YAML scalar.
fn quote(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{value}\""))
}

fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("yaml.tmp");

    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write to temporary file: {}", temp_path.display()))?;

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temporary file to: {}", path.display()))?;

    Ok(())
}
