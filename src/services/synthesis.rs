//! Palette synthesis from swatch SVGs.
//!
//! Three layouts are understood, tried in this order:
//!
//! - **Labeled**: each `<g>` holds a filled shape and a `<text>` label such
//!   as `base0D`. Fills may come from a `fill` attribute, an inline
//!   `style`, or a class rule in `<defs><style>`.
//! - **Printed**: the sheet's text spells out `base0D #81A1C1` for every
//!   slot.
//! - **Ordered swatches**: exactly sixteen distinct fill/stroke colors,
//!   assigned to `base00..base0F` in document order.
//!
//! A layout is used only when it yields all sixteen slots.

use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use crate::error::PprError;
use crate::models::{Palette, PaletteSystem, Placeholder, RgbColor, Variant};
use crate::parser::extract_colors;

const SHAPES: [&str; 5] = ["rect", "circle", "ellipse", "path", "polygon"];

/// Author recorded on synthesized palettes.
pub const EXTRACTED_AUTHOR: &str = "extracted";

fn label_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bbase0[0-9a-f]\b").expect("label regex is valid"))
}

fn class_rule_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\.([A-Za-z_][\w-]*)\s*\{([^}]*)\}").expect("class rule regex is valid")
    })
}

fn fill_decl_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(?:^|;)\s*fill\s*:\s*([^;]+)").expect("fill regex is valid"))
}

fn printed_pair_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(base0[0-9a-f])\b[^#]*(#[0-9a-f]{6})\b")
            .expect("printed pair regex is valid")
    })
}

/// Builds a base16 palette from a swatch document.
pub fn synthesize_palette(doc: &str, name: &str) -> Result<Palette, PprError> {
    let labeled = labeled_colors(doc);
    let printed = if labeled.len() == 16 {
        BTreeMap::new()
    } else {
        printed_colors(doc)
    };
    let entries = if labeled.len() == 16 {
        tracing::debug!("using labeled swatches");
        labeled
    } else if printed.len() == 16 {
        tracing::debug!("using hex values printed next to labels");
        printed
    } else {
        if !labeled.is_empty() || !printed.is_empty() {
            tracing::debug!(
                "only {} labeled and {} printed swatches, falling back to document order",
                labeled.len(),
                printed.len()
            );
        }
        let colors = extract_colors(doc);
        if colors.len() != 16 {
            return Err(PprError::Synthesis {
                found: colors.iter().map(RgbColor::to_hex).collect(),
            });
        }
        Placeholder::ALL[..16].iter().copied().zip(colors).collect()
    };

    Palette::new(
        PaletteSystem::Base16,
        name,
        EXTRACTED_AUTHOR,
        Variant::Dark,
        entries,
    )
    .map_err(|_| PprError::Synthesis { found: Vec::new() })
}

/// Label to color pairs from `<g>` groups. Returns an empty map when the
/// document is not well-formed XML.
fn labeled_colors(doc: &str) -> BTreeMap<Placeholder, RgbColor> {
    let mut result = BTreeMap::new();
    let Ok(tree) = roxmltree::Document::parse(doc) else {
        tracing::debug!("swatch document is not well-formed XML, skipping labeled mode");
        return result;
    };

    let classes = class_fills(&tree);

    for group in tree.descendants().filter(|n| n.has_tag_name("g")) {
        let Some(slot) = group_label(group) else {
            continue;
        };
        let Some(color) = group_fill(group, &classes) else {
            continue;
        };
        result.entry(slot).or_insert(color);
    }

    result
}

/// Label to color pairs printed in the document's text, e.g.
/// `<text>base0D</text><text>#81A1C1</text>`. Later pairs overwrite
/// earlier ones.
fn printed_colors(doc: &str) -> BTreeMap<Placeholder, RgbColor> {
    let mut result = BTreeMap::new();
    let Ok(tree) = roxmltree::Document::parse(doc) else {
        return result;
    };

    let text = tree
        .descendants()
        .filter(|n| n.is_text() && n.ancestors().any(|a| a.has_tag_name("text")))
        .filter_map(|n| n.text())
        .collect::<Vec<_>>()
        .join("\n");

    for caps in printed_pair_regex().captures_iter(&text) {
        let slot = Placeholder::parse(&caps[1].to_ascii_lowercase());
        let color = RgbColor::from_hex(&caps[2]).ok();
        if let (Some(slot), Some(color)) = (slot, color) {
            result.insert(slot, color);
        }
    }
    result
}

fn group_label(group: roxmltree::Node<'_, '_>) -> Option<Placeholder> {
    group
        .children()
        .filter(|n| n.has_tag_name("text"))
        .flat_map(|text| text.descendants().filter(roxmltree::Node::is_text))
        .filter_map(|n| n.text())
        .find_map(|content| label_regex().find(content))
        .and_then(|m| Placeholder::parse(&m.as_str().to_ascii_lowercase()))
}

fn group_fill(
    group: roxmltree::Node<'_, '_>,
    classes: &HashMap<String, String>,
) -> Option<RgbColor> {
    group
        .children()
        .filter(|n| SHAPES.iter().any(|shape| n.has_tag_name(*shape)))
        .find_map(|shape| {
            let inline = shape
                .attribute("fill")
                .map(str::to_string)
                .or_else(|| shape.attribute("style").and_then(style_fill));
            let from_class = || {
                shape.attribute("class").and_then(|names| {
                    names
                        .split_whitespace()
                        .find_map(|class| classes.get(class).cloned())
                })
            };
            inline
                .filter(|value| usable_fill(value))
                .or_else(|| from_class().filter(|value| usable_fill(value)))
                .and_then(|value| RgbColor::from_hex(&value).ok())
        })
}

/// `#222` marks label backgrounds in swatch sheets.
fn usable_fill(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty()
        && !value.eq_ignore_ascii_case("none")
        && !value.eq_ignore_ascii_case("#222")
        && !value.contains("url(")
}

fn style_fill(style: &str) -> Option<String> {
    fill_decl_regex()
        .captures(style)
        .map(|caps| caps[1].trim().to_string())
}

/// Class name to fill value from every `<style>` element.
fn class_fills(tree: &roxmltree::Document<'_>) -> HashMap<String, String> {
    let mut classes = HashMap::new();
    for style in tree.descendants().filter(|n| n.has_tag_name("style")) {
        let css: String = style
            .descendants()
            .filter_map(|n| n.text())
            .collect::<Vec<_>>()
            .join("");
        for rule in class_rule_regex().captures_iter(&css) {
            if let Some(fill) = style_fill(rule[2].trim()) {
                classes.entry(rule[1].to_string()).or_insert(fill);
            }
        }
    }
    classes
}
