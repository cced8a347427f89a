//! Color literal extraction from SVG text.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::RgbColor;

/// `fill="#..."`, `stroke="#..."`, `fill: #...` and `stroke:#...`.
pub(crate) fn paint_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)\b(?:fill|stroke)(?:\s*=\s*["']|\s*:\s*)(#(?:[0-9a-f]{6}|[0-9a-f]{3}))\b"#)
            .expect("paint regex is valid")
    })
}

/// Six-digit hex literal anywhere in the text. Group 1 captures a
/// preceding `url(` or `href="`, marking a fragment reference.
pub(crate) fn color_literal_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)(url\(\s*|href\s*=\s*["'])?#[0-9a-f]{6}\b"#)
            .expect("color literal regex is valid")
    })
}

/// Collects the fill/stroke colors of a document.
///
/// Results are canonical, deduplicated, and in order of first occurrence.
pub fn extract_colors(doc: &str) -> Vec<RgbColor> {
    let mut colors = Vec::new();
    for caps in paint_regex().captures_iter(doc) {
        if let Ok(color) = RgbColor::from_hex(&caps[1]) {
            if !colors.contains(&color) {
                colors.push(color);
            }
        }
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hexes(doc: &str) -> Vec<String> {
        extract_colors(doc).iter().map(RgbColor::to_hex).collect()
    }

    #[test]
    fn test_attribute_and_style_forms() {
        let doc = r##"<svg><rect fill="#2e3440"/><path style="stroke: #81A1C1; fill:#fff"/></svg>"##;
        assert_eq!(hexes(doc), vec!["#2E3440", "#81A1C1", "#FFFFFF"]);
    }

    #[test]
    fn test_deduplicates_across_spellings() {
        let doc = r##"<rect fill="#ffffff"/><rect FILL="#FFF"/><rect stroke="#FfFfFf"/>"##;
        assert_eq!(hexes(doc), vec!["#FFFFFF"]);
    }

    #[test]
    fn test_ignores_non_paint_attributes() {
        let doc = r##"<stop stop-color="#123456"/><rect fill="url(#grad)"/><a href="#abc"/>"##;
        assert!(hexes(doc).is_empty());
    }

    #[test]
    fn test_rejects_partial_literals() {
        let doc = r##"<rect fill="#12345"/><rect fill="#1234567"/>"##;
        assert!(hexes(doc).is_empty());
    }
}
