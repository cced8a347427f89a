//! Template binding: `{{baseXX}}` placeholder substitution.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use crate::error::PprError;
use crate::models::{Palette, Placeholder};

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{\{base([0-9A-Fa-f]{2})\}\}").expect("placeholder regex is valid")
    })
}

/// Canonical key (`base` + uppercase digits) for a raw token's digits.
fn canonical_key(digits: &str) -> String {
    format!("base{}", digits.to_ascii_uppercase())
}

/// Substitutes every placeholder the palette defines.
///
/// Substitution is a single pass over the input, so replacement text is
/// never re-scanned. Fails with `UnresolvedPlaceholder` when tokens remain
/// and with `MalformedTemplate` when the result is not an SVG document.
pub fn bind(template: &str, palette: &Palette) -> Result<String, PprError> {
    let bound = token_regex().replace_all(template, |caps: &Captures<'_>| {
        Placeholder::from_hex_digits(&caps[1])
            .and_then(|slot| palette.get(slot))
            .map_or_else(|| caps[0].to_string(), |color| color.to_hex())
    });

    let unresolved = unresolved_keys(&bound);
    if !unresolved.is_empty() {
        return Err(PprError::UnresolvedPlaceholder(unresolved));
    }

    if !bound.contains("<svg") {
        return Err(PprError::MalformedTemplate(
            "bound document contains no <svg> element".to_string(),
        ));
    }

    Ok(bound.into_owned())
}

/// Keys of the `{{baseXX}}` tokens in a document, deduplicated, in order
/// of first occurrence.
pub fn unresolved_keys(doc: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for caps in token_regex().captures_iter(doc) {
        let key = canonical_key(&caps[1]);
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

/// Distinct known placeholders a template uses, in slot order.
pub fn placeholders(template: &str) -> Vec<Placeholder> {
    let mut slots: Vec<Placeholder> = token_regex()
        .captures_iter(template)
        .filter_map(|caps| Placeholder::from_hex_digits(&caps[1]))
        .collect();
    slots.sort();
    slots.dedup();
    slots
}

/// Whether every placeholder in `template` is defined by `palette`.
pub fn is_bindable(template: &str, palette: &Palette) -> bool {
    token_regex().captures_iter(template).all(|caps| {
        Placeholder::from_hex_digits(&caps[1]).is_some_and(|slot| palette.get(slot).is_some())
    })
}
