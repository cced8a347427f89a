//! Parsing and serialization for palette files and SVG color literals.

pub mod palette_file;
pub mod svg_colors;

pub use palette_file::{generate_palette_yaml, parse_palette_file, save_palette_file};
pub use svg_colors::extract_colors;
