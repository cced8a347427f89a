//! Data models for palettes, placeholders, and colors.
//!
//! Models are independent of the filesystem and of the CLI; parsing and
//! persistence live in `parser` and `services`.

pub mod palette;
pub mod placeholder;
pub mod rgb;

pub use palette::{Palette, PaletteSystem, Variant};
pub use placeholder::Placeholder;
pub use rgb::RgbColor;
