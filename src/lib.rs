//! ppr library
//!
//! Palette-driven wallpaper generation: parse Base16/Base24 palettes, bind
//! them into SVG templates, rasterize to PNG at screen resolution, and install
//! the result as the desktop wallpaper. Also converts existing SVGs into
//! templates and builds palettes from swatch SVGs.

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod parser;
pub mod platform;
pub mod services;
