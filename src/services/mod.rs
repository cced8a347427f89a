//! Service layer: the palette pipeline and the flows built on it.

pub mod binder;
pub mod orchestrator;
pub mod output;
pub mod palettes;
pub mod rasterizer;
pub mod reverse_map;
pub mod synthesis;
pub mod templates;

pub use orchestrator::{Orchestrator, Outcome, RenderOptions};
pub use palettes::{PaletteStore, StoredPalette};
