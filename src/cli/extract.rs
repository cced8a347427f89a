//! `ppr extract-colors`: build a palette from a swatch SVG.

use crate::cli::common::{load_session, CliError, CliResult};
use crate::models::PaletteSystem;
use crate::services::palettes::validate_name;
use crate::services::synthesis::synthesize_palette;
use crate::services::PaletteStore;
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Extract a Base16 palette from an SVG of color swatches
#[derive(Debug, Clone, Args)]
pub struct ExtractColorsArgs {
    /// SVG containing 16 labeled or ordered swatches
    #[arg(value_name = "SVG")]
    pub svg: PathBuf,

    /// Name of the palette to create
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Overwrite an existing palette with the same name
    #[arg(long)]
    pub force: bool,
}

impl ExtractColorsArgs {
    /// Execute the extract-colors command
    pub fn execute(&self) -> CliResult<()> {
        validate_name(&self.name)?;
        if !self.svg.is_file() {
            return Err(CliError::validation(format!(
                "SVG file not found: {}",
                self.svg.display()
            )));
        }

        let (config, _) = load_session()?;
        let content = fs::read_to_string(&self.svg)
            .map_err(|e| CliError::io(format!("Failed to read {}: {e}", self.svg.display())))?;

        let palette = synthesize_palette(&content, &self.name)?;

        let mut store = PaletteStore::load(&config.themes_path)
            .map_err(|e| CliError::io(format!("Failed to load palettes: {e:#}")))?;
        let target = store.path_for(PaletteSystem::Base16, &self.name)?;
        if (target.exists() || store.contains(&self.name)) && !self.force {
            return Err(CliError::validation(format!(
                "Palette '{}' already exists (use --force to overwrite)",
                self.name
            )));
        }

        let path = store.save(palette.clone())?;

        println!("✓ Palette '{}' created: {}", self.name, path.display());
        println!();
        println!("Extracted colors:");
        for (slot, color) in palette.entries() {
            println!("  {slot}: {color}");
        }
        Ok(())
    }
}
