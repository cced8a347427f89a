//! `ppr set-wallpaper`: install an existing image.

use crate::cli::common::{CliError, CliResult};
use crate::platform::{CommandWallpaperSetter, WallpaperSetter};
use clap::Args;
use std::path::PathBuf;

/// Set an image file as the desktop wallpaper
#[derive(Debug, Clone, Args)]
pub struct SetWallpaperArgs {
    /// Image to install
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,
}

impl SetWallpaperArgs {
    /// Execute the set-wallpaper command
    pub fn execute(&self) -> CliResult<()> {
        if !self.image.is_file() {
            return Err(CliError::validation(format!(
                "Image not found: {}",
                self.image.display()
            )));
        }
        let absolute = std::fs::canonicalize(&self.image)
            .map_err(|e| CliError::io(format!("Failed to resolve {}: {e}", self.image.display())))?;

        CommandWallpaperSetter
            .set_wallpaper(&absolute)
            .map_err(|e| CliError::io(format!("{e:#}")))?;

        println!("✓ Wallpaper set: {}", absolute.display());
        Ok(())
    }
}
