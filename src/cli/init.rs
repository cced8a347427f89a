//! `ppr init`: write the default configuration and create directories.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::constants::{APP_BINARY_NAME, APP_NAME};
use clap::Args;

/// Initialize configuration and directories
#[derive(Debug, Clone, Args)]
pub struct InitArgs {
    /// Overwrite an existing configuration
    #[arg(short, long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> CliResult<()> {
        let config_path = Config::config_file_path()
            .map_err(|e| CliError::io(format!("Failed to locate configuration: {e:#}")))?;

        if config_path.exists() && !self.force {
            return Err(CliError::validation(format!(
                "Configuration already exists at {} (use --force to overwrite)",
                config_path.display()
            )));
        }

        let config = Config::new();
        config
            .save_to(&config_path)
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;
        config
            .ensure_directories()
            .map_err(|e| CliError::io(format!("Failed to create directories: {e:#}")))?;

        println!("✓ {APP_NAME} configuration initialized: {}", config_path.display());
        println!("  Themes directory:    {}", config.themes_path.display());
        println!("  Templates directory: {}", config.templates_path.display());
        println!("  Output directory:    {}", config.output_path.display());
        println!();
        println!("Next steps:");
        println!(
            "  1. Add Base16/Base24 palettes under {}/base16 or {}/base24",
            config.themes_path.display(),
            config.themes_path.display()
        );
        println!(
            "  2. Add SVG templates using {{{{base00}}}}..{{{{base0F}}}} placeholders to {}",
            config.templates_path.display()
        );
        println!("  3. Run: {APP_BINARY_NAME} generate --theme <name>");

        Ok(())
    }
}
