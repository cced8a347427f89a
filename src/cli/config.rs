//! Configuration management CLI commands.

use crate::cli::common::{load_session, CliError, CliResult};
use crate::config::{expand_tilde, Config};
use crate::constants::ALL_TEMPLATES;
use crate::platform::Resolution;
use crate::services::PaletteStore;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug, Clone)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug, Clone)]
pub struct ConfigSetArgs {
    /// Palette root (containing base16/ and base24/)
    #[arg(long, value_name = "DIR")]
    themes_path: Option<PathBuf>,

    /// Template root
    #[arg(long, value_name = "DIR")]
    templates_path: Option<PathBuf>,

    /// Root of generated images
    #[arg(long, value_name = "DIR")]
    output_path: Option<PathBuf>,

    /// Palette used when none is given
    #[arg(long, value_name = "THEME")]
    default_theme: Option<String>,

    /// Template used when none is given
    #[arg(long, value_name = "TEMPLATE")]
    default_template: Option<String>,

    /// Fallback resolution, e.g. 2560x1440
    #[arg(long, value_name = "WxH")]
    default_resolution: Option<Resolution>,

    /// Install every generated image as the wallpaper
    #[arg(long, value_name = "BOOL")]
    auto_set_wallpaper: Option<bool>,

    /// Templates visited by cycle, comma-separated ("all" for every template)
    #[arg(long, value_name = "LIST", value_delimiter = ',')]
    preferred_templates: Option<Vec<String>>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    config_file: String,
    themes_path: String,
    templates_path: String,
    output_path: String,
    default_theme: String,
    default_template: String,
    default_resolution: String,
    auto_set_wallpaper: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_output_path: Option<String>,
    preferred_templates: Vec<String>,
}

impl ConfigOutput {
    fn new(config: &Config, config_file: &std::path::Path) -> Self {
        Self {
            config_file: config_file.to_string_lossy().to_string(),
            themes_path: config.themes_path.to_string_lossy().to_string(),
            templates_path: config.templates_path.to_string_lossy().to_string(),
            output_path: config.output_path.to_string_lossy().to_string(),
            default_theme: config.default_theme.clone(),
            default_template: config.default_template.clone(),
            default_resolution: format!("{}x{}", config.default_width, config.default_height),
            auto_set_wallpaper: config.auto_set_wallpaper,
            current_theme: config.current_theme.clone(),
            current_template: config.current_template.clone(),
            last_output_path: config
                .last_output_path
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            preferred_templates: config.preferred_templates.clone(),
        }
    }
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let (config, path) = load_session()?;
        let output = ConfigOutput::new(&config, &path);

        if self.json {
            let json = serde_json::to_string_pretty(&output).map_err(|e| {
                CliError::io(format!("Failed to serialize configuration to JSON: {e}"))
            })?;
            println!("{json}");
        } else {
            output_human_readable(&output);
        }
        Ok(())
    }
}

impl ConfigSetArgs {
    fn is_empty(&self) -> bool {
        self.themes_path.is_none()
            && self.templates_path.is_none()
            && self.output_path.is_none()
            && self.default_theme.is_none()
            && self.default_template.is_none()
            && self.default_resolution.is_none()
            && self.auto_set_wallpaper.is_none()
            && self.preferred_templates.is_none()
    }

    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.is_empty() {
            return Err(CliError::validation(
                "At least one configuration option must be specified (see `ppr config set --help`)",
            ));
        }

        let (mut config, path) = load_session()?;

        if let Some(dir) = &self.themes_path {
            config.themes_path = expand_tilde(dir);
        }
        if let Some(dir) = &self.templates_path {
            config.templates_path = expand_tilde(dir);
        }
        if let Some(dir) = &self.output_path {
            config.output_path = expand_tilde(dir);
        }

        if let Some(theme) = &self.default_theme {
            let store = PaletteStore::load(&config.themes_path)
                .map_err(|e| CliError::io(format!("Failed to load palettes: {e:#}")))?;
            store.get(theme)?;
            config.default_theme.clone_from(theme);
        }
        if let Some(template) = &self.default_template {
            config.default_template.clone_from(template);
        }
        if let Some(resolution) = self.default_resolution {
            config.default_width = resolution.width;
            config.default_height = resolution.height;
        }
        if let Some(enabled) = self.auto_set_wallpaper {
            config.auto_set_wallpaper = enabled;
        }
        if let Some(list) = &self.preferred_templates {
            let list: Vec<String> = list
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            config.preferred_templates = if list.is_empty() {
                vec![ALL_TEMPLATES.to_string()]
            } else {
                list
            };
        }

        config
            .save_to(&path)
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated: {}", path.display());
        Ok(())
    }
}

fn output_human_readable(output: &ConfigOutput) {
    println!("ppr Configuration");
    println!("=================");
    println!();
    println!("File: {}", output.config_file);
    println!();

    println!("Paths:");
    println!("  Themes:    {}", output.themes_path);
    println!("  Templates: {}", output.templates_path);
    println!("  Output:    {}", output.output_path);
    println!();

    println!("Defaults:");
    println!("  Theme:      {}", output.default_theme);
    println!("  Template:   {}", output.default_template);
    println!("  Resolution: {}", output.default_resolution);
    println!("  Auto-set wallpaper: {}", output.auto_set_wallpaper);
    println!("  Preferred templates: {}", output.preferred_templates.join(", "));
    println!();

    println!("Current:");
    println!(
        "  Theme:    {}",
        output.current_theme.as_deref().unwrap_or("(none)")
    );
    println!(
        "  Template: {}",
        output.current_template.as_deref().unwrap_or("(none)")
    );
    println!(
        "  Last output: {}",
        output.last_output_path.as_deref().unwrap_or("(none)")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_output_formats_resolution() {
        let config = Config {
            default_width: 2560,
            default_height: 1440,
            ..Config::default()
        };
        let output = ConfigOutput::new(&config, std::path::Path::new("/tmp/config.toml"));
        assert_eq!(output.default_resolution, "2560x1440");
        assert_eq!(output.config_file, "/tmp/config.toml");
        assert!(output.current_theme.is_none());
    }

    #[test]
    fn test_config_output_json_skips_unset_current() {
        let output = ConfigOutput::new(&Config::default(), std::path::Path::new("c.toml"));
        let json = serde_json::to_string(&output).unwrap();
        assert!(!json.contains("current_theme"));
        assert!(json.contains("\"preferred_templates\":[\"all\"]"));
    }
}
