//! Session configuration: defaults plus the current selection.
//!
//! A single flat TOML record read at every invocation and written back
//! atomically after a successful command.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{ALL_TEMPLATES, CONFIG_DIR_ENV, CONFIG_FILE_NAME};
use crate::models::PaletteSystem;

/// Persistent session state.
///
/// # File Location
///
/// `~/.config/ppr/config.toml`, or `$PPR_CONFIG_DIR/config.toml` when the
/// environment variable is set.
///
/// # Validation
///
/// - `default_width` and `default_height` must be positive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root containing `base16/` and `base24/` palette directories
    pub themes_path: PathBuf,
    /// Root of the SVG template tree
    pub templates_path: PathBuf,
    /// Root of generated images
    pub output_path: PathBuf,
    /// Palette used when none is given or remembered
    pub default_theme: String,
    /// Template used when none is given or remembered
    pub default_template: String,
    /// Fallback output width when the display cannot be probed
    pub default_width: u32,
    /// Fallback output height when the display cannot be probed
    pub default_height: u32,
    /// Install every generated image as the wallpaper
    pub auto_set_wallpaper: bool,
    /// Palette of the last generation
    pub current_theme: Option<String>,
    /// Template of the last generation, relative to `templates_path` when possible
    pub current_template: Option<String>,
    /// Image most recently produced or installed
    pub last_output_path: Option<PathBuf>,
    /// Templates visited by `cycle`; `["all"]` means every template on disk
    pub preferred_templates: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = Self::config_dir().unwrap_or_else(|_| PathBuf::from(".ppr"));
        let output_path = dirs::home_dir()
            .map(|home| home.join("Pictures").join("ppr"))
            .unwrap_or_else(|| PathBuf::from("ppr-output"));

        Self {
            themes_path: config_dir.join("themes"),
            templates_path: config_dir.join("templates"),
            output_path,
            default_theme: "nord".to_string(),
            default_template: "geometric-simple.svg".to_string(),
            default_width: 1920,
            default_height: 1080,
            auto_set_wallpaper: false,
            current_theme: None,
            current_template: None,
            last_output_path: None,
            preferred_templates: vec![ALL_TEMPLATES.to_string()],
        }
    }
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the config directory path.
    ///
    /// `$PPR_CONFIG_DIR` if set, otherwise `~/.config/ppr/`.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let home = dirs::home_dir().context("Failed to determine home directory")?;
        Ok(home.join(".config").join("ppr"))
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Loads configuration from the default location.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit path.
    ///
    /// Missing fields take their defaults and `~/` prefixes are expanded.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let mut config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.expand_paths();
        Ok(config)
    }

    /// Saves configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration using a temp file + rename.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.default_width == 0 || self.default_height == 0 {
            anyhow::bail!(
                "Invalid default resolution {}x{}: width and height must be positive",
                self.default_width,
                self.default_height
            );
        }
        Ok(())
    }

    /// Creates the themes, templates, and output roots.
    pub fn ensure_directories(&self) -> Result<()> {
        let dirs = [
            self.themes_path.join(PaletteSystem::Base16.as_str()),
            self.themes_path.join(PaletteSystem::Base24.as_str()),
            self.templates_path.clone(),
            self.output_path.clone(),
        ];
        for dir in &dirs {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        Ok(())
    }

    fn expand_paths(&mut self) {
        self.themes_path = expand_tilde(&self.themes_path);
        self.templates_path = expand_tilde(&self.templates_path);
        self.output_path = expand_tilde(&self.output_path);
        self.last_output_path = self.last_output_path.as_deref().map(expand_tilde);
    }
}

/// Expands a leading `~/` against the home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest)),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let config = Config::new();
        assert_eq!(config.default_theme, "nord");
        assert_eq!(config.default_template, "geometric-simple.svg");
        assert_eq!((config.default_width, config.default_height), (1920, 1080));
        assert!(!config.auto_set_wallpaper);
        assert_eq!(config.preferred_templates, vec!["all".to_string()]);
        assert!(config.current_theme.is_none());
        assert!(config.themes_path.ends_with("themes"));
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::new();
        assert!(config.validate().is_ok());

        config.default_height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");

        let mut config = Config::new();
        config.current_theme = Some("nord".to_string());
        config.current_template = Some("abstract/waves.svg".to_string());
        config.preferred_templates = vec!["a.svg".to_string(), "b.svg".to_string()];
        config.save_to(&config_file).unwrap();

        assert!(!config_file.with_extension("toml.tmp").exists());
        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Config::load_from(&temp_dir.path().join("nope.toml")).unwrap();
        assert_eq!(loaded.default_theme, "nord");
    }

    #[test]
    fn test_config_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "default_theme = \"gruvbox\"\ndefault_width = 800\n").unwrap();

        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded.default_theme, "gruvbox");
        assert_eq!(loaded.default_width, 800);
        assert_eq!(loaded.default_height, 1080);
    }

    #[test]
    fn test_config_rejects_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "default_width = \"wide\"\n").unwrap();

        assert!(Config::load_from(&config_file).is_err());
    }

    #[test]
    fn test_expand_tilde() {
        let plain = Path::new("/tmp/themes");
        assert_eq!(expand_tilde(plain), plain.to_path_buf());

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/themes")), home.join("themes"));
        }
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::new();
        config.themes_path = temp_dir.path().join("themes");
        config.templates_path = temp_dir.path().join("templates");
        config.output_path = temp_dir.path().join("out");

        config.ensure_directories().unwrap();
        assert!(config.themes_path.join("base16").is_dir());
        assert!(config.themes_path.join("base24").is_dir());
        assert!(config.templates_path.is_dir());
        assert!(config.output_path.is_dir());
    }
}
