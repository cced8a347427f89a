//! `ppr list-themes` and `ppr list-templates`.

use crate::cli::common::{load_session, CliError, CliResult};
use crate::models::Variant;
use crate::services::{binder, templates, PaletteStore};
use chrono::{DateTime, Local};
use clap::Args;
use serde::Serialize;
use std::fs;

/// List available palettes
#[derive(Debug, Clone, Args)]
pub struct ListThemesArgs {
    /// Show author, system, variant and color count
    #[arg(short, long)]
    pub details: bool,

    /// Only show palettes of this variant (dark, light, any)
    #[arg(long, value_name = "VARIANT")]
    pub variant: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// List available SVG templates
#[derive(Debug, Clone, Args)]
pub struct ListTemplatesArgs {
    /// Show size, modification time and placeholders used
    #[arg(short, long)]
    pub details: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Palette metadata for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct ThemeInfo {
    /// Lookup key (file stem)
    pub key: String,
    /// Display name from the file
    pub name: String,
    /// Scheme author
    pub author: String,
    /// base16 or base24
    pub system: String,
    /// dark, light or any
    pub variant: String,
    /// Number of color slots
    pub colors: usize,
    /// Source file
    pub file: String,
}

/// Palette list response
#[derive(Debug, Clone, Serialize)]
pub struct ThemeListResponse {
    /// Palettes, sorted by key
    pub themes: Vec<ThemeInfo>,
    /// Total number of palettes
    pub count: usize,
}

/// Template metadata for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfo {
    /// Path relative to the templates directory
    pub name: String,
    /// File size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Last modification time (local)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    /// Placeholders the template uses
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub placeholders: Vec<String>,
}

/// Template list response
#[derive(Debug, Clone, Serialize)]
pub struct TemplateListResponse {
    /// Templates, sorted by path
    pub templates: Vec<TemplateInfo>,
    /// Total number of templates
    pub count: usize,
}

impl ListThemesArgs {
    /// Execute the list-themes command
    pub fn execute(&self) -> CliResult<()> {
        let (config, _) = load_session()?;
        let filter = self
            .variant
            .as_deref()
            .map(str::parse::<Variant>)
            .transpose()
            .map_err(|e| CliError::validation(e.to_string()))?;

        let store = PaletteStore::load(&config.themes_path)
            .map_err(|e| CliError::io(format!("Failed to load palettes: {e:#}")))?;

        let themes: Vec<ThemeInfo> = store
            .iter()
            .filter(|stored| match filter {
                None | Some(Variant::Any) => true,
                Some(variant) => stored.palette.variant == variant,
            })
            .map(|stored| ThemeInfo {
                key: stored.key.clone(),
                name: stored.palette.name.clone(),
                author: stored.palette.author.clone(),
                system: stored.palette.system.to_string(),
                variant: stored.palette.variant.to_string(),
                colors: stored.palette.len(),
                file: stored.path.display().to_string(),
            })
            .collect();

        let count = themes.len();
        let response = ThemeListResponse { themes, count };

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
            return Ok(());
        }

        if count == 0 {
            println!("No themes found.");
            println!("Themes directory: {}", config.themes_path.display());
        } else if self.details {
            println!("Found {count} themes:\n");
            for theme in &response.themes {
                println!("{}", theme.key);
                println!("   Name: {}", theme.name);
                println!("   Author: {}", theme.author);
                println!("   System: {}", theme.system);
                println!("   Variant: {}", theme.variant);
                println!("   Colors: {}", theme.colors);
                println!();
            }
        } else {
            println!("Available themes ({count}):");
            for theme in &response.themes {
                println!("  • {}", theme.key);
            }
        }

        Ok(())
    }
}

impl ListTemplatesArgs {
    /// Execute the list-templates command
    pub fn execute(&self) -> CliResult<()> {
        let (config, _) = load_session()?;
        let root = &config.templates_path;

        let names = templates::discover(root)
            .map_err(|e| CliError::io(format!("Failed to scan templates: {e:#}")))?;

        let with_details = self.details || self.json;
        let templates: Vec<TemplateInfo> = names
            .into_iter()
            .map(|name| {
                if !with_details {
                    return TemplateInfo {
                        name,
                        size: None,
                        modified: None,
                        placeholders: Vec::new(),
                    };
                }
                let path = root.join(&name);
                let metadata = fs::metadata(&path).ok();
                let modified = metadata
                    .as_ref()
                    .and_then(|m| m.modified().ok())
                    .map(|t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M:%S").to_string());
                let placeholders = fs::read_to_string(&path)
                    .map(|content| {
                        binder::placeholders(&content)
                            .iter()
                            .map(ToString::to_string)
                            .collect()
                    })
                    .unwrap_or_default();
                TemplateInfo {
                    name,
                    size: metadata.map(|m| m.len()),
                    modified,
                    placeholders,
                }
            })
            .collect();

        let count = templates.len();
        let response = TemplateListResponse { templates, count };

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
            return Ok(());
        }

        if count == 0 {
            println!("No templates found.");
            println!("Templates directory: {}", root.display());
        } else if self.details {
            println!("Found {count} templates:\n");
            for template in &response.templates {
                println!("{}", template.name);
                if let Some(size) = template.size {
                    println!("   Size: {size} bytes");
                }
                if let Some(modified) = &template.modified {
                    println!("   Modified: {modified}");
                }
                if !template.placeholders.is_empty() {
                    println!("   Placeholders: {}", template.placeholders.join(", "));
                }
                println!();
            }
        } else {
            println!("Available templates ({count}):");
            for template in &response.templates {
                println!("  • {}", template.name);
            }
        }

        Ok(())
    }
}
