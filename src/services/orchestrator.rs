//! Generation flows: generate, switch_current, cycle_template.
//!
//! Every flow loads the palette, binds it into a template, rasterizes the
//! result into the output layout, optionally installs it as the wallpaper,
//! and finally records the selection in the session config.

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::platform::{Resolution, ResolutionProbe, WallpaperSetter};
use crate::services::output::{copy_file, template_stem, OutputLayout, TEMP_COPY_MAX_AGE};
use crate::services::{binder, rasterizer, templates, PaletteStore};

/// Per-invocation overrides shared by all flows.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Explicit output size; otherwise probed, then configured default
    pub resolution: Option<Resolution>,
    /// Output root instead of `output_path`
    pub output_dir: Option<PathBuf>,
    /// File name of the named variant instead of `<template>.png`
    pub filename: Option<String>,
    /// Also write the bound SVG next to the named variant
    pub write_svg: bool,
    /// Install the result as the wallpaper
    pub set_wallpaper: bool,
}

/// What a flow produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Palette key used
    pub palette: String,
    /// Template key recorded in the session
    pub template: String,
    /// Output size
    pub resolution: Resolution,
    /// `ppr/<palette>/<template>.png`
    pub named_variant: PathBuf,
    /// `current.png`
    pub current: PathBuf,
    /// Timestamped history copy (generate only)
    pub timestamped: Option<PathBuf>,
    /// Bound SVG, when requested
    pub svg: Option<PathBuf>,
    /// Cache-busting copy handed to the wallpaper setter, when installed
    pub wallpaper: Option<PathBuf>,
    /// False when an existing named variant was reused
    pub rendered: bool,
}

/// Runs generation flows against one session.
pub struct Orchestrator<'a> {
    config: &'a mut Config,
    session_path: PathBuf,
    probe: &'a dyn ResolutionProbe,
    setter: &'a dyn WallpaperSetter,
}

/// How a flow treats an existing named variant and history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Generate,
    Switch,
    Cycle,
}

impl<'a> Orchestrator<'a> {
    /// Creates an orchestrator that saves the session to `session_path`.
    pub fn new(
        config: &'a mut Config,
        session_path: impl Into<PathBuf>,
        probe: &'a dyn ResolutionProbe,
        setter: &'a dyn WallpaperSetter,
    ) -> Self {
        Self {
            config,
            session_path: session_path.into(),
            probe,
            setter,
        }
    }

    /// Session state, as updated by previous flows.
    pub fn config(&self) -> &Config {
        self.config
    }

    /// Renders `template` (or the default template) with `palette`.
    ///
    /// Always re-renders and also keeps a timestamped history copy.
    pub fn generate(
        &mut self,
        palette: &str,
        template: Option<&str>,
        options: &RenderOptions,
    ) -> Result<Outcome> {
        let template = template
            .map(str::to_string)
            .unwrap_or_else(|| self.config.default_template.clone());
        self.run(Flow::Generate, palette, &template, options)
    }

    /// Re-themes the current template with `palette`.
    pub fn switch_current(&mut self, palette: &str, options: &RenderOptions) -> Result<Outcome> {
        let template = self
            .config
            .current_template
            .clone()
            .unwrap_or_else(|| self.config.default_template.clone());
        self.run(Flow::Switch, palette, &template, options)
    }

    /// Advances to the next template in the preferred list.
    ///
    /// The palette is `palette`, else the current theme, else the default.
    /// An existing named variant is reused instead of re-rendered, unless a
    /// custom file name is given.
    pub fn cycle_template(
        &mut self,
        palette: Option<&str>,
        options: &RenderOptions,
    ) -> Result<Outcome> {
        let palette = palette
            .map(str::to_string)
            .or_else(|| self.config.current_theme.clone())
            .unwrap_or_else(|| self.config.default_theme.clone());

        let list = templates::cycle_list(
            &self.config.preferred_templates,
            &self.config.templates_path,
        )?;
        let next = templates::next_template(&list, self.config.current_template.as_deref())
            .map(str::to_string)
            .context("Template list is empty")?;
        tracing::info!("cycling to template {}", next);

        self.run(Flow::Cycle, &palette, &next, options)
    }

    fn resolve_resolution(&self, requested: Option<Resolution>) -> Resolution {
        if let Some(resolution) = requested {
            return resolution;
        }
        match self.probe.primary_resolution() {
            Ok(resolution) => {
                tracing::debug!("detected display resolution {}", resolution);
                resolution
            }
            Err(e) => {
                let fallback = Resolution {
                    width: self.config.default_width.max(1),
                    height: self.config.default_height.max(1),
                };
                tracing::warn!(
                    "Could not detect display resolution ({:#}), using {}",
                    e,
                    fallback
                );
                fallback
            }
        }
    }

    fn run(
        &mut self,
        flow: Flow,
        palette_name: &str,
        template_name: &str,
        options: &RenderOptions,
    ) -> Result<Outcome> {
        let store = PaletteStore::load(&self.config.themes_path)?;
        let palette = store.get(palette_name)?;
        let palette_key = store
            .get_entry(palette_name)
            .map_or_else(|| palette_name.to_string(), |entry| entry.key.clone());

        let template_path =
            templates::resolve_template_path(template_name, &self.config.templates_path)?;
        let template_key = templates::template_key(&template_path, &self.config.templates_path);
        let stem = template_stem(&template_key);

        let resolution = self.resolve_resolution(options.resolution);
        let layout = OutputLayout::new(
            options
                .output_dir
                .clone()
                .unwrap_or_else(|| self.config.output_path.clone()),
        );

        let file_name = options
            .filename
            .as_deref()
            .map_or_else(|| format!("{stem}.png"), with_png_extension);
        let named_variant = layout.named_variant(&palette_key, &file_name);

        // A custom file name is shared by every template.
        let reuse = flow == Flow::Cycle
            && options.filename.is_none()
            && named_variant.is_file()
            && !options.write_svg;
        let mut svg_path = None;

        if reuse {
            tracing::info!("reusing existing {}", named_variant.display());
        } else {
            let source = fs::read_to_string(&template_path).with_context(|| {
                format!("Failed to read template: {}", template_path.display())
            })?;
            let bound = binder::bind(&source, palette)
                .with_context(|| format!("Failed to bind template {template_key}"))?;

            rasterizer::render(&bound, resolution.width, resolution.height, &named_variant)
                .with_context(|| format!("Failed to render {template_key} with {palette_key}"))?;

            if options.write_svg {
                let path = named_variant.with_extension("svg");
                fs::write(&path, &bound)
                    .with_context(|| format!("Failed to write SVG: {}", path.display()))?;
                svg_path = Some(path);
            }
        }

        let current = layout.current();
        copy_file(&named_variant, &current)?;

        let timestamped = if flow == Flow::Generate {
            let path = layout.timestamped_variant(&palette_key, &stem, Local::now());
            copy_file(&named_variant, &path)?;
            Some(path)
        } else {
            None
        };

        let wallpaper = if options.set_wallpaper || self.config.auto_set_wallpaper {
            self.install_wallpaper(&layout, &current)
        } else {
            None
        };

        self.config.current_theme = Some(palette_key.clone());
        self.config.current_template = Some(template_key.clone());
        self.config.last_output_path = Some(wallpaper.clone().unwrap_or_else(|| current.clone()));
        if let Err(e) = self.config.save_to(&self.session_path) {
            tracing::warn!("Failed to save session state: {:#}", e);
        }

        Ok(Outcome {
            palette: palette_key,
            template: template_key,
            resolution,
            named_variant,
            current,
            timestamped,
            svg: svg_path,
            wallpaper,
            rendered: !reuse,
        })
    }

    /// Copies `current` to a fresh file and hands it to the setter.
    ///
    /// Failures are logged; returns the copy only when it was installed.
    fn install_wallpaper(&self, layout: &OutputLayout, current: &Path) -> Option<PathBuf> {
        let copy = layout.temp_copy(Local::now());
        if let Err(e) = copy_file(current, &copy) {
            tracing::warn!("Failed to prepare wallpaper copy: {:#}", e);
            return None;
        }
        if let Err(e) = layout.sweep_stale_temp_copies(TEMP_COPY_MAX_AGE) {
            tracing::warn!("Failed to clean old wallpaper copies: {:#}", e);
        }

        let absolute = fs::canonicalize(&copy).unwrap_or(copy);
        match self.setter.set_wallpaper(&absolute) {
            Ok(()) => {
                tracing::info!("wallpaper set to {}", absolute.display());
                Some(absolute)
            }
            Err(e) => {
                tracing::warn!("Failed to set wallpaper: {:#}", e);
                None
            }
        }
    }
}

fn with_png_extension(name: &str) -> String {
    if Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
    {
        name.to_string()
    } else {
        format!("{name}.png")
    }
}
