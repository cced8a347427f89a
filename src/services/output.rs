//! On-disk output layout and file housekeeping.
//!
//! ```text
//! <root>/current.png                         canonical last image
//! <root>/ppr/<palette>/<template>.png        named variant
//! <root>/ppr/<palette>/<template>.svg        bound SVG (optional)
//! <root>/ppr/<palette>-<template>-<ts>.png   timestamped variant
//! <root>/current_temp_<ts>.png               cache-busting wallpaper copy
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::constants::{CURRENT_IMAGE, TEMP_COPY_PREFIX, TIMESTAMP_FORMAT, VARIANTS_DIR};

/// Age after which cache-busting copies are swept.
pub const TEMP_COPY_MAX_AGE: Duration = Duration::from_secs(60 * 60);

/// Paths of every output file under one root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    /// Layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Output root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/current.png`
    pub fn current(&self) -> PathBuf {
        self.root.join(CURRENT_IMAGE)
    }

    /// `<root>/ppr/<palette>/<file_name>`
    pub fn named_variant(&self, palette: &str, file_name: &str) -> PathBuf {
        self.root.join(VARIANTS_DIR).join(palette).join(file_name)
    }

    /// `<root>/ppr/<palette>-<stem>-<ts>.png`
    pub fn timestamped_variant(&self, palette: &str, stem: &str, at: DateTime<Local>) -> PathBuf {
        self.root.join(VARIANTS_DIR).join(format!(
            "{palette}-{stem}-{}.png",
            at.format(TIMESTAMP_FORMAT)
        ))
    }

    /// `<root>/current_temp_<ts>.png`
    pub fn temp_copy(&self, at: DateTime<Local>) -> PathBuf {
        self.root
            .join(format!("{TEMP_COPY_PREFIX}_{}.png", at.format(TIMESTAMP_FORMAT)))
    }

    /// Deletes `current_temp_*.png` files older than `max_age`.
    ///
    /// Returns how many were removed. Individual failures are logged.
    pub fn sweep_stale_temp_copies(&self, max_age: Duration) -> Result<usize> {
        if !self.root.is_dir() {
            return Ok(0);
        }
        let now = SystemTime::now();
        let mut removed = 0;

        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("Failed to read output directory: {}", self.root.display()))?;

        for entry in entries.flatten() {
            let path = entry.path();
            let is_temp_copy = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(TEMP_COPY_PREFIX) && n.ends_with(".png"));
            if !is_temp_copy {
                continue;
            }

            let age = entry
                .metadata()
                .and_then(|m| m.modified())
                .ok()
                .and_then(|modified| now.duration_since(modified).ok());
            if age.is_some_and(|age| age > max_age) {
                match fs::remove_file(&path) {
                    Ok(()) => removed += 1,
                    Err(e) => tracing::warn!("Failed to remove {}: {}", path.display(), e),
                }
            }
        }

        if removed > 0 {
            tracing::debug!("swept {} stale wallpaper copies", removed);
        }
        Ok(removed)
    }
}

/// Copies a file, creating the destination's parent directories.
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::copy(from, to)
        .with_context(|| format!("Failed to copy {} to {}", from.display(), to.display()))?;
    Ok(())
}

/// File stem of a template name (`abstract/waves.svg` gives `waves`).
pub fn template_stem(template: &str) -> String {
    Path::new(template)
        .file_stem()
        .map_or_else(|| template.to_string(), |s| s.to_string_lossy().to_string())
}
