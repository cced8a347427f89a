//! Template discovery, path resolution, and cycling order.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::ALL_TEMPLATES;
use crate::error::PprError;

/// Lists every `*.svg` under `root`, recursively, as sorted `/`-separated
/// relative paths. A missing root yields an empty list.
pub fn discover(root: &Path) -> Result<Vec<String>> {
    let mut found = Vec::new();
    if root.is_dir() {
        walk(root, root, &mut found)?;
    }
    found.sort();
    Ok(found)
}

fn walk(root: &Path, dir: &Path, found: &mut Vec<String>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read template directory: {}", dir.display()))?;

    for entry in entries {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();
        if path.is_dir() {
            walk(root, &path, found)?;
        } else if is_svg(&path) {
            if let Ok(relative) = path.strip_prefix(root) {
                found.push(to_slash(relative));
            }
        }
    }
    Ok(())
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolves a template name to an existing file.
///
/// Absolute paths are used as-is; anything else is joined onto `root`.
/// `.svg` is appended when the name has no extension.
pub fn resolve_template_path(name: &str, root: &Path) -> Result<PathBuf, PprError> {
    let mut path = PathBuf::from(name);
    if path.extension().is_none() {
        path.set_extension("svg");
    }
    let path = if path.is_absolute() { path } else { root.join(path) };

    if path.is_file() {
        Ok(path)
    } else {
        Err(PprError::TemplateNotFound(path))
    }
}

/// Name to remember for a template: relative to `root` when inside it.
pub fn template_key(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .map_or_else(|_| path.to_string_lossy().to_string(), to_slash)
}

/// Expands the preferred list into the templates `cycle` visits.
///
/// Exactly `["all"]` means every template under `root`.
pub fn cycle_list(preferred: &[String], root: &Path) -> Result<Vec<String>> {
    let list = if preferred.len() == 1 && preferred[0] == ALL_TEMPLATES {
        discover(root)?
    } else {
        preferred.to_vec()
    };

    if list.is_empty() {
        return Err(PprError::NoTemplates(root.to_path_buf()).into());
    }
    Ok(list)
}

/// Template after `current` in `list`, wrapping at the end.
///
/// `current` matches an entry by exact string or by file name; when it is
/// absent (or unknown) the first entry is returned.
pub fn next_template<'a>(list: &'a [String], current: Option<&str>) -> Option<&'a str> {
    let first = list.first()?;
    let Some(current) = current else {
        return Some(first);
    };

    let current_base = basename(current);
    let index = list
        .iter()
        .position(|entry| entry == current || basename(entry) == current_base);

    Some(match index {
        Some(i) => &list[(i + 1) % list.len()],
        None => first,
    })
}

fn basename(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}
