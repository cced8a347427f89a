//! Palette store: discovery, lookup, and persistence of palette files.
//!
//! Palettes live under `<root>/base16/` and `<root>/base24/`, one YAML file
//! each, and are indexed by file stem.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PprError;
use crate::models::{Palette, PaletteSystem};
use crate::parser::{parse_palette_file, save_palette_file};

/// A loaded palette and the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPalette {
    /// Index key (file stem)
    pub key: String,
    /// Source file
    pub path: PathBuf,
    /// Validated contents
    pub palette: Palette,
}

/// In-memory index of the palettes under one root directory.
#[derive(Debug, Clone)]
pub struct PaletteStore {
    root: PathBuf,
    palettes: BTreeMap<String, StoredPalette>,
}

impl PaletteStore {
    /// Creates an empty store rooted at `root` without touching the disk.
    pub fn empty(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            palettes: BTreeMap::new(),
        }
    }

    /// Scans `root/base16` and `root/base24` for `*.yaml`/`*.yml` files.
    ///
    /// Missing directories count as empty. A file that fails to parse is
    /// logged and skipped. When two files share a stem, the later system wins.
    pub fn load(root: impl Into<PathBuf>) -> Result<Self> {
        let mut store = Self::empty(root);

        for system in PaletteSystem::ALL {
            let dir = store.root.join(system.as_str());
            if !dir.is_dir() {
                tracing::debug!("palette directory {} not present", dir.display());
                continue;
            }

            let entries = fs::read_dir(&dir)
                .with_context(|| format!("Failed to read palette directory: {}", dir.display()))?;

            let mut paths: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.is_file() && is_palette_file(path))
                .collect();
            paths.sort();

            for path in paths {
                let Some(key) = path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
                    continue;
                };
                match parse_palette_file(&path) {
                    Ok(palette) => {
                        store.palettes.insert(key.clone(), StoredPalette { key, path, palette });
                    }
                    Err(e) => {
                        tracing::warn!("Skipping palette {}: {:#}", path.display(), e);
                    }
                }
            }
        }

        tracing::debug!(
            "loaded {} palettes from {}",
            store.palettes.len(),
            store.root.display()
        );
        Ok(store)
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Looks up a palette by name.
    ///
    /// Tries the exact (case-sensitive) key first, then the key with a
    /// leading `base16-`/`base24-` removed.
    pub fn get(&self, name: &str) -> Result<&Palette, PprError> {
        self.get_entry(name)
            .map(|stored| &stored.palette)
            .ok_or_else(|| PprError::PaletteNotFound(name.to_string()))
    }

    /// Like [`PaletteStore::get`] but includes the source path.
    pub fn get_entry(&self, name: &str) -> Option<&StoredPalette> {
        self.palettes.get(name).or_else(|| {
            name.strip_prefix("base16-")
                .or_else(|| name.strip_prefix("base24-"))
                .and_then(|stripped| self.palettes.get(stripped))
        })
    }

    /// Whether a palette with this exact key exists.
    pub fn contains(&self, key: &str) -> bool {
        self.palettes.contains_key(key)
    }

    /// Index keys in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.palettes.keys().map(String::as_str)
    }

    /// All stored palettes in key order.
    pub fn iter(&self) -> impl Iterator<Item = &StoredPalette> {
        self.palettes.values()
    }

    /// Number of palettes.
    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    /// True when nothing was loaded.
    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    /// Path a palette named `key` of `system` is saved to.
    pub fn path_for(&self, system: PaletteSystem, key: &str) -> Result<PathBuf, PprError> {
        validate_name(key)?;
        Ok(self.root.join(system.as_str()).join(format!("{key}.yaml")))
    }

    /// Writes a palette in canonical form and adds it to the index.
    ///
    /// The file name is derived from `palette.name`.
    pub fn save(&mut self, palette: Palette) -> Result<PathBuf> {
        let key = palette.name.clone();
        let path = self.path_for(palette.system, &key)?;

        save_palette_file(&palette, &path)
            .with_context(|| format!("Failed to save palette '{key}'"))?;
        tracing::info!("saved palette {} to {}", key, path.display());

        self.palettes.insert(
            key.clone(),
            StoredPalette {
                key,
                path: path.clone(),
                palette,
            },
        );
        Ok(path)
    }
}

fn is_palette_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

/// Rejects names that would escape the palette directory.
pub fn validate_name(name: &str) -> Result<(), PprError> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed.contains("..")
        || trimmed.contains('/')
        || trimmed.contains('\\')
    {
        return Err(PprError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Placeholder, RgbColor, Variant};
    use tempfile::TempDir;

    fn palette(system: PaletteSystem, name: &str, seed: u8) -> Palette {
        let count = Placeholder::required(system).len();
        let entries = Placeholder::ALL[..count]
            .iter()
            .enumerate()
            .map(|(i, slot)| (*slot, RgbColor::new(seed, i as u8, 0)))
            .collect();
        Palette::new(system, name, "tester", Variant::Dark, entries).unwrap()
    }

    #[test]
    fn test_load_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = PaletteStore::load(temp.path().join("nothing")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let mut store = PaletteStore::empty(temp.path());
        let nord = palette(PaletteSystem::Base16, "nord", 1);
        let path = store.save(nord.clone()).unwrap();
        assert_eq!(path, temp.path().join("base16").join("nord.yaml"));

        let reloaded = PaletteStore::load(temp.path()).unwrap();
        assert_eq!(reloaded.get("nord").unwrap(), &nord);
    }

    #[test]
    fn test_load_skips_malformed_files() {
        let temp = TempDir::new().unwrap();
        let mut store = PaletteStore::empty(temp.path());
        store.save(palette(PaletteSystem::Base16, "good", 1)).unwrap();
        store.save(palette(PaletteSystem::Base24, "wide", 2)).unwrap();
        fs::write(temp.path().join("base16").join("bad.yaml"), "system: [").unwrap();
        fs::write(temp.path().join("base16").join("notes.txt"), "ignored").unwrap();

        let store = PaletteStore::load(temp.path()).unwrap();
        assert_eq!(store.names().collect::<Vec<_>>(), vec!["good", "wide"]);
        assert_eq!(store.get("wide").unwrap().len(), 24);
    }

    #[test]
    fn test_get_strips_system_prefix() {
        let temp = TempDir::new().unwrap();
        let mut store = PaletteStore::empty(temp.path());
        store.save(palette(PaletteSystem::Base16, "nord", 1)).unwrap();

        assert!(store.get("base16-nord").is_ok());
        assert!(store.get("base24-nord").is_ok());
        assert!(store.get("Nord").is_err());
        assert_eq!(
            store.get("dracula").unwrap_err(),
            PprError::PaletteNotFound("dracula".into())
        );
    }

    #[test]
    fn test_yml_extension_is_loaded() {
        let temp = TempDir::new().unwrap();
        let mut store = PaletteStore::empty(temp.path());
        let path = store.save(palette(PaletteSystem::Base16, "mono", 3)).unwrap();
        fs::rename(&path, path.with_extension("yml")).unwrap();

        let store = PaletteStore::load(temp.path()).unwrap();
        assert!(store.contains("mono"));
    }

    #[test]
    fn test_save_rejects_path_names() {
        let temp = TempDir::new().unwrap();
        let mut store = PaletteStore::empty(temp.path());
        assert!(store.save(palette(PaletteSystem::Base16, "../evil", 1)).is_err());
        assert!(store.save(palette(PaletteSystem::Base16, "a/b", 1)).is_err());
    }
}
