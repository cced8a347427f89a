//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Nord as a Base16 palette file.
pub const NORD_YAML: &str = r##"system: "base16"
name: "Nord"
author: "arcticicestudio"
variant: "dark"
palette:
  base00: "#2E3440"
  base01: "#3B4252"
  base02: "#434C5E"
  base03: "#4C566A"
  base04: "#D8DEE9"
  base05: "#E5E9F0"
  base06: "#ECEFF4"
  base07: "#8FBCBB"
  base08: "#BF616A"
  base09: "#D08770"
  base0A: "#EBCB8B"
  base0B: "#A3BE8C"
  base0C: "#88C0D0"
  base0D: "#81A1C1"
  base0E: "#B48EAD"
  base0F: "#5E81AC"
"##;

/// A light palette with a different background.
pub const SOLARIZED_LIGHT_YAML: &str = r##"system: "base16"
name: "Solarized Light"
author: "Ethan Schoonover"
variant: "light"
palette:
  base00: "#FDF6E3"
  base01: "#EEE8D5"
  base02: "#93A1A1"
  base03: "#839496"
  base04: "#657B83"
  base05: "#586E75"
  base06: "#073642"
  base07: "#002B36"
  base08: "#DC322F"
  base09: "#CB4B16"
  base0A: "#B58900"
  base0B: "#859900"
  base0C: "#2AA198"
  base0D: "#268BD2"
  base0E: "#6C71C4"
  base0F: "#D33682"
"##;

/// 100x100 template filled with the background slot.
pub const SQUARE_TEMPLATE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100"><rect width="100" height="100" fill="{{base00}}"/></svg>"#;

/// Template using an accent slot.
pub const ACCENT_TEMPLATE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100"><rect width="200" height="100" fill="{{base00}}"/><circle cx="100" cy="50" r="30" fill="{{base0D}}"/></svg>"#;

/// Nord-colored SVG with one color outside the palette.
pub const NORD_ARTWORK: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100"><rect width="100" height="100" fill="#2e3440"/><circle cx="50" cy="50" r="20" style="fill:#81A1C1;stroke:#123456"/></svg>"##;

/// Isolated config dir, palette root, template root and output root.
pub struct Workspace {
    pub dir: TempDir,
    pub config_dir: PathBuf,
    pub themes: PathBuf,
    pub templates: PathBuf,
    pub output: PathBuf,
}

impl Workspace {
    /// Workspace with nord and solarized-light palettes and the square
    /// template as the default.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_path_buf();
        let ws = Self {
            config_dir: root.join("config"),
            themes: root.join("themes"),
            templates: root.join("templates"),
            output: root.join("out"),
            dir,
        };
        fs::create_dir_all(&ws.config_dir).unwrap();
        fs::create_dir_all(ws.themes.join("base16")).unwrap();
        fs::create_dir_all(&ws.templates).unwrap();

        ws.write_palette("nord", NORD_YAML);
        ws.write_palette("solarized-light", SOLARIZED_LIGHT_YAML);
        ws.write_template("square.svg", SQUARE_TEMPLATE);
        ws.write_config(&[]);
        ws
    }

    /// Writes config.toml pointing at the workspace, plus `extra` lines.
    pub fn write_config(&self, extra: &[&str]) {
        let mut content = format!(
            "themes_path = {:?}\ntemplates_path = {:?}\noutput_path = {:?}\ndefault_theme = \"nord\"\ndefault_template = \"square.svg\"\ndefault_width = 64\ndefault_height = 48\nauto_set_wallpaper = false\n",
            self.themes.to_string_lossy(),
            self.templates.to_string_lossy(),
            self.output.to_string_lossy(),
        );
        for line in extra {
            content.push_str(line);
            content.push('\n');
        }
        fs::write(self.config_file(), content).unwrap();
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn read_config(&self) -> String {
        fs::read_to_string(self.config_file()).unwrap()
    }

    pub fn write_palette(&self, key: &str, yaml: &str) -> PathBuf {
        let path = self.themes.join("base16").join(format!("{key}.yaml"));
        fs::write(&path, yaml).unwrap();
        path
    }

    pub fn write_template(&self, name: &str, svg: &str) -> PathBuf {
        let path = self.templates.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, svg).unwrap();
        path
    }

    /// Writes an arbitrary file under the workspace root.
    pub fn write_file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Runs the binary with the workspace config dir.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(ppr_bin())
            .env("PPR_CONFIG_DIR", &self.config_dir)
            .env_remove("RUST_LOG")
            .args(args)
            .output()
            .expect("Failed to execute command")
    }
}

/// Path to the ppr binary
pub fn ppr_bin() -> String {
    std::env::var("CARGO_BIN_EXE_ppr").unwrap_or_else(|_| env!("CARGO_BIN_EXE_ppr").to_string())
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Asserts the exit code, printing both streams on mismatch.
pub fn assert_exit(output: &Output, code: i32) {
    assert_eq!(
        output.status.code(),
        Some(code),
        "stdout: {}\nstderr: {}",
        stdout(output),
        stderr(output)
    );
}

/// RGBA of the pixel at (x, y) in a PNG.
pub fn pixel(path: &Path, x: u32, y: u32) -> [u8; 4] {
    let img = image::open(path).unwrap().to_rgba8();
    img.get_pixel(x, y).0
}

pub fn dimensions(path: &Path) -> (u32, u32) {
    let img = image::open(path).unwrap();
    (img.width(), img.height())
}
