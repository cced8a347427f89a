//! `ppr convert-template` and `ppr batch-convert`: turn SVGs into templates.

use crate::cli::common::{load_session, CliError, CliResult};
use crate::config::Config;
use crate::models::{Palette, RgbColor};
use crate::parser::extract_colors;
use crate::services::reverse_map::{
    map_to_palette, parse_explicit_pairs, rewrite, ColorMapping, MappingStrategy,
};
use crate::services::PaletteStore;
use clap::{ArgGroup, Args};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Convert an SVG into a template by replacing colors with placeholders
#[derive(Debug, Clone, Args)]
#[command(group(
    ArgGroup::new("strategy")
        .required(true)
        .args(["from_theme", "map", "interactive"])
))]
pub struct ConvertTemplateArgs {
    /// SVG to convert
    #[arg(short, long, value_name = "SVG")]
    pub input: PathBuf,

    /// Template name or path (defaults to <input>-template.svg in the templates directory)
    #[arg(short, long, value_name = "NAME")]
    pub output: Option<String>,

    /// Map colors that match entries of this palette
    #[arg(long, value_name = "THEME")]
    pub from_theme: Option<String>,

    /// Explicit mapping, e.g. --map '#81a1c1=base0D' (repeatable)
    #[arg(short, long, value_name = "COLOR=PLACEHOLDER")]
    pub map: Vec<String>,

    /// Prompt for a placeholder for each color
    #[arg(long)]
    pub interactive: bool,
}

/// Convert many SVGs using one palette
#[derive(Debug, Clone, Args)]
pub struct BatchConvertArgs {
    /// SVG files to convert
    #[arg(value_name = "FILES")]
    pub inputs: Vec<PathBuf>,

    /// Comma-separated list of additional files
    #[arg(long, value_name = "FILES", value_delimiter = ',')]
    pub files: Vec<PathBuf>,

    /// Glob pattern selecting files, e.g. --input 'art/*.svg'
    #[arg(long, value_name = "PATTERN")]
    pub input: Option<String>,

    /// Convert every *.svg in this directory
    #[arg(long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Palette whose colors are replaced
    #[arg(long, value_name = "THEME")]
    pub from_theme: String,

    /// Where templates are written (defaults to the templates directory)
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Suffix appended to each file stem
    #[arg(long, value_name = "SUFFIX", default_value = "-template")]
    pub suffix: String,
}

impl ConvertTemplateArgs {
    /// Execute the convert-template command
    pub fn execute(&self) -> CliResult<()> {
        let (config, _) = load_session()?;
        let doc = read_svg(&self.input)?;

        let colors = extract_colors(&doc);
        if colors.is_empty() {
            return Err(CliError::validation(format!(
                "No fill or stroke colors found in {}",
                self.input.display()
            )));
        }
        println!("Found {} unique colors in the SVG:", colors.len());
        for (i, color) in colors.iter().enumerate() {
            println!("  {}. {}", i + 1, color);
        }
        println!();

        let mapping = if let Some(theme) = &self.from_theme {
            let store = load_store(&config)?;
            let palette = store.get(theme)?;
            map_to_palette(&doc, MappingStrategy::ByPalette(palette))?
        } else if self.interactive {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut output = io::stdout();
            let mapping = map_to_palette(
                &doc,
                MappingStrategy::Interactive {
                    input: &mut input,
                    output: &mut output,
                },
            )?;
            output
                .flush()
                .map_err(|e| CliError::io(format!("Failed to flush output: {e}")))?;
            mapping
        } else {
            let pairs = parse_explicit_pairs(&self.map)?;
            map_to_palette(&doc, MappingStrategy::Explicit(pairs))?
        };

        if mapping.is_empty() {
            return Err(CliError::validation("No colors were mapped; template not written"));
        }

        let out_path = self.output_path(&config);
        write_template(&out_path, &rewrite(&doc, &mapping))?;

        print_mapping(&mapping);
        if !mapping.unmapped.is_empty() {
            print_unmapped(&mapping.unmapped);
        }
        println!("✓ Template created: {}", out_path.display());
        println!("  Applied {} color mappings", mapping.mapped.len());
        Ok(())
    }

    fn output_path(&self, config: &Config) -> PathBuf {
        let name = self.output.clone().unwrap_or_else(|| {
            format!("{}-template.svg", file_stem(&self.input))
        });
        let mut path = PathBuf::from(name);
        if path.extension().is_none() {
            path.set_extension("svg");
        }
        if path.is_absolute() {
            path
        } else {
            config.templates_path.join(path)
        }
    }
}

impl BatchConvertArgs {
    /// Execute the batch-convert command
    pub fn execute(&self) -> CliResult<()> {
        let (config, _) = load_session()?;
        let store = load_store(&config)?;
        let palette = store.get(&self.from_theme)?;

        let inputs = self.collect_inputs()?;
        if inputs.is_empty() {
            return Err(CliError::validation(
                "No SVG files to convert (pass files, --files, --input, or --input-dir)",
            ));
        }

        let output_dir = self
            .output_dir
            .clone()
            .unwrap_or_else(|| config.templates_path.clone());

        let mut failures = 0usize;
        for input in &inputs {
            let target = output_dir.join(format!("{}{}.svg", file_stem(input), self.suffix));
            match convert_one(input, palette, &target) {
                Ok(mapping) => println!(
                    "✓ {} -> {} ({} mapped, {} unmapped)",
                    input.display(),
                    target.display(),
                    mapping.mapped.len(),
                    mapping.unmapped.len()
                ),
                Err(e) => {
                    failures += 1;
                    eprintln!("✗ {}: {}", input.display(), e);
                }
            }
        }

        println!();
        println!(
            "Converted {} of {} files with theme '{}'",
            inputs.len() - failures,
            inputs.len(),
            self.from_theme
        );

        if failures > 0 {
            return Err(CliError::validation(format!(
                "{failures} of {} files failed to convert",
                inputs.len()
            )));
        }
        Ok(())
    }

    /// Positional files, then `--files`, then `--input` matches, then
    /// `--input-dir` contents; SVGs only, first occurrence wins.
    fn collect_inputs(&self) -> CliResult<Vec<PathBuf>> {
        let mut inputs: Vec<PathBuf> = Vec::new();
        let mut push = |path: PathBuf| {
            if is_svg(&path) && !inputs.contains(&path) {
                inputs.push(path);
            }
        };

        for path in self.inputs.iter().chain(&self.files) {
            push(path.clone());
        }

        if let Some(pattern) = &self.input {
            let matches = glob::glob(pattern).map_err(|e| {
                CliError::validation(format!("Invalid input pattern '{pattern}': {e}"))
            })?;
            for path in matches.flatten().filter(|p| p.is_file()) {
                push(path);
            }
        }

        if let Some(dir) = &self.input_dir {
            if !dir.is_dir() {
                return Err(CliError::validation(format!(
                    "Input directory not found: {}",
                    dir.display()
                )));
            }
            let entries = fs::read_dir(dir)
                .map_err(|e| CliError::io(format!("Failed to read {}: {e}", dir.display())))?;
            let mut paths: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
            paths.sort();
            for path in paths.into_iter().filter(|p| p.is_file()) {
                push(path);
            }
        }

        Ok(inputs)
    }
}

fn convert_one(input: &Path, palette: &Palette, target: &Path) -> CliResult<ColorMapping> {
    let doc = read_svg(input)?;
    if extract_colors(&doc).is_empty() {
        return Err(CliError::validation("no colors found"));
    }
    let mapping = map_to_palette(&doc, MappingStrategy::ByPalette(palette))?;
    if mapping.is_empty() {
        return Err(CliError::validation("no colors matched the palette"));
    }
    write_template(target, &rewrite(&doc, &mapping))?;
    Ok(mapping)
}

fn load_store(config: &Config) -> CliResult<PaletteStore> {
    PaletteStore::load(&config.themes_path)
        .map_err(|e| CliError::io(format!("Failed to load palettes: {e:#}")))
}

fn read_svg(path: &Path) -> CliResult<String> {
    if !path.is_file() {
        return Err(CliError::validation(format!(
            "SVG file not found: {}",
            path.display()
        )));
    }
    fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("Failed to read {}: {e}", path.display())))
}

fn write_template(path: &Path, content: &str) -> CliResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| CliError::io(format!("Failed to create {}: {e}", parent.display())))?;
    }
    fs::write(path, content)
        .map_err(|e| CliError::io(format!("Failed to write {}: {e}", path.display())))
}

fn print_mapping(mapping: &ColorMapping) {
    println!("Color mappings:");
    for (color, slot) in &mapping.mapped {
        println!("  {color} -> {}", slot.token());
    }
}

fn print_unmapped(colors: &[RgbColor]) {
    println!();
    println!("Warning: these colors were not mapped and remain unchanged:");
    for color in colors {
        println!("  {color}");
    }
    println!("Use --map or --interactive to assign them manually.");
    println!();
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| "template".to_string(), |s| s.to_string_lossy().to_string())
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}
