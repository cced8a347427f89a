//! `ppr generate` plus the output flags shared with `switch-current` and `cycle`.

use crate::cli::common::{load_session, CliResult};
use crate::config::Config;
use crate::platform::{CommandWallpaperSetter, Resolution, SystemResolutionProbe};
use crate::services::{Orchestrator, Outcome, RenderOptions};
use clap::Args;
use std::path::PathBuf;

/// Output flags common to every generating command
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Output resolution, e.g. 1920x1080 (detected if omitted)
    #[arg(short, long, value_name = "WxH")]
    pub resolution: Option<Resolution>,

    /// Output directory (defaults to output_path from the config)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// File name of the generated image
    #[arg(short, long, value_name = "NAME")]
    pub filename: Option<String>,

    /// Also write the bound SVG next to the image
    #[arg(long)]
    pub svg: bool,
}

impl OutputArgs {
    /// Converts flags into orchestrator options.
    pub fn to_options(&self, set_wallpaper: bool) -> RenderOptions {
        RenderOptions {
            resolution: self.resolution,
            output_dir: self.output.clone(),
            filename: self.filename.clone(),
            write_svg: self.svg,
            set_wallpaper,
        }
    }
}

/// Generate a wallpaper from a palette and a template
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Palette name
    #[arg(short, long, value_name = "NAME")]
    pub theme: String,

    /// Template path, absolute or relative to the templates directory
    /// (defaults to default_template)
    #[arg(short = 's', long, value_name = "TEMPLATE")]
    pub template: Option<String>,

    /// Install the result as the desktop wallpaper
    #[arg(short = 'w', long)]
    pub set_wallpaper: bool,

    /// Output location and format
    #[command(flatten)]
    pub output: OutputArgs,
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self) -> CliResult<()> {
        let options = self.output.to_options(self.set_wallpaper);
        let outcome = with_orchestrator(|orch| {
            orch.generate(&self.theme, self.template.as_deref(), &options)
        })?;

        print_outcome(&outcome);
        if let Some(history) = &outcome.timestamped {
            println!("  History: {}", history.display());
        }
        Ok(())
    }
}

/// Runs `f` with an orchestrator over the session config and the system
/// adapters.
pub fn with_orchestrator<T>(
    f: impl FnOnce(&mut Orchestrator<'_>) -> anyhow::Result<T>,
) -> CliResult<T> {
    let (mut config, session_path): (Config, PathBuf) = load_session()?;
    let probe = SystemResolutionProbe;
    let setter = CommandWallpaperSetter;
    let mut orchestrator = Orchestrator::new(&mut config, session_path, &probe, &setter);
    Ok(f(&mut orchestrator)?)
}

/// Prints the files a flow produced.
pub fn print_outcome(outcome: &Outcome) {
    let verb = if outcome.rendered { "Generated" } else { "Reused" };
    println!(
        "✓ {verb} wallpaper: {} ({})",
        outcome.named_variant.display(),
        outcome.resolution
    );
    println!("  Theme: {}", outcome.palette);
    println!("  Template: {}", outcome.template);
    println!("  Current: {}", outcome.current.display());
    if let Some(svg) = &outcome.svg {
        println!("  SVG: {}", svg.display());
    }
    if let Some(wallpaper) = &outcome.wallpaper {
        println!("✓ Wallpaper set: {}", wallpaper.display());
    }
}
