//! ppr - Programmable Palette Renderer
//!
//! Renders Base16/Base24 palettes into SVG templates, rasterizes them to the
//! screen resolution, and installs the result as the desktop wallpaper.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ppr::cli::{
    BatchConvertArgs, CliResult, ConfigArgs, ConvertTemplateArgs, CycleArgs, ExtractColorsArgs,
    GenerateArgs, InitArgs, ListTemplatesArgs, ListThemesArgs, SetWallpaperArgs,
    SwitchCurrentArgs,
};

/// Programmable Palette Renderer - palette-driven wallpapers from SVG templates
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the config file and directories
    Init(InitArgs),
    /// List available palettes
    ListThemes(ListThemesArgs),
    /// List available templates
    ListTemplates(ListTemplatesArgs),
    /// Generate a wallpaper from a palette and a template
    Generate(GenerateArgs),
    /// Apply another palette to the current template
    SwitchCurrent(SwitchCurrentArgs),
    /// Render the next preferred template and install it
    Cycle(CycleArgs),
    /// Install an image as the desktop wallpaper
    SetWallpaper(SetWallpaperArgs),
    /// Build a palette from a swatch SVG
    ExtractColors(ExtractColorsArgs),
    /// Turn an SVG into a template
    ConvertTemplate(ConvertTemplateArgs),
    /// Turn many SVGs into templates using one palette
    BatchConvert(BatchConvertArgs),
    /// Show or change configuration
    Config(ConfigArgs),
}

impl Commands {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::Init(args) => args.execute(),
            Self::ListThemes(args) => args.execute(),
            Self::ListTemplates(args) => args.execute(),
            Self::Generate(args) => args.execute(),
            Self::SwitchCurrent(args) => args.execute(),
            Self::Cycle(args) => args.execute(),
            Self::SetWallpaper(args) => args.execute(),
            Self::ExtractColors(args) => args.execute(),
            Self::ConvertTemplate(args) => args.execute(),
            Self::BatchConvert(args) => args.execute(),
            Self::Config(args) => args.execute(),
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = cli.command.execute() {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
