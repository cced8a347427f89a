//! CLI command handlers for ppr.
//!
//! Each subcommand is an `Args` struct with an `execute` method returning a
//! [`CliResult`](common::CliResult); `main` maps failures to exit codes.

pub mod common;
pub mod config;
pub mod convert;
pub mod cycle;
pub mod extract;
pub mod generate;
pub mod init;
pub mod list;
pub mod switch;
pub mod wallpaper;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use convert::{BatchConvertArgs, ConvertTemplateArgs};
pub use cycle::CycleArgs;
pub use extract::ExtractColorsArgs;
pub use generate::GenerateArgs;
pub use init::InitArgs;
pub use list::{ListTemplatesArgs, ListThemesArgs};
pub use switch::SwitchCurrentArgs;
pub use wallpaper::SetWallpaperArgs;
