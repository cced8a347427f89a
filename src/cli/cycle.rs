//! `ppr cycle`: advance to the next template.

use crate::cli::common::CliResult;
use crate::cli::generate::{print_outcome, with_orchestrator, OutputArgs};
use clap::Args;

/// Render the next template in the preferred list and install it
#[derive(Debug, Clone, Args)]
pub struct CycleArgs {
    /// Palette name (defaults to the current, then the default theme)
    #[arg(value_name = "THEME")]
    pub theme: Option<String>,

    /// Only generate; do not touch the desktop wallpaper
    #[arg(long)]
    pub no_wallpaper: bool,

    /// Output location and format
    #[command(flatten)]
    pub output: OutputArgs,
}

impl CycleArgs {
    /// Execute the cycle command
    pub fn execute(&self) -> CliResult<()> {
        let options = self.output.to_options(!self.no_wallpaper);
        let outcome =
            with_orchestrator(|orch| orch.cycle_template(self.theme.as_deref(), &options))?;

        println!(
            "Cycled to template '{}' with theme '{}'",
            outcome.template, outcome.palette
        );
        print_outcome(&outcome);
        Ok(())
    }
}
