//! `ppr switch-current`: re-theme the current template.

use crate::cli::common::CliResult;
use crate::cli::generate::{print_outcome, with_orchestrator, OutputArgs};
use clap::Args;

/// Apply another palette to the current template
#[derive(Debug, Clone, Args)]
pub struct SwitchCurrentArgs {
    /// Palette name
    #[arg(value_name = "THEME")]
    pub theme: String,

    /// Install the result as the desktop wallpaper
    #[arg(short = 'w', long)]
    pub set_wallpaper: bool,

    /// Output location and format
    #[command(flatten)]
    pub output: OutputArgs,
}

impl SwitchCurrentArgs {
    /// Execute the switch-current command
    pub fn execute(&self) -> CliResult<()> {
        let options = self.output.to_options(self.set_wallpaper);
        let outcome = with_orchestrator(|orch| orch.switch_current(&self.theme, &options))?;

        println!("Switched to theme '{}'", outcome.palette);
        print_outcome(&outcome);
        Ok(())
    }
}
