//! `mdtex check` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdtex_config::Config;

use super::renderer_from_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover mdtex.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or a program is missing.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let renderer = renderer_from_config(&config)?;

        let mut missing = Vec::new();
        for status in renderer.tools().check() {
            let program = status.program.display();
            if let Some(path) = &status.resolved {
                output.success(&format!("{}: {program} ({})", status.role, path.display()));
            } else {
                output.error(&format!("{}: {program} not found", status.role));
                missing.push(status.role);
            }
        }

        if missing.is_empty() {
            output.info("Toolchain OK");
            Ok(())
        } else {
            Err(CliError::Validation(format!(
                "missing toolchain programs: {}",
                missing.join(", ")
            )))
        }
    }
}
