//! `mdtex render` command implementation.

use std::collections::HashMap;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use console::Term;
use mdtex_config::{CliSettings, Config};
use mdtex_render::TexFormatter;

use super::renderer_from_config;
use crate::error::CliError;

/// Fence language the formatter is registered for.
const FENCE_LANGUAGE: &str = "tikz";

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// File with `TikZ` source (default: read stdin).
    input: Option<PathBuf>,

    /// CSS class for the wrapper element.
    #[arg(long, default_value = "")]
    class: String,

    /// Path to configuration file (default: auto-discover mdtex.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// `TeX` engine (overrides config).
    #[arg(long, env = "MDTEX_LATEX")]
    latex: Option<String>,

    /// DVI to SVG converter (overrides config).
    #[arg(long, env = "MDTEX_DVISVGM")]
    dvisvgm: Option<String>,

    /// Enable verbose output (show config and timing logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// Writes the rendered fragment to stdout, or the unchanged source if a
    /// compiler failed.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the input cannot be read or
    /// the toolchain cannot be run at all.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            latex: self.latex,
            dvisvgm: self.dvisvgm,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let source = read_source(self.input.as_ref())?;
        let formatter = TexFormatter::new(renderer_from_config(&config)?);

        let started = std::time::Instant::now();
        let html = formatter.format(
            &source,
            FENCE_LANGUAGE,
            &self.class,
            &HashMap::new(),
            &(),
        )?;
        tracing::info!(elapsed_ms = started.elapsed().as_millis(), "Render finished");

        Term::stdout().write_str(&html)?;
        Ok(())
    }
}

fn read_source(input: Option<&PathBuf>) -> Result<String, CliError> {
    if let Some(path) = input {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut source = String::new();
    std::io::stdin().read_to_string(&mut source)?;
    Ok(source)
}
