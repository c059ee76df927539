//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod render;

pub(crate) use check::CheckArgs;
pub(crate) use render::RenderArgs;

use mdtex_config::Config;
use mdtex_render::{ColorTheme, DocumentTemplate, TexRenderer, ToolCommand, Toolchain};

use crate::error::CliError;

/// Build a renderer from loaded configuration.
pub(crate) fn renderer_from_config(config: &Config) -> Result<TexRenderer, CliError> {
    let latex = tool_command(&config.toolchain.latex.argv(), "toolchain.latex")?;
    let dvisvgm = tool_command(&config.toolchain.dvisvgm.argv(), "toolchain.dvisvgm")?;

    Ok(TexRenderer::new()
        .toolchain(Toolchain::default().latex(latex).dvisvgm(dvisvgm))
        .template(DocumentTemplate {
            class_options: config.document.class_options.clone(),
            packages: config.document.packages.clone(),
            preamble: config.document.preamble.clone(),
        })
        .theme(ColorTheme {
            background: config.theme.background.clone(),
            foreground: config.theme.foreground.clone(),
        }))
}

fn tool_command(argv: &[String], field: &str) -> Result<ToolCommand, CliError> {
    ToolCommand::from_argv(argv)
        .ok_or_else(|| CliError::Validation(format!("{field} must name a program")))
}
