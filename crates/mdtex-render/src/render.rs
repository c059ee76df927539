//! `TikZ` source to themed inline SVG.
//!
//! This module provides [`TexRenderer`], which runs the full pipeline for one
//! code block: write a standalone document into a scoped temp directory,
//! compile it to DVI, convert the DVI to SVG, normalize colors and wrap the
//! SVG in a centered `<div>`.

use std::fs;

use crate::color::{ColorTheme, normalize_colors_with};
use crate::consts::{DOCUMENT_STEM, TEMP_DIR_PREFIX, WRAPPER_STYLE};
use crate::document::DocumentTemplate;
use crate::error::RenderError;
use crate::toolchain::Toolchain;

/// Renders `TikZ` source to an HTML fragment with an inline SVG.
///
/// Holds no per-call state, so one renderer can be shared across threads.
/// Every call gets its own temp directory.
///
/// # Example
///
/// ```ignore
/// use mdtex_render::{TexRenderer, Toolchain, ToolCommand};
///
/// let renderer = TexRenderer::new()
///     .toolchain(Toolchain::default().latex(ToolCommand::new("pdflatex")));
/// let html = renderer.render(r"\begin{tikzpicture}\draw (0,0) circle (1);\end{tikzpicture}", "")?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct TexRenderer {
    toolchain: Toolchain,
    template: DocumentTemplate,
    theme: ColorTheme,
}

impl TexRenderer {
    /// Renderer with `lualatex`, `dvisvgm`, the `tikz` preamble and the default theme.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the external programs.
    #[must_use]
    pub fn toolchain(mut self, toolchain: Toolchain) -> Self {
        self.toolchain = toolchain;
        self
    }

    /// Set the document preamble.
    #[must_use]
    pub fn template(mut self, template: DocumentTemplate) -> Self {
        self.template = template;
        self
    }

    /// Set the color references used for white and black.
    #[must_use]
    pub fn theme(mut self, theme: ColorTheme) -> Self {
        self.theme = theme;
        self
    }

    /// The configured toolchain.
    #[must_use]
    pub fn tools(&self) -> &Toolchain {
        &self.toolchain
    }

    /// Render `source` and wrap it. `css_class` may be empty.
    ///
    /// Any failure aborts the render; nothing partial is returned.
    pub fn render(&self, source: &str, css_class: &str) -> Result<String, RenderError> {
        let svg = self.compile_svg(source)?;
        let svg = normalize_colors_with(&svg, &self.theme);
        Ok(wrap_svg(&svg, css_class))
    }

    /// Compile to raw SVG text. The temp directory is removed when this returns.
    fn compile_svg(&self, source: &str) -> Result<String, RenderError> {
        let dir = tempfile::Builder::new()
            .prefix(TEMP_DIR_PREFIX)
            .tempdir()?;
        let base = dir.path().join(DOCUMENT_STEM);
        let tex_path = base.with_extension("tex");

        tracing::debug!(dir = %dir.path().display(), "Rendering TikZ block");
        fs::write(&tex_path, self.template.build(source))?;

        self.toolchain.compile_dvi(&tex_path, dir.path())?;
        let stdout = self.toolchain.convert_svg(&base)?;

        Ok(String::from_utf8(stdout)?)
    }
}

/// Class attribute for the wrapper, empty when `css_class` is empty.
///
/// The class is inserted as is.
#[must_use]
pub fn class_attribute(css_class: &str) -> String {
    if css_class.is_empty() {
        String::new()
    } else {
        format!(r#" class="{css_class}""#)
    }
}

/// Wrap an SVG in the centered, `currentColor`-filled `<div>`.
#[must_use]
pub fn wrap_svg(svg: &str, css_class: &str) -> String {
    format!(
        r#"<div{} style="{WRAPPER_STYLE}">{svg}</div>"#,
        class_attribute(css_class)
    )
}
