//! Fenced code block formatter hook.
//!
//! [`TexFormatter`] is the entry point a markdown pipeline calls for each
//! `tikz` fence. A compiler failure never breaks the page: the hook logs one
//! diagnostic line and hands back the block source unchanged.

use std::any::Any;
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::io::{self, Write};

use crate::error::RenderError;
use crate::render::TexRenderer;

/// Formatter for `tikz` code fences.
#[derive(Debug, Clone, Default)]
pub struct TexFormatter {
    renderer: TexRenderer,
}

impl TexFormatter {
    /// Create a formatter around a configured renderer.
    #[must_use]
    pub fn new(renderer: TexRenderer) -> Self {
        Self { renderer }
    }

    /// The underlying renderer.
    #[must_use]
    pub fn renderer(&self) -> &TexRenderer {
        &self.renderer
    }

    /// Format one code block, writing diagnostics to stderr.
    ///
    /// # Arguments
    ///
    /// * `source` - Block body (`TikZ` source)
    /// * `language` - Fence language; the hook is registered for one language only, so it is ignored
    /// * `css_class` - Class for the wrapper `<div>`, empty for none
    /// * `options` - Fence options; reserved, ignored
    /// * `context` - Caller state; ignored
    ///
    /// Returns the rendered fragment, or `source` unchanged if a compiler
    /// exited unsuccessfully. I/O and UTF-8 errors are returned as `Err`.
    pub fn format<S: BuildHasher>(
        &self,
        source: &str,
        language: &str,
        css_class: &str,
        options: &HashMap<String, String, S>,
        context: &dyn Any,
    ) -> Result<String, RenderError> {
        self.format_with_diagnostics(
            source,
            language,
            css_class,
            options,
            context,
            &mut io::stderr(),
        )
    }

    /// Same as [`format`](Self::format), with an explicit diagnostic sink.
    pub fn format_with_diagnostics<S: BuildHasher>(
        &self,
        source: &str,
        _language: &str,
        css_class: &str,
        _options: &HashMap<String, String, S>,
        _context: &dyn Any,
        diagnostics: &mut dyn Write,
    ) -> Result<String, RenderError> {
        match self.renderer.render(source, css_class) {
            Ok(html) => Ok(html),
            Err(err) if err.is_process_failure() => {
                tracing::debug!(error = %err, "TikZ rendering failed, keeping source");
                let _ = writeln!(diagnostics, "{err}");
                Ok(source.to_owned())
            }
            Err(err) => Err(err),
        }
    }
}

/// Format a `tikz` block with the default toolchain.
///
/// Bare-function form of [`TexFormatter::format`] for callers that register
/// plain functions as fence formatters.
pub fn format_fence<S: BuildHasher>(
    source: &str,
    language: &str,
    css_class: &str,
    options: &HashMap<String, String, S>,
    context: &dyn Any,
) -> Result<String, RenderError> {
    TexFormatter::default().format(source, language, css_class, options, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ToolCommand, Toolchain};

    fn formatter_with_latex(program: &str) -> TexFormatter {
        TexFormatter::new(
            TexRenderer::new().toolchain(Toolchain::default().latex(ToolCommand::new(program))),
        )
    }

    #[test]
    fn test_spawn_failure_propagates() {
        let formatter = formatter_with_latex("/nonexistent/mdtex-lualatex");
        let mut diagnostics = Vec::<u8>::new();
        let err = formatter
            .format_with_diagnostics("x", "tikz", "", &HashMap::new(), &(), &mut diagnostics)
            .unwrap_err();
        assert!(matches!(err, RenderError::Spawn { .. }));
        assert!(err.to_string().contains("/nonexistent/mdtex-lualatex"));
        assert!(diagnostics.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_compiler_failure_returns_source() {
        // `false` ignores its arguments and exits 1.
        let formatter = formatter_with_latex("false");
        let source = "\\begin{tikzpicture}\\draw (0,0);\\end{tikzpicture}";
        let mut diagnostics = Vec::<u8>::new();

        let result = formatter
            .format_with_diagnostics(
                source,
                "tikz",
                "foo",
                &HashMap::new(),
                &(),
                &mut diagnostics,
            )
            .unwrap();

        assert_eq!(result, source);
        let line = String::from_utf8(diagnostics).unwrap();
        assert!(line.starts_with("command `false --output-format=dvi"));
        assert!(line.trim_end().ends_with("exit status: 1"));
        assert_eq!(line.lines().count(), 1);
    }

    #[test]
    fn test_format_fence_never_returns_partial_output() {
        // Without a TeX install the spawn fails; with one, the undefined macro fails to compile.
        let source = "\\undefinedmacro";
        match format_fence(source, "tikz", "", &HashMap::new(), &()) {
            Ok(result) => assert_eq!(result, source),
            Err(err) => assert!(matches!(err, RenderError::Spawn { .. })),
        }
    }

    #[test]
    fn test_options_accept_any_hasher() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::BuildHasherDefault;

        let formatter = formatter_with_latex("/nonexistent/mdtex-lualatex");
        let mut options = HashMap::<String, String, BuildHasherDefault<DefaultHasher>>::default();
        options.insert("scale".to_owned(), "2".to_owned());
        let err = formatter
            .format("x", "tikz", "", &options, &())
            .unwrap_err();
        assert!(matches!(err, RenderError::Spawn { .. }));
    }

    #[test]
    fn test_formatter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TexFormatter>();
    }
}
