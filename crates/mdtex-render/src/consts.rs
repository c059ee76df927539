//! Internal constants for `TikZ` rendering.

/// Default `TeX` engine (compiler A).
pub const DEFAULT_LATEX: &str = "lualatex";

/// Default DVI to SVG converter (compiler B).
pub const DEFAULT_DVISVGM: &str = "dvisvgm";

/// File stem for the generated document inside the scoped temp directory.
pub const DOCUMENT_STEM: &str = "tikz";

/// Prefix for per-call temp directories.
pub const TEMP_DIR_PREFIX: &str = "mdtex-";

/// Theme background reference, falling back to white outside `MkDocs` Material.
pub const DEFAULT_BACKGROUND: &str = "var(--md-default-bg-color,#fff)";

/// Theme foreground reference.
pub const DEFAULT_FOREGROUND: &str = "currentColor";

/// Inline style of the wrapper `<div>`.
///
/// `fill` gives glyph outlines from `--no-fonts` the text color.
pub const WRAPPER_STYLE: &str = "text-align:center;fill:currentColor";
