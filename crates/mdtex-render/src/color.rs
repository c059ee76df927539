//! Theme-aware color normalization for `dvisvgm` output.
//!
//! `dvisvgm` writes colors as single-quoted attribute values, either as short
//! hex (`'#fff'`) or as a color name (`'white'`). White becomes a reference to
//! the page background and black becomes `currentColor`, so diagrams follow
//! light and dark themes.

use std::sync::LazyLock;

use regex::Regex;

use crate::consts::{DEFAULT_BACKGROUND, DEFAULT_FOREGROUND};

static WHITE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'#fff'|'white'").unwrap());

static BLACK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'#000'|'black'").unwrap());

/// CSS color references substituted for white and black.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTheme {
    /// Replacement for white, typically a CSS variable with a `#fff` fallback.
    pub background: String,
    /// Replacement for black.
    pub foreground: String,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND.to_owned(),
            foreground: DEFAULT_FOREGROUND.to_owned(),
        }
    }
}

/// Normalize colors using the default theme.
#[must_use]
pub fn normalize_colors(svg: &str) -> String {
    normalize_colors_with(svg, &ColorTheme::default())
}

/// Replace quoted white and black tokens with the theme's references.
///
/// Replacements are written double-quoted so they never match the
/// single-quoted patterns again.
#[must_use]
pub fn normalize_colors_with(svg: &str, theme: &ColorTheme) -> String {
    let background = format!("\"{}\"", theme.background);
    let foreground = format!("\"{}\"", theme.foreground);

    let result = WHITE_RE.replace_all(svg, regex::NoExpand(&background));
    BLACK_RE
        .replace_all(&result, regex::NoExpand(&foreground))
        .into_owned()
}
