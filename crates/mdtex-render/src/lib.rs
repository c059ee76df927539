//! `TikZ` code block rendering for markdown documentation.
//!
//! This crate turns the body of a `tikz` fenced code block into an inline SVG
//! that follows the page theme:
//! - Wraps the source in a `standalone` document and compiles it to DVI with `lualatex`
//! - Converts the DVI to SVG with `dvisvgm --no-fonts`
//! - Rewrites white and black to theme references (`var(--md-default-bg-color,#fff)`, `currentColor`)
//! - Wraps the SVG in a centered `<div>`
//!
//! # Architecture
//!
//! - [`hook`]: [`TexFormatter`], the fence formatter with source fallback on compiler errors
//! - [`render`]: [`TexRenderer`], the pipeline for a single block
//! - [`toolchain`]: External program configuration and invocation
//! - [`document`]: Standalone document template
//! - [`color`]: Theme-aware color normalization
//!
//! # Example
//!
//! ```ignore
//! use std::collections::HashMap;
//! use mdtex_render::TexFormatter;
//!
//! let formatter = TexFormatter::default();
//! let html = formatter.format(
//!     r"\begin{tikzpicture}\draw (0,0) -- (1,1);\end{tikzpicture}",
//!     "tikz",
//!     "diagram",
//!     &HashMap::new(),
//!     &(),
//! )?;
//! ```

pub mod color;
mod consts;
pub mod document;
mod error;
mod exec;
pub mod hook;
pub mod render;
pub mod toolchain;

pub use color::{ColorTheme, normalize_colors, normalize_colors_with};
pub use consts::{DEFAULT_BACKGROUND, DEFAULT_DVISVGM, DEFAULT_FOREGROUND, DEFAULT_LATEX};
pub use document::DocumentTemplate;
pub use error::RenderError;
pub use hook::{TexFormatter, format_fence};
pub use render::{TexRenderer, class_attribute, wrap_svg};
pub use toolchain::{ToolCommand, ToolStatus, Toolchain};
