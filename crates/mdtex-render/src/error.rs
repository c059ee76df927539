//! Render error types.

use std::process::ExitStatus;
use std::string::FromUtf8Error;

/// Error raised while rendering a `TikZ` block.
///
/// Only [`RenderError::Process`] is recovered by the formatter hook. The other
/// kinds point at a broken environment rather than broken diagram source and
/// are returned to the caller.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// An external command ran but exited unsuccessfully.
    #[error("command `{command}` failed: {status}")]
    Process {
        /// Full command line, program first.
        command: String,
        /// Exit status reported by the process.
        status: ExitStatus,
    },

    /// An external command could not be started (usually not installed).
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        /// Full command line, program first.
        command: String,
        /// Error from the spawn attempt.
        #[source]
        source: std::io::Error,
    },

    /// Temp directory or file write failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `dvisvgm` wrote something that is not UTF-8.
    #[error("SVG output is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

impl RenderError {
    /// Whether this is a failed external command (compiler error, bad source).
    #[must_use]
    pub fn is_process_failure(&self) -> bool {
        matches!(self, Self::Process { .. })
    }
}
