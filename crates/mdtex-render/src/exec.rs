//! External command execution.
//!
//! A thin builder over [`std::process::Command`] that captures output and maps
//! a non-zero exit into [`RenderError::Process`].
//!
//! ```ignore
//! let output = Cmd::new("dvisvgm")
//!     .args(["--no-fonts", "-s"])
//!     .arg(&base)
//!     .run()?;
//! ```

use std::ffi::{OsStr, OsString};
use std::process::{Command, Output, Stdio};

use crate::error::RenderError;

/// Command builder for a single blocking subprocess call.
#[derive(Debug, Default)]
pub(crate) struct Cmd {
    program: OsString,
    args: Vec<OsString>,
}

impl Cmd {
    /// Create a new command builder.
    pub(crate) fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            args: Vec::new(),
        }
    }

    /// Add a single argument.
    pub(crate) fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.args.push(arg.as_ref().to_owned());
        self
    }

    /// Add multiple arguments.
    pub(crate) fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(args.into_iter().map(|a| a.as_ref().to_owned()));
        self
    }

    /// Command line as a single string, for logs and error messages.
    pub(crate) fn command_line(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(|s| s.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run to completion and return the captured output.
    ///
    /// Stdin is closed so a tool waiting on the terminal sees EOF instead of
    /// blocking. There is no timeout.
    pub(crate) fn run(self) -> Result<Output, RenderError> {
        let command = self.command_line();
        tracing::debug!(%command, "Running external command");

        let output = match Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .output()
        {
            Ok(output) => output,
            Err(source) => return Err(RenderError::Spawn { command, source }),
        };

        if !output.status.success() {
            tracing::debug!(
                %command,
                stdout = %String::from_utf8_lossy(&output.stdout),
                stderr = %String::from_utf8_lossy(&output.stderr),
                "External command failed"
            );
            return Err(RenderError::Process {
                command,
                status: output.status,
            });
        }

        Ok(output)
    }
}
