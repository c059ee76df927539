//! The two external programs behind a render: a `TeX` engine producing DVI and
//! `dvisvgm` turning DVI into SVG.

use std::path::{Path, PathBuf};

use crate::consts::{DEFAULT_DVISVGM, DEFAULT_LATEX};
use crate::error::RenderError;
use crate::exec::Cmd;

/// A program plus leading arguments, e.g. `lualatex` or `["docker", "run", ..., "lualatex"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    /// Program name (looked up on `PATH`) or path.
    pub program: PathBuf,
    /// Arguments placed before the ones the renderer adds.
    pub args: Vec<String>,
}

impl ToolCommand {
    /// Command with no leading arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Build from an argv-style list. Returns `None` for an empty list.
    pub fn from_argv<S: AsRef<str>>(argv: &[S]) -> Option<Self> {
        let (program, rest) = argv.split_first()?;
        Some(Self {
            program: PathBuf::from(program.as_ref()),
            args: rest.iter().map(|a| a.as_ref().to_owned()).collect(),
        })
    }

    fn cmd(&self) -> Cmd {
        Cmd::new(&self.program).args(&self.args)
    }
}

/// Availability of one toolchain program on this machine.
#[derive(Debug)]
pub struct ToolStatus {
    /// Role of the program (`"latex"` or `"dvisvgm"`).
    pub role: &'static str,
    /// Program as configured.
    pub program: PathBuf,
    /// Resolved executable, `None` if it could not be found.
    pub resolved: Option<PathBuf>,
}

/// External compilers used to render a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    latex: ToolCommand,
    dvisvgm: ToolCommand,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            latex: ToolCommand::new(DEFAULT_LATEX),
            dvisvgm: ToolCommand::new(DEFAULT_DVISVGM),
        }
    }
}

impl Toolchain {
    /// Replace the `TeX` engine.
    #[must_use]
    pub fn latex(mut self, latex: ToolCommand) -> Self {
        self.latex = latex;
        self
    }

    /// Replace the DVI to SVG converter.
    #[must_use]
    pub fn dvisvgm(mut self, dvisvgm: ToolCommand) -> Self {
        self.dvisvgm = dvisvgm;
        self
    }

    /// Compile `tex_path` to DVI inside `out_dir`, never waiting on the terminal.
    pub(crate) fn compile_dvi(&self, tex_path: &Path, out_dir: &Path) -> Result<(), RenderError> {
        self.latex
            .cmd()
            .args(["--output-format=dvi", "--interaction=nonstopmode"])
            .arg("--output-directory")
            .arg(out_dir)
            .arg(tex_path)
            .run()?;
        Ok(())
    }

    /// Convert `<base>.dvi` to SVG on stdout, with glyphs drawn as paths.
    pub(crate) fn convert_svg(&self, base: &Path) -> Result<Vec<u8>, RenderError> {
        let output = self
            .dvisvgm
            .cmd()
            .args(["--no-fonts", "-s"])
            .arg(base)
            .run()?;
        Ok(output.stdout)
    }

    /// Look up both programs on `PATH`.
    #[must_use]
    pub fn check(&self) -> Vec<ToolStatus> {
        [("latex", &self.latex), ("dvisvgm", &self.dvisvgm)]
            .into_iter()
            .map(|(role, tool)| ToolStatus {
                role,
                program: tool.program.clone(),
                resolved: which::which(&tool.program).ok(),
            })
            .collect()
    }
}
