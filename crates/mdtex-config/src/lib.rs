//! Configuration management for mdtex.
//!
//! Parses `mdtex.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! Toolchain commands support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `toolchain.latex`
//! - `toolchain.dvisvgm`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the `TeX` engine program.
    pub latex: Option<String>,
    /// Override the DVI to SVG converter program.
    pub dvisvgm: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdtex.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// External programs.
    pub toolchain: ToolchainConfig,
    /// Standalone document preamble.
    pub document: DocumentConfig,
    /// Color references substituted into the SVG.
    pub theme: ThemeConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// A command given either as a single program or as an argv list.
///
/// ```toml
/// latex = "lualatex"
/// latex = ["docker", "run", "--rm", "texlive", "lualatex"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CommandSpec {
    Program(String),
    Argv(Vec<String>),
}

impl CommandSpec {
    /// The command as an argv list, program first.
    #[must_use]
    pub fn argv(&self) -> Vec<String> {
        match self {
            Self::Program(program) => vec![program.clone()],
            Self::Argv(argv) => argv.clone(),
        }
    }
}

/// Toolchain configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// `TeX` engine producing DVI.
    pub latex: CommandSpec,
    /// DVI to SVG converter.
    pub dvisvgm: CommandSpec,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            latex: CommandSpec::Program("lualatex".to_owned()),
            dvisvgm: CommandSpec::Program("dvisvgm".to_owned()),
        }
    }
}

/// Document preamble configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Options for the `standalone` document class.
    pub class_options: Vec<String>,
    /// Packages loaded with `\usepackage`.
    pub packages: Vec<String>,
    /// Extra preamble lines (e.g. `\usetikzlibrary{calc}`).
    pub preamble: Vec<String>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            class_options: vec!["dvisvgm".to_owned()],
            packages: vec!["tikz".to_owned()],
            preamble: Vec::new(),
        }
    }
}

/// Theme color configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Replacement for white.
    pub background: String,
    /// Replacement for black.
    pub foreground: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: "var(--md-default-bg-color,#fff)".to_owned(),
            foreground: "currentColor".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`toolchain.latex`").
        field: String,
        /// Error message (e.g., "${`TEXBIN`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a command to name a program.
fn require_command(spec: &CommandSpec, field: &str) -> Result<(), ConfigError> {
    match spec.argv().first() {
        Some(program) => require_non_empty(program, field),
        None => Err(ConfigError::Validation(format!(
            "{field} must name a program"
        ))),
    }
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdtex.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(latex) = &settings.latex {
            self.toolchain.latex = CommandSpec::Program(latex.clone());
        }
        if let Some(dvisvgm) = &settings.dvisvgm {
            self.toolchain.dvisvgm = CommandSpec::Program(dvisvgm.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse, expand and validate configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns error on invalid TOML, unset environment variables or invalid values.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_command(&self.toolchain.latex, "toolchain.latex")?;
        require_command(&self.toolchain.dvisvgm, "toolchain.dvisvgm")?;

        for package in &self.document.packages {
            require_non_empty(package, "document.packages")?;
        }
        for option in &self.document.class_options {
            require_non_empty(option, "document.class_options")?;
        }

        require_non_empty(&self.theme.background, "theme.background")?;
        require_non_empty(&self.theme.foreground, "theme.foreground")?;

        Ok(())
    }

    /// Expand environment variable references in toolchain commands.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.toolchain.latex = CommandSpec::Argv(expand::expand_all(
            &self.toolchain.latex.argv(),
            "toolchain.latex",
        )?);
        self.toolchain.dvisvgm = CommandSpec::Argv(expand::expand_all(
            &self.toolchain.dvisvgm.argv(),
            "toolchain.dvisvgm",
        )?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.toolchain.latex.argv(), vec!["lualatex"]);
        assert_eq!(config.toolchain.dvisvgm.argv(), vec!["dvisvgm"]);
        assert_eq!(config.document.class_options, vec!["dvisvgm"]);
        assert_eq!(config.document.packages, vec!["tikz"]);
        assert!(config.document.preamble.is_empty());
        assert_eq!(config.theme.background, "var(--md-default-bg-color,#fff)");
        assert_eq!(config.theme.foreground, "currentColor");
        assert!(config.config_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.toolchain.latex.argv(), vec!["lualatex"]);
        assert_eq!(config.document.packages, vec!["tikz"]);
    }

    #[test]
    fn test_parse_toolchain_program() {
        let config = Config::from_toml(
            r#"
[toolchain]
latex = "pdflatex"
"#,
        )
        .unwrap();
        assert_eq!(config.toolchain.latex.argv(), vec!["pdflatex"]);
        assert_eq!(config.toolchain.dvisvgm.argv(), vec!["dvisvgm"]);
    }

    #[test]
    fn test_parse_toolchain_argv() {
        let config = Config::from_toml(
            r#"
[toolchain]
dvisvgm = ["docker", "run", "--rm", "texlive", "dvisvgm"]
"#,
        )
        .unwrap();
        assert_eq!(
            config.toolchain.dvisvgm.argv(),
            vec!["docker", "run", "--rm", "texlive", "dvisvgm"]
        );
    }

    #[test]
    fn test_parse_document_and_theme() {
        let config = Config::from_toml(
            r#"
[document]
class_options = ["dvisvgm", "border=1pt"]
packages = ["tikz", "pgfplots"]
preamble = ['\usetikzlibrary{arrows.meta}']

[theme]
background = "var(--bg)"
foreground = "var(--fg)"
"#,
        )
        .unwrap();
        assert_eq!(config.document.class_options, vec!["dvisvgm", "border=1pt"]);
        assert_eq!(config.document.packages, vec!["tikz", "pgfplots"]);
        assert_eq!(
            config.document.preamble,
            vec!["\\usetikzlibrary{arrows.meta}"]
        );
        assert_eq!(config.theme.background, "var(--bg)");
        assert_eq!(config.theme.foreground, "var(--fg)");
    }

    #[test]
    fn test_env_expansion_with_default() {
        let config = Config::from_toml(
            r#"
[toolchain]
latex = "${MDTEX_CONFIG_TEST_UNSET:-/opt/texlive/bin}/lualatex"
"#,
        )
        .unwrap();
        assert_eq!(
            config.toolchain.latex.argv(),
            vec!["/opt/texlive/bin/lualatex"]
        );
    }

    #[test]
    fn test_env_expansion_unset_is_error() {
        let err = Config::from_toml(
            r#"
[toolchain]
latex = "${MDTEX_CONFIG_TEST_UNSET}/lualatex"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("toolchain.latex"));
    }

    #[test]
    fn test_empty_program_rejected() {
        let err = Config::from_toml("[toolchain]\nlatex = \"\"\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: toolchain.latex cannot be empty"
        );
    }

    #[test]
    fn test_empty_argv_rejected() {
        let err = Config::from_toml("[toolchain]\ndvisvgm = []\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: toolchain.dvisvgm must name a program"
        );
    }

    #[test]
    fn test_empty_package_rejected() {
        let err = Config::from_toml("[document]\npackages = [\"tikz\", \" \"]\n").unwrap_err();
        assert!(err.to_string().contains("document.packages"));
    }

    #[test]
    fn test_empty_theme_rejected() {
        let err = Config::from_toml("[theme]\nforeground = \"\"\n").unwrap_err();
        assert!(err.to_string().contains("theme.foreground"));
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml("[toolchain\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[toolchain]\nlatex = \"xelatex\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.toolchain.latex.argv(), vec!["xelatex"]);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_path() {
        let err = Config::load(Some(Path::new("/nonexistent/mdtex.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();

        let overrides = CliSettings {
            latex: Some("pdflatex".to_owned()),
            dvisvgm: Some("/usr/local/bin/dvisvgm".to_owned()),
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.toolchain.latex.argv(), vec!["pdflatex"]);
        assert_eq!(
            config.toolchain.dvisvgm.argv(),
            vec!["/usr/local/bin/dvisvgm"]
        );
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.toolchain.latex.argv(), vec!["lualatex"]);
        assert_eq!(config.toolchain.dvisvgm.argv(), vec!["dvisvgm"]);
    }

    #[test]
    fn test_cli_override_validated() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("mdtex.toml");
        std::fs::write(&path, "").unwrap();

        let overrides = CliSettings {
            latex: Some(String::new()),
            ..Default::default()
        };

        let err = Config::load(Some(&path), Some(&overrides)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
