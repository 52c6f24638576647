//! Configuration parsing and validation
//!
//! # Configuration Files
//!
//! - `asmchart.yaml` - Project root configuration
//! - `charts/*.{xml,yaml}` - Chart descriptions (see `charts_dir`)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::chart::is_identifier;
use crate::error::{Error, Result};

/// Default project file name
pub const CONFIG_FILE: &str = "asmchart.yaml";

/// Root project configuration from `asmchart.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name
    #[serde(default = "default_name")]
    pub name: String,

    /// Directory holding chart descriptions
    #[serde(default = "default_charts_dir")]
    pub charts_dir: String,

    /// Directory generated modules are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Code generation settings
    #[serde(default)]
    pub codegen: CodegenConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            charts_dir: default_charts_dir(),
            output_dir: default_output_dir(),
            codegen: CodegenConfig::default(),
        }
    }
}

fn default_name() -> String {
    "asmchart".to_string()
}

fn default_charts_dir() -> String {
    "charts".to_string()
}

fn default_output_dir() -> String {
    "out".to_string()
}

/// Settings that shape the generated module
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodegenConfig {
    /// Spaces per indentation level
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,

    /// Name of the generated clock register
    #[serde(default = "default_clock_signal")]
    pub clock_signal: String,

    /// Name of the generated state register
    #[serde(default = "default_state_register")]
    pub state_register: String,

    /// Simulated delay between clock toggles
    #[serde(default = "default_clock_half_period")]
    pub clock_half_period: u32,

    /// Emit node labels as comments
    #[serde(default)]
    pub source_comments: bool,

    /// Deepest `if`/`else` nesting a single transition may produce
    #[serde(default = "default_max_nesting")]
    pub max_nesting: usize,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            indent_width: default_indent_width(),
            clock_signal: default_clock_signal(),
            state_register: default_state_register(),
            clock_half_period: default_clock_half_period(),
            source_comments: false,
            max_nesting: default_max_nesting(),
        }
    }
}

fn default_indent_width() -> usize {
    4
}

fn default_clock_signal() -> String {
    "clk".to_string()
}

fn default_state_register() -> String {
    "state".to_string()
}

fn default_clock_half_period() -> u32 {
    5
}

fn default_max_nesting() -> usize {
    64
}

impl CodegenConfig {
    /// One level of indentation
    pub fn indent_unit(&self) -> String {
        " ".repeat(self.indent_width)
    }

    /// Names the generator declares itself
    pub fn reserved_names(&self) -> [&str; 2] {
        [self.clock_signal.as_str(), self.state_register.as_str()]
    }

    /// Reject register names that cannot be declared
    pub fn validate(&self) -> Result<()> {
        for name in self.reserved_names() {
            if !is_identifier(name) {
                return Err(Error::ConfigInvalid {
                    message: format!("'{}' is not a legal register name", name),
                });
            }
        }

        if self.clock_signal == self.state_register {
            return Err(Error::ConfigInvalid {
                message: format!(
                    "clock signal and state register are both named '{}'",
                    self.clock_signal
                ),
            });
        }

        if self.clock_half_period == 0 {
            return Err(Error::ConfigInvalid {
                message: "clock_half_period must be greater than zero".to_string(),
            });
        }

        if self.max_nesting == 0 {
            return Err(Error::ConfigInvalid {
                message: "max_nesting must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

/// Main configuration container
#[derive(Debug, Clone)]
pub struct Config {
    /// Project configuration
    pub project: ProjectConfig,

    /// Base path of the project
    pub base_path: PathBuf,
}

impl Config {
    /// Load configuration from a directory or an `asmchart.yaml` file
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let config = Config::load("./my-project")?;
    /// println!("Charts in: {}", config.charts_dir().display());
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let (config_path, base_path) = Self::locate(path.as_ref());

        if !config_path.exists() {
            return Err(Error::ConfigNotFound {
                path: config_path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(&config_path)?;
        let project: ProjectConfig = serde_yaml::from_str(&contents)?;
        project.codegen.validate()?;

        tracing::debug!("Loaded configuration from {}", config_path.display());

        Ok(Self { project, base_path })
    }

    /// Like [`Config::load`], but fall back to defaults when the file is absent
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match Self::load(path.as_ref()) {
            Err(Error::ConfigNotFound { path: missing }) => {
                tracing::debug!("No configuration at {}, using defaults", missing);
                let (_, base_path) = Self::locate(path.as_ref());
                Ok(Self {
                    project: ProjectConfig::default(),
                    base_path,
                })
            }
            other => other,
        }
    }

    /// Directory holding chart descriptions
    pub fn charts_dir(&self) -> PathBuf {
        self.base_path.join(&self.project.charts_dir)
    }

    /// Directory generated modules are written to
    pub fn output_dir(&self) -> PathBuf {
        self.base_path.join(&self.project.output_dir)
    }

    fn locate(path: &Path) -> (PathBuf, PathBuf) {
        if path.is_dir() {
            (path.join(CONFIG_FILE), path.to_path_buf())
        } else {
            (
                path.to_path_buf(),
                path.parent().unwrap_or(Path::new(".")).to_path_buf(),
            )
        }
    }
}
