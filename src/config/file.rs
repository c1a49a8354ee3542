//! Configuration file support for persistent settings.
//!
//! This module loads configuration from a TOML file located at
//! `~/.config/project-info/config.toml` (or the platform-specific
//! equivalent). Configuration file values serve as defaults that can be
//! overridden by CLI arguments.
//!
//! # Layering
//!
//! The precedence order is: **CLI argument > config file > hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! format = "json"
//! pretty = true
//! # dir = "~/work/my-maven-project"
//!
//! [inspection]
//! threads = 4
//! reports_dir = "surefire-reports"
//! classpath_file = "classpath.txt"
//!
//! [properties]
//! "maven.compiler.source" = "17"
//! ```

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::Deserialize;

/// Top-level configuration file structure.
///
/// All fields are `Option<T>` so we can detect which values are present in the
/// config file and apply layered configuration (CLI > config file > defaults).
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Default output format (`"json"` or `"text"`)
    pub format: Option<String>,

    /// Whether JSON output is pretty-printed
    pub pretty: Option<bool>,

    /// Default project directory
    pub dir: Option<PathBuf>,

    /// Inspection options
    #[serde(default)]
    pub inspection: FileInspectConfig,

    /// User properties applied to every module
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

/// Inspection options from the configuration file.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileInspectConfig {
    /// Number of threads for module inspection
    pub threads: Option<usize>,

    /// Test report directory name under each build directory
    pub reports_dir: Option<String>,

    /// Resolved classpath file name under each build directory
    pub classpath_file: Option<String>,
}

/// Expand a leading `~` in a path to the user's home directory.
///
/// Paths that don't start with `~` are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// `None` if the platform configuration directory cannot be determined.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("project-info").join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// A missing file yields the default (empty) configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read, or
    /// contains invalid TOML or unexpected fields.
    pub fn load() -> anyhow::Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file at {}: {e}", path.display())
        })?;

        toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file at {}: {e}", path.display())
        })
    }
}
