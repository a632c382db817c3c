//! Configuration loading: path resolution, parsing, and extraction of the
//! layout set.

pub mod layouts;
pub mod parser;
pub mod scope;
pub mod value;

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::ConfigError;
use crate::layout::MonitorLayout;

/// All candidate layouts loaded from the configuration file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub layouts: Vec<MonitorLayout>,
}

impl Config {
    /// Load the configuration from `path`, or from the default location
    /// when `path` is `None`.
    ///
    /// A missing file is not an error: it yields an empty layout set with a
    /// warning, and the caller falls back to the auto layout.
    ///
    /// # Errors
    ///
    /// Structural parse failures, unreadable files, and an undeterminable
    /// default path are returned as [`ConfigError`].
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_path()?,
        };
        if !path.exists() {
            warn!(path = %path.display(), "config file does not exist");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse_text(&text)
    }

    /// Parse configuration text into the layout set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on structural parse failures; the partially
    /// built scope tree is released with the error return.
    pub fn parse_text(text: &str) -> Result<Self, ConfigError> {
        let tree = parser::parse_str(text)?;
        Ok(Self {
            layouts: layouts::from_tree(&tree),
        })
    }
}

/// The default config path:
/// `$XDG_CONFIG_HOME/xrandr-setup/xrandr-setup.toml`, with
/// `$HOME/.config` standing in when `XDG_CONFIG_HOME` is unset.
///
/// # Errors
///
/// Fails when neither `XDG_CONFIG_HOME` nor `HOME` is set.
pub fn default_path() -> Result<PathBuf, ConfigError> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .ok_or_else(|| {
            ConfigError::NoPath("neither XDG_CONFIG_HOME nor HOME is set".to_string())
        })?;
    Ok(base.join("xrandr-setup").join("xrandr-setup.toml"))
}
