//! Configuration file discovery and loading
//!
//! Loading runs before logging is set up, so nothing here logs. The caller
//! gets a [`ConfigSource`] back and reports it once tracing is initialized.

use crate::{Result, config::Settings};
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV_VAR: &str = "PLEX_NOTIFIER_CONFIG";

/// Where the file layer of the settings came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Settings were read from this file
    File(PathBuf),
    /// A file was requested but does not exist
    Missing(PathBuf),
    /// No file was requested and none exists at the default location
    Defaults,
}

impl ConfigSource {
    /// Pick the config file
    ///
    /// Priority:
    /// 1. `explicit` (the `--config` option)
    /// 2. PLEX_NOTIFIER_CONFIG environment variable
    /// 3. ~/.config/plex-notifier/config.toml (or platform equivalent)
    ///
    /// A requested file that does not exist is reported as [`ConfigSource::Missing`]
    /// rather than silently replaced by the default location.
    pub fn resolve(explicit: Option<&Path>) -> Self {
        let requested = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

        match requested {
            Some(path) if path.exists() => ConfigSource::File(path),
            Some(path) => ConfigSource::Missing(path),
            None => default_config_path()
                .filter(|path| path.exists())
                .map_or(ConfigSource::Defaults, ConfigSource::File),
        }
    }

    /// The file to read, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::File(path) => Some(path),
            ConfigSource::Missing(_) | ConfigSource::Defaults => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Missing(path) => write!(f, "{} (not found)", path.display()),
            ConfigSource::Defaults => f.write_str("built-in defaults"),
        }
    }
}

/// `<config dir>/plex-notifier/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("plex-notifier").join("config.toml"))
}

/// Builds [`Settings`] from a file, the environment and defaults
#[derive(Debug)]
pub struct ConfigLoader {
    defaults: Settings,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            defaults: Settings::default(),
        }
    }

    /// Load configuration with precedence order:
    /// 1. Command line arguments (applied by the caller afterwards)
    /// 2. Environment variables
    /// 3. Configuration file named by `source`
    /// 4. Default values (lowest priority)
    ///
    /// A bad value in any layer fails the whole load; nothing falls back to
    /// defaults silently.
    pub fn load(&self, source: &ConfigSource) -> Result<Settings> {
        let settings = match source.path() {
            Some(path) => Settings::from_file(path)?,
            None => self.defaults.clone(),
        };

        let settings = settings.apply_env()?;
        settings.validate()?;
        Ok(settings)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
