//! Command-line glue for the `plex-notify` binary
//!
//! Shared settings loading and logging setup, plus one module per group of
//! subcommands.

pub mod library;
pub mod notify;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    Settings,
    config::{ConfigLoader, ConfigSource},
    utils::version,
};

/// Load settings with precedence: CLI arguments (applied by the caller),
/// environment, config file (`--config`, PLEX_NOTIFIER_CONFIG or default
/// location), defaults
///
/// Any invalid value is an error. Only a missing file falls back to the
/// defaults, and that is reported by [`report_config_source`].
pub fn load_settings(config: Option<&str>) -> Result<(Settings, ConfigSource)> {
    let source = ConfigSource::resolve(config.map(Path::new));
    let settings = ConfigLoader::new()
        .load(&source)
        .with_context(|| format!("Failed to load configuration from {}", source))?;
    Ok((settings, source))
}

/// Load settings, start logging, then say where the settings came from
pub fn prepare(config: Option<&str>, verbose: bool) -> Result<Settings> {
    let (settings, source) = load_settings(config)?;
    init_logging(&settings, verbose);
    report_config_source(&source);
    Ok(settings)
}

/// Log the outcome of config file discovery; call after [`init_logging`]
pub fn report_config_source(source: &ConfigSource) {
    match source {
        ConfigSource::File(path) => info!("Loaded configuration from {}", path.display()),
        ConfigSource::Missing(path) => warn!(
            "Configuration file not found: {}, using defaults and environment",
            path.display()
        ),
        ConfigSource::Defaults => debug!("No config file found, using defaults and environment"),
    }
}

/// Initialize logging to stderr
///
/// `--verbose` wins, then RUST_LOG, then `logging.level` from settings.
pub fn init_logging(settings: &Settings, verbose: bool) {
    let env_filter = if verbose || settings.logging.verbose {
        EnvFilter::new("debug")
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(&settings.logging.level)
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    debug!("plex-notify {}", version::get_detailed_version());
}
