//! Configuration management for the Plex notifier
//!
//! This module handles loading and validating the settings that are passed
//! into the notifier and the library updater.

pub mod loader;
pub mod settings;

pub use loader::{ConfigLoader, ConfigSource};
pub use settings::{LoggingSettings, NetworkSettings, PlexSettings, Settings};

// Shared by every test that mutates process environment variables
#[cfg(test)]
pub(crate) static ENV_TEST_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
