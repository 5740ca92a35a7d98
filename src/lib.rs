//! Plex Notifier
//!
//! Sends on-screen notifications to Plex Home Theater clients and asks a Plex
//! Media Server to rescan its TV show sections after new episodes arrive.
//!
//! # Features
//!
//! - **Client notifications**: snatch, download, subtitle and update events
//!   delivered through the legacy xbmcCmds HTTP API, to one or many hosts
//! - **Library refresh**: optional Plex.tv sign-in, then a refresh of every
//!   `show` section on the server
//! - **Explicit configuration**: settings come from TOML and environment
//!   variables and are passed in at construction time
//!
//! # Examples
//!
//! ```rust,no_run
//! use plex_notifier::{LibraryUpdater, PlexNotifier, Settings};
//!
//! # async fn example() -> plex_notifier::Result<()> {
//! let mut settings = Settings::default();
//! settings.plex.enabled = true;
//! settings.plex.host = "192.168.1.20:3005".to_string();
//!
//! let notifier = PlexNotifier::new(&settings)?;
//! let report = notifier.test_notify(None, None, None).await;
//! println!("{}", report.summary());
//!
//! let updater = LibraryUpdater::new(&settings)?;
//! let refreshed = updater.update_library(None, None, None).await;
//! # let _ = refreshed;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod library;
pub mod notifier;
pub mod types;
pub mod utils;

pub use config::{ConfigLoader, ConfigSource, PlexSettings, Settings};
pub use error::{Error, Result};
pub use library::{LibraryUpdater, SkipReason, UpdateOutcome};
pub use notifier::{NotifyOptions, PlexNotifier};
pub use types::{HostResult, LibrarySection, NotifyCommand, NotifyEvent, NotifyReport};
