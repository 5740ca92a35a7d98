//! On-screen notifications for Plex Home Theater clients
//!
//! [`PlexNotifier::notify`] fans a message out to every configured client in
//! turn. The event wrappers add the per-event enable flags and the fixed
//! wording; [`PlexNotifier::test_notify`] skips all flags so a settings page
//! can check a host before saving it.

use tracing::{debug, info};

use crate::client::command::non_empty;
use crate::client::{CommandSender, NetworkManager};
use crate::config::{PlexSettings, Settings};
use crate::types::event::{subtitle_message, update_message};
use crate::types::{HostResult, NotifyCommand, NotifyEvent, NotifyReport};
use crate::{Result, error::format_error};

/// Title used when the caller does not supply one
pub const DEFAULT_TITLE: &str = "SickGear";

/// Message and title of [`PlexNotifier::test_notify`]
pub const TEST_MESSAGE: &str = "This is a test notification from SickGear";
pub const TEST_TITLE: &str = "Test";

/// Optional arguments of [`PlexNotifier::notify`]
#[derive(Debug, Clone, Default)]
pub struct NotifyOptions<'a> {
    /// Notification title, defaults to [`DEFAULT_TITLE`]
    pub title: Option<&'a str>,
    /// Comma-separated `host:port` list, defaults to the configured hosts
    pub host: Option<&'a str>,
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
    /// Send even when notifications are disabled
    pub force: bool,
}

impl<'a> NotifyOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_host(mut self, host: &'a str) -> Self {
        self.host = Some(host);
        self
    }

    pub fn with_credentials(mut self, username: Option<&'a str>, password: Option<&'a str>) -> Self {
        self.username = username;
        self.password = password;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// Split a comma-separated host list, trimming whitespace and dropping
/// empty entries
pub fn split_hosts(hosts: &str) -> Vec<&str> {
    hosts
        .split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .collect()
}

/// Notification sender for one or more Plex Home Theater clients
#[derive(Debug, Clone)]
pub struct PlexNotifier {
    settings: PlexSettings,
    sender: CommandSender,
}

impl PlexNotifier {
    /// Build a notifier with its own HTTP client
    pub fn new(settings: &Settings) -> Result<Self> {
        let network = NetworkManager::new(&settings.network)?;
        Ok(Self::with_network(settings.plex.clone(), network))
    }

    /// Build a notifier on top of an existing HTTP client
    pub fn with_network(settings: PlexSettings, network: NetworkManager) -> Self {
        let sender = CommandSender::new(network, settings.clone());
        Self { settings, sender }
    }

    pub fn settings(&self) -> &PlexSettings {
        &self.settings
    }

    /// Send `message` to every host
    ///
    /// Returns `None` without touching the network when notifications are
    /// disabled and `force` is not set. Otherwise every host is tried, even
    /// after a failure, and the per-host results are returned.
    pub async fn notify(&self, message: &str, options: NotifyOptions<'_>) -> Option<NotifyReport> {
        if !self.settings.enabled && !options.force {
            debug!("PLEX: Notifications disabled, not sending '{}'", message);
            return None;
        }

        let title = options.title.unwrap_or(DEFAULT_TITLE);
        let hosts = non_empty(options.host).unwrap_or(&self.settings.host);
        let command = NotifyCommand::notification(title, message);

        let mut report = NotifyReport::new();
        for host in split_hosts(hosts) {
            info!("PLEX: Sending notification to '{}' - {}", host, message);

            let result = match self
                .sender
                .send(&command, Some(host), options.username, options.password)
                .await
            {
                Ok(_) => HostResult::ok(host),
                Err(e) => HostResult::failed(host, format_error(&e)),
            };
            report.push(result);
        }

        Some(report)
    }

    async fn notify_event(&self, event: NotifyEvent, enabled: bool, message: &str) -> Option<NotifyReport> {
        if !enabled {
            debug!("PLEX: {} notifications are off", event);
            return None;
        }
        self.notify(message, NotifyOptions::new().with_title(event.title()))
            .await
    }

    /// "Started Download" notification for an episode
    pub async fn notify_snatch(&self, ep_name: &str) -> Option<NotifyReport> {
        self.notify_event(NotifyEvent::Snatch, self.settings.notify_on_snatch, ep_name)
            .await
    }

    /// "Download Finished" notification for an episode
    pub async fn notify_download(&self, ep_name: &str) -> Option<NotifyReport> {
        self.notify_event(
            NotifyEvent::Download,
            self.settings.notify_on_download,
            ep_name,
        )
        .await
    }

    /// "Subtitle Download Finished" notification, message `<episode>: <lang>`
    pub async fn notify_subtitle_download(&self, ep_name: &str, lang: &str) -> Option<NotifyReport> {
        self.notify_event(
            NotifyEvent::SubtitleDownload,
            self.settings.notify_on_subtitle_download,
            &subtitle_message(ep_name, lang),
        )
        .await
    }

    /// Update-available notification; an unknown version is shown as `??`
    pub async fn notify_update_available(&self, new_version: Option<&str>) -> Option<NotifyReport> {
        self.notify_event(
            NotifyEvent::UpdateAvailable,
            self.settings.notify_on_update,
            &update_message(new_version),
        )
        .await
    }

    /// Send a test notification regardless of every enable flag
    pub async fn test_notify(
        &self,
        host: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
    ) -> NotifyReport {
        let mut options = NotifyOptions::new()
            .with_title(TEST_TITLE)
            .with_credentials(username, password)
            .with_force(true);
        options.host = host;

        self.notify(TEST_MESSAGE, options).await.unwrap_or_default()
    }
}
