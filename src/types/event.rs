//! Notification events and their on-screen wording

use serde::{Deserialize, Serialize};

/// Events that can trigger a client notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyEvent {
    /// An episode was snatched from a provider
    Snatch,
    /// An episode finished downloading and was post-processed
    Download,
    /// Subtitles were fetched for an episode
    SubtitleDownload,
    /// A newer application version is available
    UpdateAvailable,
}

/// Prefix of the update-available message, followed by the version
pub const UPDATE_TEXT: &str = "SickGear Updated To Commit#: ";

/// Version shown when the new version is unknown
pub const UNKNOWN_VERSION: &str = "??";

impl NotifyEvent {
    /// Title displayed for this event
    pub fn title(self) -> &'static str {
        match self {
            NotifyEvent::Snatch => "Started Download",
            NotifyEvent::Download => "Download Finished",
            NotifyEvent::SubtitleDownload => "Subtitle Download Finished",
            NotifyEvent::UpdateAvailable => "SickGear Updated",
        }
    }

    /// Stable name used in logs
    pub fn as_str(self) -> &'static str {
        match self {
            NotifyEvent::Snatch => "snatch",
            NotifyEvent::Download => "download",
            NotifyEvent::SubtitleDownload => "subtitle_download",
            NotifyEvent::UpdateAvailable => "update_available",
        }
    }
}

impl std::fmt::Display for NotifyEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message body for a subtitle download
pub fn subtitle_message(ep_name: &str, lang: &str) -> String {
    format!("{}: {}", ep_name, lang)
}

/// Message body for an available update
pub fn update_message(new_version: Option<&str>) -> String {
    let version = new_version
        .filter(|v| !v.is_empty())
        .unwrap_or(UNKNOWN_VERSION);
    format!("{}{}", UPDATE_TEXT, version)
}
