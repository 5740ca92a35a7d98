//! Configuration settings
//!
//! Settings are loaded from a TOML file and environment variables and then
//! handed to each component explicitly; nothing reads process-wide state
//! after startup.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Plex.tv sign-in endpoint used to exchange credentials for a token
pub const DEFAULT_AUTH_URL: &str = "https://plex.tv/users/sign_in.xml";

/// Client identifier sent with the sign-in request
pub const DEFAULT_CLIENT_IDENTIFIER: &str = "Sick-Beard-Notifier";

// Helper functions for serde defaults
fn default_auth_url() -> String {
    DEFAULT_AUTH_URL.to_string()
}

fn default_client_identifier() -> String {
    DEFAULT_CLIENT_IDENTIFIER.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("plex-notifier/{}", crate::utils::VERSION)
}

/// Main configuration settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Plex hosts, credentials and feature flags
    #[serde(default)]
    pub plex: PlexSettings,
    /// Network configuration
    #[serde(default)]
    pub network: NetworkSettings,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Plex notifier configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct PlexSettings {
    /// Master switch for notifications and library updates
    #[serde(default)]
    pub enabled: bool,
    /// Plex Home Theater client(s), comma separated `host:port`
    #[serde(default)]
    pub host: String,
    /// Plex Media Server `host:port` used for library updates
    #[serde(default)]
    pub server_host: String,
    /// Username for client Basic auth and the Plex.tv sign-in
    #[serde(default)]
    pub username: String,
    /// Password for client Basic auth and the Plex.tv sign-in
    #[serde(default)]
    pub password: String,
    /// Refresh show sections after post-processing
    #[serde(default)]
    pub update_library: bool,
    /// Notify when an episode is snatched
    #[serde(default)]
    pub notify_on_snatch: bool,
    /// Notify when an episode download finishes
    #[serde(default)]
    pub notify_on_download: bool,
    /// Notify when subtitles are downloaded
    #[serde(default)]
    pub notify_on_subtitle_download: bool,
    /// Notify when a new version is available
    #[serde(default)]
    pub notify_on_update: bool,
    /// Sign-in endpoint returning an `authentication-token`
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    /// Value of the `X-Plex-Client-Identifier` header
    #[serde(default = "default_client_identifier")]
    pub client_identifier: String,
}

/// Network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSettings {
    /// Proxy URL applied to every request
    #[serde(default)]
    pub proxy: Option<String>,
    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable verbose logging
    #[serde(default)]
    pub verbose: bool,
}

impl Default for PlexSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            host: String::new(),
            server_host: String::new(),
            username: String::new(),
            password: String::new(),
            update_library: false,
            notify_on_snatch: false,
            notify_on_download: false,
            notify_on_subtitle_download: false,
            notify_on_update: false,
            auth_url: default_auth_url(),
            client_identifier: default_client_identifier(),
        }
    }
}

// Hand-written so the password never ends up in debug logs
impl std::fmt::Debug for PlexSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlexSettings")
            .field("enabled", &self.enabled)
            .field("host", &self.host)
            .field("server_host", &self.server_host)
            .field("username", &self.username)
            .field(
                "password",
                &if self.password.is_empty() { "" } else { "***" },
            )
            .field("update_library", &self.update_library)
            .field("notify_on_snatch", &self.notify_on_snatch)
            .field("notify_on_download", &self.notify_on_download)
            .field(
                "notify_on_subtitle_download",
                &self.notify_on_subtitle_download,
            )
            .field("notify_on_update", &self.notify_on_update)
            .field("auth_url", &self.auth_url)
            .field("client_identifier", &self.client_identifier)
            .finish()
    }
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            proxy: None,
            connect_timeout: default_connect_timeout(),
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            verbose: false,
        }
    }
}

impl NetworkSettings {
    /// Connection timeout as a `Duration`
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    /// Request timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

fn parse_flag(name: &str, value: &str) -> crate::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(crate::Error::config(
            name,
            &format!("Invalid boolean value: {}", other),
        )),
    }
}

impl Settings {
    /// Create new settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from environment variables on top of the defaults
    pub fn from_env() -> crate::Result<Self> {
        Self::default().apply_env()
    }

    /// Apply environment variable overrides; variables that are unset leave
    /// the current value untouched
    pub fn apply_env(mut self) -> crate::Result<Self> {
        let flags: [(&str, &mut bool); 7] = [
            ("PLEX_ENABLED", &mut self.plex.enabled),
            ("PLEX_UPDATE_LIBRARY", &mut self.plex.update_library),
            ("PLEX_NOTIFY_ONSNATCH", &mut self.plex.notify_on_snatch),
            ("PLEX_NOTIFY_ONDOWNLOAD", &mut self.plex.notify_on_download),
            (
                "PLEX_NOTIFY_ONSUBTITLEDOWNLOAD",
                &mut self.plex.notify_on_subtitle_download,
            ),
            ("PLEX_NOTIFY_ONUPDATE", &mut self.plex.notify_on_update),
            ("VERBOSE", &mut self.logging.verbose),
        ];
        for (name, slot) in flags {
            if let Ok(value) = std::env::var(name) {
                *slot = parse_flag(name, &value)?;
            }
        }

        let strings: [(&str, &mut String); 6] = [
            ("PLEX_HOST", &mut self.plex.host),
            ("PLEX_SERVER_HOST", &mut self.plex.server_host),
            ("PLEX_USERNAME", &mut self.plex.username),
            ("PLEX_PASSWORD", &mut self.plex.password),
            ("PLEX_AUTH_URL", &mut self.plex.auth_url),
            ("LOG_LEVEL", &mut self.logging.level),
        ];
        for (name, slot) in strings {
            if let Ok(value) = std::env::var(name) {
                *slot = value;
            }
        }

        if let Ok(proxy) = std::env::var("HTTP_PROXY") {
            self.network.proxy = Some(proxy);
        }

        Ok(self)
    }

    /// Load settings from configuration file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::config("file", &format!("Failed to read config file: {}", e))
        })?;

        let settings: Settings = toml::from_str(&content).map_err(|e| {
            crate::Error::config("file", &format!("Failed to parse config file: {}", e))
        })?;

        Ok(settings)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> crate::Result<()> {
        if self.network.connect_timeout == 0 {
            return Err(crate::Error::config(
                "connect_timeout",
                "Invalid connect timeout: cannot be 0",
            ));
        }

        if self.network.request_timeout == 0 {
            return Err(crate::Error::config(
                "request_timeout",
                "Invalid request timeout: cannot be 0",
            ));
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(crate::Error::config(
                    "log_level",
                    &format!("Invalid log level: {}", self.logging.level),
                ));
            }
        }

        if let Err(e) = url::Url::parse(&self.plex.auth_url) {
            return Err(crate::Error::config(
                "auth_url",
                &format!("Invalid auth URL '{}': {}", self.plex.auth_url, e),
            ));
        }

        if let Some(proxy) = &self.network.proxy
            && let Err(e) = url::Url::parse(proxy)
        {
            return Err(crate::Error::config(
                "proxy",
                &format!("Invalid proxy URL '{}': {}", proxy, e),
            ));
        }

        Ok(())
    }
}
