//! Plex Media Server library refresh
//!
//! Plex Media Server only supports rescanning whole sections, so an update
//! refreshes every `show` section on the server. The work runs as a linear
//! pipeline of [`UpdateStage`]s that stops at the first failure; sections
//! refreshed before a failure stay refreshed.

use reqwest::Method;
use tracing::{debug, error, info};
use url::Url;

use crate::client::command::non_empty;
use crate::client::{Credentials, NetworkManager, RequestOptions};
use crate::config::{PlexSettings, Settings};
use crate::error::{format_error, format_error_for_logging};
use crate::types::library::TOKEN_QUERY_PARAM;
use crate::types::xml::{parse_auth_token, parse_sections};
use crate::types::{AuthToken, LibrarySection};
use crate::{Error, Result};

/// Header identifying this client to Plex.tv
const CLIENT_IDENTIFIER_HEADER: &str = "x-plex-client-identifier";

const SECTIONS_PATH: &str = "/library/sections";

/// Why an update was not attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The notifier is disabled
    Disabled,
    /// Library updates are switched off
    UpdatesOff,
    /// No Plex Media Server host is configured
    NoServerHost,
}

/// Result of a library update that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Nothing was sent
    Skipped(SkipReason),
    /// Every show section was refreshed; keys in refresh order
    Refreshed { sections: Vec<String> },
}

/// Steps of a library update
#[derive(Debug)]
enum UpdateStage {
    Guard {
        host: Option<String>,
        credentials: Option<Credentials>,
    },
    Authenticate {
        server: String,
        credentials: Credentials,
    },
    Enumerate {
        server: String,
        token: Option<AuthToken>,
    },
    Refresh {
        server: String,
        token: Option<AuthToken>,
        sections: Vec<LibrarySection>,
    },
    Done(UpdateOutcome),
}

/// Triggers section refreshes on a Plex Media Server
#[derive(Debug, Clone)]
pub struct LibraryUpdater {
    settings: PlexSettings,
    network: NetworkManager,
}

impl LibraryUpdater {
    /// Build an updater with its own HTTP client
    pub fn new(settings: &Settings) -> Result<Self> {
        let network = NetworkManager::new(&settings.network)?;
        Ok(Self::with_network(settings.plex.clone(), network))
    }

    /// Build an updater on top of an existing HTTP client
    pub fn with_network(settings: PlexSettings, network: NetworkManager) -> Self {
        Self { settings, network }
    }

    /// Refresh every show section, returning `true` on success
    ///
    /// Failures are logged and reported as `false`; see
    /// [`LibraryUpdater::try_update_library`] for the cause.
    pub async fn update_library(
        &self,
        host: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
    ) -> bool {
        match self.try_update_library(host, username, password).await {
            Ok(UpdateOutcome::Refreshed { .. }) => true,
            Ok(UpdateOutcome::Skipped(reason)) => {
                debug!("PLEX: Library update skipped: {:?}", reason);
                false
            }
            Err(e) => {
                error!(
                    details = %format_error_for_logging(&e),
                    "PLEX: Library update failed: {}",
                    format_error(&e)
                );
                false
            }
        }
    }

    /// Run the update pipeline
    ///
    /// Host and credentials fall back to the configured values. The Plex.tv
    /// sign-in only happens when both username and password are known.
    pub async fn try_update_library(
        &self,
        host: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<UpdateOutcome> {
        let username = non_empty(username).unwrap_or(&self.settings.username);
        let password = non_empty(password).unwrap_or(&self.settings.password);
        let credentials = (!username.is_empty() && !password.is_empty())
            .then(|| Credentials::new(username, password));

        let mut stage = UpdateStage::Guard {
            host: non_empty(host).map(str::to_string),
            credentials,
        };

        loop {
            stage = match stage {
                UpdateStage::Guard { host, credentials } => self.guard(host, credentials),
                UpdateStage::Authenticate {
                    server,
                    credentials,
                } => {
                    let token = self.authenticate(&credentials).await?;
                    UpdateStage::Enumerate {
                        server,
                        token: Some(token),
                    }
                }
                UpdateStage::Enumerate { server, token } => {
                    let sections = self.fetch_sections(&server, token.as_ref()).await?;
                    if sections.is_empty() {
                        info!("PLEX: Plex Media Server not running on: {}", server);
                        return Err(Error::protocol(format!(
                            "no library sections returned by {}",
                            server
                        )));
                    }
                    UpdateStage::Refresh {
                        server,
                        token,
                        sections,
                    }
                }
                UpdateStage::Refresh {
                    server,
                    token,
                    sections,
                } => {
                    let mut refreshed = Vec::new();
                    for section in sections.iter().filter(|s| s.is_show()) {
                        self.refresh_section(&server, section, token.as_ref())
                            .await?;
                        refreshed.push(section.key.clone());
                    }
                    UpdateStage::Done(UpdateOutcome::Refreshed {
                        sections: refreshed,
                    })
                }
                UpdateStage::Done(outcome) => return Ok(outcome),
            };
        }
    }

    fn guard(&self, host: Option<String>, credentials: Option<Credentials>) -> UpdateStage {
        if !self.settings.enabled {
            return UpdateStage::Done(UpdateOutcome::Skipped(SkipReason::Disabled));
        }
        if !self.settings.update_library {
            return UpdateStage::Done(UpdateOutcome::Skipped(SkipReason::UpdatesOff));
        }

        let server = host
            .unwrap_or_else(|| self.settings.server_host.clone())
            .trim()
            .to_string();
        if server.is_empty() {
            debug!("PLEX: No Plex Media Server host specified, check your settings");
            return UpdateStage::Done(UpdateOutcome::Skipped(SkipReason::NoServerHost));
        }

        info!(
            "PLEX: Updating library for the Plex Media Server host: {}",
            server
        );

        match credentials {
            Some(credentials) => UpdateStage::Authenticate {
                server,
                credentials,
            },
            None => UpdateStage::Enumerate {
                server,
                token: None,
            },
        }
    }

    /// Exchange credentials for a token at the sign-in endpoint
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthToken> {
        let auth_url = self.settings.auth_url.as_str();
        debug!(
            "PLEX: fetching credentials for Plex user: {}",
            credentials.username
        );

        let options = RequestOptions::new()
            .with_method(Method::POST)
            .with_header(CLIENT_IDENTIFIER_HEADER, &self.settings.client_identifier)?
            .with_credentials(Some(credentials.clone()))
            .with_body("");

        let response = self.network.send(auth_url, &options).await.map_err(|e| {
            error!(
                "PLEX: Error fetching credentials from {} for user {}: {}",
                auth_url,
                credentials.username,
                format_error(&e)
            );
            e
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::auth(
                format!("sign-in rejected with status {}", status),
                auth_url.to_string(),
            ));
        }

        let body = response.bytes().await?;
        parse_auth_token(&body).map_err(|e| {
            Error::auth(
                format!("Error parsing sign-in response: {}", e),
                auth_url.to_string(),
            )
        })
    }

    async fn fetch_sections(
        &self,
        server: &str,
        token: Option<&AuthToken>,
    ) -> Result<Vec<LibrarySection>> {
        let url = server_url(server, SECTIONS_PATH, token)?;
        let body = self
            .network
            .fetch(url.as_str(), &RequestOptions::new())
            .await?;
        let sections = parse_sections(&body)?;
        debug!(
            "PLEX: Found {} library section(s) on {}",
            sections.len(),
            server
        );
        Ok(sections)
    }

    async fn refresh_section(
        &self,
        server: &str,
        section: &LibrarySection,
        token: Option<&AuthToken>,
    ) -> Result<()> {
        let url = refresh_url(server, &section.key, token)?;

        debug!(
            "PLEX: Refreshing section {} ({})",
            section.key,
            section.title.as_deref().unwrap_or("untitled")
        );
        self.network
            .fetch(url.as_str(), &RequestOptions::new())
            .await?;
        Ok(())
    }
}

/// `http://<server><path>` with the token appended as `X-Plex-Token`
fn server_url(server: &str, path: &str, token: Option<&AuthToken>) -> Result<Url> {
    let mut url = Url::parse(&format!("http://{}{}", server, path))?;
    if let Some(token) = token {
        url.query_pairs_mut()
            .append_pair(TOKEN_QUERY_PARAM, token.as_str());
    }
    Ok(url)
}

/// `http://<server>/library/sections/<key>/refresh`, with the key kept as a
/// single escaped path segment
fn refresh_url(server: &str, key: &str, token: Option<&AuthToken>) -> Result<Url> {
    if matches!(key, "" | "." | "..") {
        return Err(Error::protocol(format!("Invalid section key '{}'", key)));
    }

    let mut url = server_url(server, SECTIONS_PATH, token)?;
    url.path_segments_mut()
        .map_err(|_| Error::protocol(format!("Cannot extend path for {}", server)))?
        .push(key)
        .push("refresh");
    Ok(url)
}
