//! Command delivery to Plex Home Theater clients

use tracing::{debug, error, warn};

use super::network::{Credentials, NetworkManager, RequestOptions};
use crate::config::PlexSettings;
use crate::types::{NotifyCommand, SEND_OK};
use crate::{Error, Result, error::format_error};

/// Treat `Some("")` like an omitted value
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Sends legacy xbmcCmds commands to a single client
#[derive(Debug, Clone)]
pub struct CommandSender {
    network: NetworkManager,
    settings: PlexSettings,
}

impl CommandSender {
    pub fn new(network: NetworkManager, settings: PlexSettings) -> Self {
        Self { network, settings }
    }

    /// Send `command` to `host`, falling back to the configured host and
    /// credentials for anything omitted
    ///
    /// Returns [`SEND_OK`] once the client answered with a 2xx status. The
    /// body is only logged.
    pub async fn send(
        &self,
        command: &NotifyCommand,
        host: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<&'static str> {
        let username = non_empty(username).unwrap_or(&self.settings.username);
        let password = non_empty(password).unwrap_or(&self.settings.password);
        let host = non_empty(host).unwrap_or(&self.settings.host).trim();

        if host.is_empty() {
            error!("PLEX: No host specified, check your settings");
            return Err(Error::config("host", "No host specified"));
        }

        debug!("PLEX: Encoded API command: {}", command.encode());
        let url = command.url_for(host);

        let credentials =
            (!password.is_empty()).then(|| Credentials::new(username, password));
        let options = RequestOptions::new().with_credentials(credentials);

        match self.network.fetch(&url, &options).await {
            Ok(body) => {
                let body = String::from_utf8_lossy(&body);
                debug!("PLEX: HTTP response: {}", body.replace('\n', ""));
                Ok(SEND_OK)
            }
            Err(e) => {
                warn!(
                    "PLEX: Warning: Couldn't contact Plex at {}: {}",
                    url,
                    format_error(&e)
                );
                Err(e)
            }
        }
    }
}
