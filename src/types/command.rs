//! Legacy xbmcCmds remote-control command
//!
//! Plex Home Theater still accepts the XBMC HTTP API under
//! `/xbmcCmds/xbmcHttp/`; only the `command` and `parameter` fields are used.

use url::form_urlencoded;

/// Path of the legacy command endpoint on a Plex client
pub const XBMC_HTTP_PATH: &str = "/xbmcCmds/xbmcHttp/";

/// A single command sent to a Plex client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyCommand {
    /// Builtin to run (always `ExecBuiltIn` for notifications)
    pub command: String,
    /// Argument for the builtin
    pub parameter: String,
}

impl NotifyCommand {
    /// Create a command from raw fields
    pub fn new(command: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            parameter: parameter.into(),
        }
    }

    /// On-screen notification with a title and a message
    pub fn notification(title: &str, message: &str) -> Self {
        Self::new("ExecBuiltIn", format!("Notification({},{})", title, message))
    }

    /// Encode as an `application/x-www-form-urlencoded` query string
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("command", &self.command)
            .append_pair("parameter", &self.parameter)
            .finish()
    }

    /// Decode a query string produced by [`NotifyCommand::encode`]
    ///
    /// Returns `None` when either field is missing.
    pub fn decode(query: &str) -> Option<Self> {
        let mut command = None;
        let mut parameter = None;
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "command" => command = Some(value.into_owned()),
                "parameter" => parameter = Some(value.into_owned()),
                _ => {}
            }
        }
        Some(Self {
            command: command?,
            parameter: parameter?,
        })
    }

    /// Full URL of this command on `host`
    pub fn url_for(&self, host: &str) -> String {
        format!("http://{}{}?{}", host, XBMC_HTTP_PATH, self.encode())
    }
}
