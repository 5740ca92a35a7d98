//! Per-host notification results

use serde::{Deserialize, Serialize};

/// Marker returned by a client that accepted a command
pub const SEND_OK: &str = "OK";

/// Outcome of sending a notification to one host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HostOutcome {
    /// The host accepted the command
    Ok,
    /// The request could not be delivered
    Failed {
        /// Short error description
        reason: String,
    },
}

/// Result for a single host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostResult {
    /// `host:port` the command was sent to
    pub host: String,
    /// What happened
    #[serde(flatten)]
    pub outcome: HostOutcome,
}

impl HostResult {
    /// Successful delivery to `host`
    pub fn ok(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            outcome: HostOutcome::Ok,
        }
    }

    /// Failed delivery to `host`
    pub fn failed(host: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            outcome: HostOutcome::Failed {
                reason: reason.into(),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, HostOutcome::Ok)
    }
}

/// Aggregated results of one notification across all configured hosts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyReport {
    /// Results in the order the hosts were contacted
    pub results: Vec<HostResult>,
}

impl NotifyReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: HostResult) {
        self.results.push(result);
    }

    /// True when at least one host accepted the notification
    pub fn any_ok(&self) -> bool {
        self.results.iter().any(HostResult::is_ok)
    }

    /// Result for a specific host, if it was contacted
    pub fn get(&self, host: &str) -> Option<&HostResult> {
        self.results.iter().find(|r| r.host == host)
    }

    /// Legacy summary string: `host:OK` for every host that accepted the
    /// notification, concatenated in contact order
    pub fn summary(&self) -> String {
        self.results
            .iter()
            .filter(|r| r.is_ok())
            .map(|r| format!("{}:{}", r.host, SEND_OK))
            .collect()
    }
}
