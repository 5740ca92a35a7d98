//! Notification subcommands

use anyhow::Result;
use tracing::info;

use crate::cli::prepare;
use crate::notifier::{NotifyOptions, PlexNotifier};
use crate::types::NotifyReport;

/// Which notification to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyAction {
    /// Free-form message
    Message {
        message: String,
        title: Option<String>,
        force: bool,
    },
    /// Test notification, ignores every enable flag
    Test,
    Snatch { episode: String },
    Download { episode: String },
    Subtitle { episode: String, lang: String },
    UpdateAvailable { version: Option<String> },
}

/// Arguments shared by every notification subcommand
#[derive(Debug)]
pub struct NotifyArgs {
    pub action: NotifyAction,
    pub host: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub config: Option<String>,
    pub verbose: bool,
}

/// Send the requested notification and print the report as JSON
///
/// Prints `false` when the notification was suppressed. Returns whether at
/// least one host accepted it.
pub async fn run_notify_mode(args: NotifyArgs) -> Result<bool> {
    let settings = prepare(args.config.as_deref(), args.verbose)?;

    let notifier = PlexNotifier::new(&settings)?;
    let host = args.host.as_deref();
    let username = args.username.as_deref();
    let password = args.password.as_deref();

    let report = match &args.action {
        NotifyAction::Message {
            message,
            title,
            force,
        } => {
            let mut options = NotifyOptions::new()
                .with_credentials(username, password)
                .with_force(*force);
            options.title = title.as_deref();
            options.host = host;
            notifier.notify(message, options).await
        }
        NotifyAction::Test => Some(notifier.test_notify(host, username, password).await),
        NotifyAction::Snatch { episode } => notifier.notify_snatch(episode).await,
        NotifyAction::Download { episode } => notifier.notify_download(episode).await,
        NotifyAction::Subtitle { episode, lang } => {
            notifier.notify_subtitle_download(episode, lang).await
        }
        NotifyAction::UpdateAvailable { version } => {
            notifier.notify_update_available(version.as_deref()).await
        }
    };

    print_report(report.as_ref())
}

fn print_report(report: Option<&NotifyReport>) -> Result<bool> {
    match report {
        Some(report) => {
            println!("{}", serde_json::to_string(report)?);
            info!("PLEX: Notification result: {}", report.summary());
            Ok(report.any_ok())
        }
        None => {
            println!("false");
            Ok(false)
        }
    }
}
