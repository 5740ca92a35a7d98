//! Command-line interface for the Plex notifier
//!
//! # Usage
//!
//! ```bash
//! plex-notify test --host 192.168.1.20:3005
//! plex-notify notify --message "Hello" --title "Greetings" --force
//! plex-notify download "Show - S01E02 - Episode"
//! plex-notify update-library --host 192.168.1.10:32400
//! ```

use clap::{Args, Parser, Subcommand};

use plex_notifier::cli::{
    library::{LibraryArgs, run_library_mode},
    notify::{NotifyAction, NotifyArgs, run_notify_mode},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "plex-notify")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<String>,

    /// Enable verbose logging
    #[arg(long, global = true)]
    verbose: bool,
}

/// Host and credential overrides
#[derive(Args, Debug, Default)]
struct Target {
    /// Host(s) as host:port, comma separated for several clients
    #[arg(long, value_name = "HOST")]
    host: Option<String>,

    /// Username (defaults to the configured one)
    #[arg(short, long)]
    username: Option<String>,

    /// Password (defaults to the configured one)
    #[arg(short, long)]
    password: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a free-form notification
    Notify {
        /// Message body
        #[arg(short, long)]
        message: String,

        /// Notification title
        #[arg(short, long)]
        title: Option<String>,

        /// Send even when notifications are disabled
        #[arg(long)]
        force: bool,

        #[command(flatten)]
        target: Target,
    },
    /// Send a test notification, ignoring the enable flags
    Test {
        #[command(flatten)]
        target: Target,
    },
    /// Episode snatched
    Snatch {
        /// Episode name
        episode: String,
    },
    /// Episode downloaded
    Download {
        /// Episode name
        episode: String,
    },
    /// Subtitles downloaded
    Subtitle {
        /// Episode name
        episode: String,
        /// Subtitle language
        lang: String,
    },
    /// New version available
    UpdateAvailable {
        /// New version or commit
        version: Option<String>,
    },
    /// Refresh the TV show sections of the Plex Media Server
    UpdateLibrary {
        #[command(flatten)]
        target: Target,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (action, target) = match cli.command {
        Commands::UpdateLibrary { target } => {
            let args = LibraryArgs {
                host: target.host,
                username: target.username,
                password: target.password,
                config: cli.config,
                verbose: cli.verbose,
            };
            if !run_library_mode(args).await? {
                std::process::exit(1);
            }
            return Ok(());
        }
        Commands::Notify {
            message,
            title,
            force,
            target,
        } => (
            NotifyAction::Message {
                message,
                title,
                force,
            },
            target,
        ),
        Commands::Test { target } => (NotifyAction::Test, target),
        Commands::Snatch { episode } => (NotifyAction::Snatch { episode }, Target::default()),
        Commands::Download { episode } => {
            (NotifyAction::Download { episode }, Target::default())
        }
        Commands::Subtitle { episode, lang } => {
            (NotifyAction::Subtitle { episode, lang }, Target::default())
        }
        Commands::UpdateAvailable { version } => {
            (NotifyAction::UpdateAvailable { version }, Target::default())
        }
    };

    let args = NotifyArgs {
        action,
        host: target.host,
        username: target.username,
        password: target.password,
        config: cli.config,
        verbose: cli.verbose,
    };
    if !run_notify_mode(args).await? {
        std::process::exit(1);
    }

    Ok(())
}
