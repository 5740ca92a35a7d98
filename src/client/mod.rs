//! HTTP plumbing shared by the notifier and the library updater
//!
//! `network` wraps the reqwest client and request options; `command`
//! delivers xbmcCmds commands to Plex Home Theater clients.

pub mod command;
pub mod network;

pub use command::CommandSender;
pub use network::{Credentials, NetworkManager, RequestOptions};
