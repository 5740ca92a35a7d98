//! Type definitions for commands, events, library sections and results
//!
//! This module contains the data structures exchanged with Plex hosts and
//! returned to callers, plus the XML parsers for server responses.

pub mod command;
pub mod event;
pub mod library;
pub mod report;
pub mod xml;

pub use command::NotifyCommand;
pub use event::NotifyEvent;
pub use library::{AuthToken, LibrarySection};
pub use report::{HostOutcome, HostResult, NotifyReport, SEND_OK};
