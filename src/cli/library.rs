//! `update-library` subcommand

use anyhow::Result;

use crate::LibraryUpdater;
use crate::cli::prepare;

/// Arguments for the library update
#[derive(Debug)]
pub struct LibraryArgs {
    pub host: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub config: Option<String>,
    pub verbose: bool,
}

/// Refresh the show sections and print `true` or `false`
pub async fn run_library_mode(args: LibraryArgs) -> Result<bool> {
    let settings = prepare(args.config.as_deref(), args.verbose)?;

    let updater = LibraryUpdater::new(&settings)?;
    let updated = updater
        .update_library(
            args.host.as_deref(),
            args.username.as_deref(),
            args.password.as_deref(),
        )
        .await;

    println!("{}", updated);
    Ok(updated)
}
