//! Command dispatch: bridges CLI args -> scanner -> output formatting.

pub mod config_cmd;
pub mod encode;
pub mod scan;
pub mod watch;

use linkscan_core::LinksysScanner;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a router-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    scanner: LinksysScanner,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Scan(args) => scan::handle(&scanner, &args, global),
        Command::Watch(args) => watch::handle(scanner, &args, global).await,
        // Handled before a router connection is made
        Command::EncodePassword | Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
