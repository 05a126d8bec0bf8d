use std::path::Path;

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, init::init, sync::sync},
};

/// Dispatch a parsed command line to its handler.
///
/// # Returns
/// - `Ok(CommandResult)` with issues and the command's summary
/// - `Err` if the command fails (invalid config, unreadable files, write failure)
pub fn run(args: Arguments) -> Result<CommandResult> {
    match args.into_command() {
        Command::Sync(args) => sync(args),
        Command::Init => init(Path::new(".")),
    }
}
