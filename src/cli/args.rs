//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `sync` (default): extract messages, update the reference store and
//!   compile every locale bundle
//! - `init`: write a default `.lingorc.json`

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "lingo",
    author,
    version,
    about,
    long_about = None,
    args_conflicts_with_subcommands = true
)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Options for the implicit `sync` when no subcommand is given.
    #[command(flatten)]
    pub sync: SyncArgs,
}

impl Arguments {
    /// The command to run; a bare `lingo` means `lingo sync`.
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Sync(self.sync))
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Sync(args)) => args.common.verbose,
            Some(Command::Init) => false,
            None => self.sync.common.verbose,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project root directory (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Configuration file (default: nearest .lingorc.json)
    #[arg(long, value_name = "FILE", env = "LINGO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct SyncArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Treat orphaned ids as fatal
    #[arg(long)]
    pub strict_orphans: bool,

    /// Delete orphaned ids from the reference store
    #[arg(long)]
    pub prune_orphans: bool,

    /// Report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract messages, update the reference store and compile bundles
    Sync(SyncArgs),
    /// Initialize a new .lingorc.json configuration file
    Init,
}
