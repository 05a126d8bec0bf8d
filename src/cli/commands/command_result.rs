use crate::core::{
    diff::LocaleDiff,
    json_writer::WriteOutcome,
    pipeline::{AbortReason, OutputKind},
};
use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Sync(SyncSummary),
    Init(InitSummary),
}

/// Per-locale line of the sync summary.
#[derive(Debug)]
pub struct LocaleSummary {
    pub diff: LocaleDiff,
    /// Locale file path for display.
    pub file_path: String,
    pub orphans_pruned: bool,
    /// Bundle ids that fell back to reference text.
    pub fallbacks: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct OutputSummary {
    pub file_path: String,
    pub kind: OutputKind,
    pub outcome: WriteOutcome,
}

#[derive(Debug)]
pub struct SyncSummary {
    pub files_scanned: usize,
    pub declaration_count: usize,
    pub unreadable_paths: usize,
    pub locales: Vec<LocaleSummary>,
    pub outputs: Vec<OutputSummary>,
    pub aborted: Vec<AbortReason>,
    /// `--prune-orphans` was ignored because source files failed to parse.
    pub prune_withheld: bool,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: String,
    pub error: Option<String>,
}

/// Result of running a lingo command.
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    /// All issues found, sorted. Empty for `init`.
    pub issues: Vec<Issue>,
}
