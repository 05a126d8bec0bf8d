//! Issue types for sync results.
//!
//! Every finding of a run is an [`Issue`]. Each issue carries what the
//! reporter needs to print it: location, message, severity and rule.

use std::fmt;

use enum_dispatch::enum_dispatch;

use crate::core::{MessageDeclaration, SkipReason, SourceContext};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    AmbiguousId,
    OrphanedId,
    InvalidId,
    DynamicMessage,
    IncompleteMessage,
    ParseError,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::AmbiguousId => write!(f, "ambiguous-id"),
            Rule::OrphanedId => write!(f, "orphaned-id"),
            Rule::InvalidId => write!(f, "invalid-id"),
            Rule::DynamicMessage => write!(f, "dynamic-message"),
            Rule::IncompleteMessage => write!(f, "incomplete-message"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Issue Types - Source Code (SourceContext)
// ============================================================

/// One id declared with different default messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousIdIssue {
    pub id: String,
    /// One declaration per distinct message, first one first.
    pub occurrences: Vec<MessageDeclaration>,
}

/// Id that is not all lowercase or contains whitespace. Still processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidIdIssue {
    pub context: SourceContext,
    pub id: String,
}

/// Recognised call site that could not become a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDeclarationIssue {
    pub context: SourceContext,
    pub reason: SkipReason,
    pub id: Option<String>,
}

impl SkippedDeclarationIssue {
    pub fn rule(&self) -> Rule {
        match self.reason {
            SkipReason::DynamicId | SkipReason::DynamicDefaultMessage => Rule::DynamicMessage,
            SkipReason::MissingId | SkipReason::MissingDefaultMessage => Rule::IncompleteMessage,
        }
    }
}

// ============================================================
// Issue Types - Locale Files
// ============================================================

/// Id present in a locale store but no longer declared in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrphanedIdIssue {
    /// Locale file path for display.
    pub file_path: String,
    pub locale: String,
    pub id: String,
    /// Stored text.
    pub value: String,
    pub action: OrphanAction,
    /// Orphans are fatal under `--strict-orphans`.
    pub strict: bool,
}

/// What the run did with an orphaned id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrphanAction {
    Kept,
    Pruned,
    /// Pruning requested under `--dry-run`.
    WouldPrune,
    /// Pruning requested, but source files failed to parse.
    PruneWithheld,
}

impl OrphanAction {
    /// The id is (or would be) gone from the store after this run.
    pub fn removes(self) -> bool {
        matches!(self, Self::Pruned | Self::WouldPrune)
    }
}

// ============================================================
// Special Issue Types
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Source file could not be read or parsed; its declarations are unknown.
    Source,
    /// Locale file could not be parsed and was treated as empty.
    Locale { rewritten: bool },
}

/// File could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
    pub kind: ParseErrorKind,
}

// ============================================================
// Issue Enum
// ============================================================

/// A finding of a sync run.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    AmbiguousId(AmbiguousIdIssue),
    OrphanedId(OrphanedIdIssue),
    InvalidId(InvalidIdIssue),
    SkippedDeclaration(SkippedDeclarationIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Source code location (has source_line for context display).
    Source(&'a SourceContext),
    /// File-level only (locale files, unparsable sources).
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types; `enum_dispatch` forwards calls on
/// [`Issue`] without a vtable.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (id, error, etc.).
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }

    /// Further declarations involved (for ambiguous ids).
    fn others(&self) -> &[MessageDeclaration] {
        &[]
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for AmbiguousIdIssue {
    fn location(&self) -> ReportLocation<'_> {
        match self.occurrences.first() {
            Some(first) => ReportLocation::Source(&first.context),
            None => ReportLocation::File { path: "" },
        }
    }

    fn message(&self) -> String {
        self.id.clone()
    }

    fn report_severity(&self) -> Severity {
        Severity::Error
    }

    fn report_rule(&self) -> Rule {
        Rule::AmbiguousId
    }

    fn hint(&self) -> Option<&str> {
        Some("use one defaultMessage per id, or give each message its own id")
    }

    fn details(&self) -> Option<String> {
        self.occurrences.first().map(|first| {
            format!(
                "declared with {} different messages, first (\"{}\")",
                self.occurrences.len(),
                first.default_message
            )
        })
    }

    fn others(&self) -> &[MessageDeclaration] {
        self.occurrences.get(1..).unwrap_or(&[])
    }
}

impl Report for InvalidIdIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.id.clone()
    }

    fn report_severity(&self) -> Severity {
        Severity::Warning
    }

    fn report_rule(&self) -> Rule {
        Rule::InvalidId
    }

    fn hint(&self) -> Option<&str> {
        Some("ids should be lowercase without whitespace")
    }
}

impl Report for SkippedDeclarationIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => self.reason.to_string(),
        }
    }

    fn report_severity(&self) -> Severity {
        Severity::Warning
    }

    fn report_rule(&self) -> Rule {
        self.rule()
    }

    fn details(&self) -> Option<String> {
        self.id
            .as_ref()
            .map(|_| format!("{}, call site skipped", self.reason))
    }
}

impl Report for OrphanedIdIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.id.clone()
    }

    fn report_severity(&self) -> Severity {
        if self.strict && !self.action.removes() {
            Severity::Error
        } else {
            Severity::Warning
        }
    }

    fn report_rule(&self) -> Rule {
        Rule::OrphanedId
    }

    fn hint(&self) -> Option<&str> {
        match self.action {
            OrphanAction::Kept => {
                Some("run with --prune-orphans to remove it from the reference store")
            }
            OrphanAction::PruneWithheld => {
                Some("not pruned: fix the source parse errors, then run --prune-orphans again")
            }
            OrphanAction::Pruned | OrphanAction::WouldPrune => None,
        }
    }

    fn details(&self) -> Option<String> {
        let action = match self.action {
            OrphanAction::Pruned => "removed from",
            OrphanAction::WouldPrune => "would be removed from",
            OrphanAction::Kept | OrphanAction::PruneWithheld => "kept in",
        };
        Some(format!("{} {} (\"{}\")", action, self.locale, self.value))
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Severity::Warning
    }

    fn report_rule(&self) -> Rule {
        Rule::ParseError
    }

    fn details(&self) -> Option<String> {
        match self.kind {
            ParseErrorKind::Source => Some("declarations in this file were not collected".to_string()),
            ParseErrorKind::Locale { rewritten: true } => {
                Some("treated as empty and rewritten".to_string())
            }
            ParseErrorKind::Locale { rewritten: false } => Some("treated as empty".to_string()),
        }
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    fn sort_key(&self) -> (&str, usize, usize) {
        match self.location() {
            ReportLocation::Source(ctx) => (ctx.file_path(), ctx.line(), ctx.col()),
            ReportLocation::File { path } => (path, 0, 0),
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: file_path, line, col, rule, message
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
