//! Report formatting and printing utilities.
//!
//! Issues are displayed in cargo-style format, followed by the per-locale
//! summary of the run. Separate from core logic so that the engine can be
//! used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, InitSummary, LocaleSummary, OutputSummary, SyncSummary,
};
use crate::core::{json_writer::WriteOutcome, pipeline::AbortReason};
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    // Calculate max line number width for alignment
    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_problem_count(&sorted, writer);
}

pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Sync(summary) => {
            print_sync_to(result, summary, verbose, &mut io::stdout().lock());
            print_unreadable_warning_to(
                summary.unreadable_paths,
                verbose,
                &mut io::stderr().lock(),
            );
        }
        CommandSummary::Init(summary) => print_init(summary),
    }
}

/// Print the whole sync report to a custom writer.
pub fn print_sync_to<W: Write>(
    result: &CommandResult,
    summary: &SyncSummary,
    verbose: bool,
    writer: &mut W,
) {
    report_to(&result.issues, writer);

    let _ = writeln!(
        writer,
        "Scanned {} source {}, found {} {}",
        summary.files_scanned,
        plural(summary.files_scanned, "file", "files"),
        summary.declaration_count,
        plural(summary.declaration_count, "declaration", "declarations")
    );

    for locale in &summary.locales {
        print_locale(locale, summary.dry_run, verbose, writer);
    }

    if summary.prune_withheld {
        let _ = writeln!(
            writer,
            "{} orphans were not pruned because source files failed to parse",
            "warning:".bold().yellow()
        );
    }

    if !summary.aborted.is_empty() {
        let reasons: Vec<&str> = summary
            .aborted
            .iter()
            .map(|r| match r {
                AbortReason::AmbiguousIds => "ambiguous ids",
                AbortReason::StrictOrphans => "orphaned ids with --strict-orphans",
            })
            .collect();
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            format!("Nothing written: {}", reasons.join(", ")).red()
        );
        return;
    }

    for output in &summary.outputs {
        print_output(output, writer);
    }

    if result.issues.is_empty() {
        let count = summary.locales.len();
        let verb = if summary.dry_run { "Checked" } else { "Synced" };
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "{} {} {} - no issues found",
                verb,
                count,
                plural(count, "locale", "locales")
            )
            .green()
        );
    }
}

/// Print a warning about paths the file scan could not access.
pub fn print_unreadable_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} path(s) could not be accessed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

fn print_locale<W: Write>(
    locale: &LocaleSummary,
    dry_run: bool,
    verbose: bool,
    writer: &mut W,
) {
    let diff = &locale.diff;
    let orphan_state = match (diff.orphaned.is_empty(), locale.orphans_pruned, dry_run) {
        (true, _, _) => "",
        (false, true, false) => " (pruned)",
        (false, true, true) => " (would prune)",
        (false, false, _) => " (kept)",
    };

    let counts = if diff.is_reference {
        format!(
            "{} added, {} changed, {} orphaned{}",
            diff.added.len(),
            diff.changed.len(),
            diff.orphaned.len(),
            orphan_state
        )
    } else {
        let mut counts = format!(
            "{} missing, {} orphaned",
            diff.added.len(),
            diff.orphaned.len()
        );
        if let Some(fallbacks) = &locale.fallbacks
            && !fallbacks.is_empty()
        {
            counts.push_str(&format!(", {} using reference text", fallbacks.len()));
        }
        counts
    };

    let label = if diff.is_reference {
        format!("{} (reference)", diff.locale)
    } else {
        diff.locale.clone()
    };

    let _ = writeln!(
        writer,
        "  {}  {}  {}",
        label.bold(),
        counts,
        locale.file_path.dimmed()
    );

    if verbose {
        for id in &diff.added {
            let _ = writeln!(writer, "    {} {}", "+".green(), id);
        }
        for id in &diff.changed {
            let _ = writeln!(writer, "    {} {}", "~".yellow(), id);
        }
        for id in &diff.orphaned {
            let _ = writeln!(writer, "    {} {}", "-".red(), id);
        }
    }
}

fn print_output<W: Write>(output: &OutputSummary, writer: &mut W) {
    let state = match output.outcome {
        WriteOutcome::Written => output.outcome.as_str().green(),
        WriteOutcome::Unchanged => output.outcome.as_str().dimmed(),
        WriteOutcome::Pending => output.outcome.as_str().yellow(),
    };
    let _ = writeln!(writer, "  {:>11}  {}", state, output.file_path);
}

fn print_init(summary: &InitSummary) {
    match &summary.error {
        Some(error) => eprintln!("{} {}", "error:".bold().red(), error),
        None => println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", summary.path).green()
        ),
    }
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let (file_path, line, col, source_line) = extract_location_info(&loc);

    // Print severity and message (cargo-style)
    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    // Print clickable location: --> path:line:col
    if line > 0 {
        let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);
    } else {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), file_path);
    }

    // Print source context if available
    if let Some(source_line) = source_line {
        let caret_char = match severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // Caret pointing to the column (col is 1-based)
        let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
        );
    }

    // Print details if present (cargo-style note)
    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    for other in issue.others() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {} (\"{}\")",
            "",
            "=".blue(),
            "also:".bold(),
            other.context.location,
            other.default_message,
            width = max_line_width
        );
    }

    // Print hint if present
    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_problem_count<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        total_errors,
        plural(total_errors, "error", "errors").red(),
        total_warnings,
        plural(total_warnings, "warning", "warnings").yellow()
    );
}

fn extract_location_info<'a>(
    loc: &'a ReportLocation<'a>,
) -> (&'a str, usize, usize, Option<&'a str>) {
    match loc {
        ReportLocation::Source(ctx) => (
            ctx.file_path(),
            ctx.line(),
            ctx.col(),
            Some(&ctx.source_line),
        ),
        ReportLocation::File { path } => (path, 0, 0, None),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line()),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}
