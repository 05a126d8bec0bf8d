use anyhow::Result;

use super::super::args::SyncArgs;
use super::{
    CommandResult, CommandSummary, LocaleSummary, OutputSummary, SyncSummary, helper::finish,
};
use crate::{
    core::{SyncContext, SyncOptions, SyncOutcome, run_sync, store::LoadStatus},
    issues::{
        AmbiguousIdIssue, InvalidIdIssue, Issue, OrphanAction, OrphanedIdIssue, ParseErrorIssue,
        ParseErrorKind, SkippedDeclarationIssue,
    },
};

pub fn sync(args: SyncArgs) -> Result<CommandResult> {
    let ctx = SyncContext::new(
        args.common.root.as_deref(),
        args.common.config.as_deref(),
        args.common.verbose,
    )?;
    let options = SyncOptions {
        dry_run: args.dry_run,
        prune_orphans: args.prune_orphans,
        strict_orphans: args.strict_orphans,
    };

    let outcome = run_sync(&ctx, options)?;
    let issues = collect_issues(&ctx, &outcome);

    Ok(finish(CommandSummary::Sync(summarize(&ctx, outcome)), issues))
}

/// Turn the findings of a run into reportable issues.
pub fn collect_issues(ctx: &SyncContext, outcome: &SyncOutcome) -> Vec<Issue> {
    let mut issues: Vec<Issue> = Vec::new();
    let scan = &outcome.scan;

    issues.extend(scan.conflicts.iter().map(|c| {
        Issue::AmbiguousId(AmbiguousIdIssue {
            id: c.id.clone(),
            occurrences: c.occurrences.clone(),
        })
    }));

    issues.extend(outcome.invalid_ids.iter().map(|d| {
        Issue::InvalidId(InvalidIdIssue {
            context: d.context.clone(),
            id: d.id.clone(),
        })
    }));

    issues.extend(scan.skipped.iter().map(|s| {
        Issue::SkippedDeclaration(SkippedDeclarationIssue {
            context: s.context.clone(),
            reason: s.reason,
            id: s.id.clone(),
        })
    }));

    issues.extend(scan.parse_errors.iter().map(|e| {
        Issue::ParseError(ParseErrorIssue {
            file_path: e.file_path.clone(),
            error: e.error.clone(),
            kind: ParseErrorKind::Source,
        })
    }));

    for locale in &outcome.locales {
        let file_path = ctx.display_path(&locale.path);

        if let LoadStatus::Malformed(error) = &locale.status {
            issues.push(Issue::ParseError(ParseErrorIssue {
                file_path: file_path.clone(),
                error: error.clone(),
                kind: ParseErrorKind::Locale {
                    rewritten: locale.diff.is_reference
                        && !outcome.is_aborted()
                        && !outcome.options.dry_run,
                },
            }));
        }

        let action = match (locale.orphans_pruned, outcome.options.dry_run) {
            (true, false) => OrphanAction::Pruned,
            (true, true) => OrphanAction::WouldPrune,
            (false, _) if outcome.prune_withheld && locale.diff.is_reference => {
                OrphanAction::PruneWithheld
            }
            (false, _) => OrphanAction::Kept,
        };

        for (id, value) in locale.diff.orphaned.iter().zip(&locale.orphaned_messages) {
            issues.push(Issue::OrphanedId(OrphanedIdIssue {
                file_path: file_path.clone(),
                locale: locale.locale().to_string(),
                id: id.clone(),
                value: value.clone(),
                action,
                strict: outcome.options.strict_orphans,
            }));
        }
    }

    issues
}

fn summarize(ctx: &SyncContext, outcome: SyncOutcome) -> SyncSummary {
    let locales = outcome
        .locales
        .into_iter()
        .map(|l| LocaleSummary {
            file_path: ctx.display_path(&l.path),
            diff: l.diff,
            orphans_pruned: l.orphans_pruned,
            fallbacks: l.fallbacks,
        })
        .collect();

    let outputs = outcome
        .outputs
        .into_iter()
        .map(|o| OutputSummary {
            file_path: ctx.display_path(&o.path),
            kind: o.kind,
            outcome: o.outcome,
        })
        .collect();

    SyncSummary {
        files_scanned: outcome.scan.files_scanned,
        declaration_count: outcome.scan.declarations.len(),
        unreadable_paths: outcome.unreadable_paths,
        locales,
        outputs,
        aborted: outcome.aborted,
        prune_withheld: outcome.prune_withheld,
        dry_run: outcome.options.dry_run,
    }
}
