//! One sync run: scan the source, diff it against every locale store, update
//! the reference store and compile a bundle per locale.
//!
//! The read phase (source scan and locale loading) runs in parallel. Writes
//! happen afterwards in a fixed order: the reference store first, then the
//! bundles in configured locale order. A run that finds ambiguous ids, or
//! orphans under `strict_orphans`, writes nothing. Orphans are never pruned
//! after an incomplete scan: ids of a file that failed to parse would look
//! orphaned.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::core::{
    MessageDeclaration,
    compile::{compile_bundle, fallback_ids},
    context::SyncContext,
    diff::{LocaleDiff, apply_reference_diff, diff_locale, invalid_declarations},
    extract::{CallSiteNames, SourceScan, scan_sources},
    file_scanner::scan_files,
    json_writer::WriteOutcome,
    store::{LoadStatus, LocaleStore},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Compute everything, write nothing.
    pub dry_run: bool,
    /// Remove orphaned ids from the reference store.
    pub prune_orphans: bool,
    /// Treat remaining orphans as fatal.
    pub strict_orphans: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Store,
    Bundle,
}

#[derive(Debug, Clone)]
pub struct OutputFile {
    pub locale: String,
    pub kind: OutputKind,
    pub path: PathBuf,
    pub outcome: WriteOutcome,
}

/// Per-locale result of a run, in configured locale order.
#[derive(Debug, Clone)]
pub struct LocaleReport {
    pub diff: LocaleDiff,
    pub path: PathBuf,
    pub status: LoadStatus,
    /// Text each orphaned id had before this run, parallel to `diff.orphaned`.
    pub orphaned_messages: Vec<String>,
    /// Orphans were removed from this store, or would be under `dry_run`.
    pub orphans_pruned: bool,
    /// Bundle entries that fell back to reference text; `None` when no bundle
    /// was compiled.
    pub fallbacks: Option<Vec<String>>,
}

impl LocaleReport {
    pub fn locale(&self) -> &str {
        &self.diff.locale
    }
}

/// Why a run stopped before writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    AmbiguousIds,
    StrictOrphans,
}

#[derive(Debug)]
pub struct SyncOutcome {
    pub scan: SourceScan,
    /// Glob matches that could not be accessed.
    pub unreadable_paths: usize,
    pub locales: Vec<LocaleReport>,
    pub invalid_ids: Vec<MessageDeclaration>,
    pub outputs: Vec<OutputFile>,
    pub aborted: Vec<AbortReason>,
    /// `prune_orphans` was requested but source files failed to parse.
    pub prune_withheld: bool,
    pub options: SyncOptions,
}

impl SyncOutcome {
    pub fn is_aborted(&self) -> bool {
        !self.aborted.is_empty()
    }

    /// Orphans left in place after this run.
    pub fn remaining_orphans(&self) -> usize {
        self.locales
            .iter()
            .filter(|l| !l.orphans_pruned)
            .map(|l| l.diff.orphaned.len())
            .sum()
    }
}

pub fn run_sync(ctx: &SyncContext, options: SyncOptions) -> Result<SyncOutcome> {
    let config = &ctx.config;
    let names = CallSiteNames::from_config(config);

    let ((unreadable_paths, scan), stores) = rayon::join(
        || {
            let files = scan_files(&ctx.project_dir, &config.files, &config.ignores, ctx.verbose);
            let scan = scan_sources(&ctx.project_dir, &files.files, &names, ctx.verbose);
            (files.skipped_count, scan)
        },
        || {
            config
                .locales
                .par_iter()
                .map(|locale| LocaleStore::load(locale, &ctx.locale_file_path(locale)))
                .collect::<Result<Vec<_>>>()
        },
    );
    let mut stores = stores?;

    let reference_index = stores
        .iter()
        .position(|s| s.locale == config.default_locale)
        .context("Default locale is not among the configured locales")?;

    let diffs: Vec<LocaleDiff> = stores
        .iter()
        .map(|s| diff_locale(&s.locale, s.locale == config.default_locale, &scan, &s.file))
        .collect();

    let orphaned_messages: Vec<Vec<String>> = stores
        .iter()
        .zip(&diffs)
        .map(|(store, diff)| {
            diff.orphaned
                .iter()
                .map(|id| store.file.message(id).unwrap_or_default().to_string())
                .collect()
        })
        .collect();

    let invalid_ids: Vec<MessageDeclaration> =
        invalid_declarations(&scan).into_iter().cloned().collect();

    let prune = options.prune_orphans && scan.parse_errors.is_empty();
    let prune_withheld = options.prune_orphans && !prune;

    let remaining_orphans: usize = diffs
        .iter()
        .filter(|d| !(d.is_reference && prune))
        .map(|d| d.orphaned.len())
        .sum();

    let mut aborted = Vec::new();
    if scan.has_conflicts() {
        aborted.push(AbortReason::AmbiguousIds);
    }
    if options.strict_orphans && remaining_orphans > 0 {
        aborted.push(AbortReason::StrictOrphans);
    }

    let mut outputs = Vec::new();
    let mut fallbacks: Vec<Option<Vec<String>>> = vec![None; stores.len()];

    if aborted.is_empty() {
        let reference = &mut stores[reference_index];
        apply_reference_diff(
            &mut reference.file,
            &scan,
            &diffs[reference_index],
            prune,
        );
        let outcome = if options.dry_run {
            reference.plan_save()?
        } else {
            reference.save()?
        };
        outputs.push(OutputFile {
            locale: reference.locale.clone(),
            kind: OutputKind::Store,
            path: reference.path.clone(),
            outcome,
        });

        let reference = &stores[reference_index].file;
        for (i, store) in stores.iter().enumerate() {
            let bundle = compile_bundle(&store.locale, reference, &store.file);
            let path = ctx.compiled_file_path(&store.locale);
            let outcome = if options.dry_run {
                bundle.plan_save(&path)?
            } else {
                bundle.save(&path)?
            };

            fallbacks[i] = Some(if i == reference_index {
                Vec::new()
            } else {
                fallback_ids(reference, &store.file, &bundle)
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            });

            outputs.push(OutputFile {
                locale: store.locale.clone(),
                kind: OutputKind::Bundle,
                path,
                outcome,
            });
        }
    }

    let pruned = aborted.is_empty() && prune;
    let locales = stores
        .into_iter()
        .zip(diffs)
        .zip(orphaned_messages)
        .zip(fallbacks)
        .map(|(((store, diff), orphaned_messages), fallbacks)| LocaleReport {
            orphans_pruned: pruned && diff.is_reference,
            diff,
            path: store.path,
            status: store.status,
            orphaned_messages,
            fallbacks,
        })
        .collect();

    Ok(SyncOutcome {
        scan,
        unreadable_paths,
        locales,
        invalid_ids,
        outputs,
        aborted,
        prune_withheld,
        options,
    })
}
