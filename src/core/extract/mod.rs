//! Source scanning: parse every source file and collect message declarations.
//!
//! Reading and parsing run in parallel (one SourceMap per file); merging runs
//! sequentially in file-path order so the result does not depend on thread
//! scheduling.

pub mod visitor;

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use rayon::prelude::*;
use swc_common::SourceMap;
use swc_ecma_visit::VisitWith;

pub use visitor::{CallSiteNames, DeclarationVisitor};

use crate::core::{
    MessageDeclaration, SkippedCallSite, collation::locale_compare, file_scanner::relative_path,
    parsers::jsx::parse_jsx_source,
};

/// Declarations and skipped call sites of one file.
#[derive(Debug, Default)]
pub struct FileDeclarations {
    pub declarations: Vec<MessageDeclaration>,
    pub skipped: Vec<SkippedCallSite>,
}

/// Parse one source text and collect its declarations.
pub fn extract_from_source(
    code: String,
    file_path: &str,
    names: &CallSiteNames,
) -> Result<FileDeclarations> {
    let source_map = Arc::new(SourceMap::default());
    let parsed = parse_jsx_source(code, file_path, source_map)?;

    let mut visitor = DeclarationVisitor::new(file_path, &parsed.source_map, names);
    parsed.module.visit_with(&mut visitor);

    Ok(FileDeclarations {
        declarations: visitor.declarations,
        skipped: visitor.skipped,
    })
}

/// A source file that could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceParseError {
    pub file_path: String,
    pub error: String,
}

/// One id declared with more than one distinct default message.
///
/// `occurrences` holds the first declaration of every distinct message, in
/// file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateConflict {
    pub id: String,
    pub occurrences: Vec<MessageDeclaration>,
}

/// Everything the scanner learned about the source tree.
#[derive(Debug, Default)]
pub struct SourceScan {
    /// One declaration per id, ordered by id. For an ambiguous id this is its
    /// first occurrence; the conflict itself is in `conflicts`.
    pub declarations: Vec<MessageDeclaration>,
    pub conflicts: Vec<DuplicateConflict>,
    pub skipped: Vec<SkippedCallSite>,
    pub parse_errors: Vec<SourceParseError>,
    pub files_scanned: usize,
}

impl SourceScan {
    pub fn get(&self, id: &str) -> Option<&MessageDeclaration> {
        self.declarations
            .binary_search_by(|d| locale_compare(&d.id, id))
            .ok()
            .map(|idx| &self.declarations[idx])
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Merge per-file results, deduplicating by id.
///
/// Identical re-declarations collapse silently into the first one; an id
/// seen with different default messages becomes a [`DuplicateConflict`].
pub fn merge_declarations(files: Vec<FileDeclarations>) -> SourceScan {
    let mut by_id: HashMap<String, Vec<MessageDeclaration>> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();
    let mut skipped = Vec::new();

    for file in files {
        skipped.extend(file.skipped);
        for declaration in file.declarations {
            let variants = by_id.entry(declaration.id.clone()).or_insert_with(|| {
                first_seen.push(declaration.id.clone());
                Vec::new()
            });
            if !variants.iter().any(|v| v.same_content(&declaration)) {
                variants.push(declaration);
            }
        }
    }

    let mut declarations = Vec::with_capacity(first_seen.len());
    let mut conflicts = Vec::new();

    for id in first_seen {
        let Some(mut variants) = by_id.remove(&id) else {
            continue;
        };
        if variants.len() > 1 {
            conflicts.push(DuplicateConflict {
                id,
                occurrences: variants.clone(),
            });
        }
        declarations.push(variants.swap_remove(0));
    }

    declarations.sort_by(|a, b| locale_compare(&a.id, &b.id));
    conflicts.sort_by(|a, b| locale_compare(&a.id, &b.id));

    SourceScan {
        declarations,
        conflicts,
        skipped,
        parse_errors: Vec::new(),
        files_scanned: 0,
    }
}

/// Read, parse and extract every file, then merge.
///
/// `files` should be sorted; paths in locations are shown relative to `root`.
pub fn scan_sources(
    root: &Path,
    files: &[PathBuf],
    names: &CallSiteNames,
    verbose: bool,
) -> SourceScan {
    let results: Vec<(String, Result<FileDeclarations>)> = files
        .par_iter()
        .map(|path| {
            let display = relative_path(root, path)
                .to_string_lossy()
                .replace('\\', "/");
            let result = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))
                .and_then(|code| extract_from_source(code, &display, names));
            (display, result)
        })
        .collect();

    let mut parsed = Vec::with_capacity(results.len());
    let mut parse_errors = Vec::new();

    for (file_path, result) in results {
        match result {
            Ok(file) => parsed.push(file),
            Err(e) => {
                if verbose {
                    eprintln!("Warning: {} - {}", file_path, e);
                }
                parse_errors.push(SourceParseError {
                    file_path,
                    error: e.to_string(),
                });
            }
        }
    }

    let mut scan = merge_declarations(parsed);
    scan.parse_errors = parse_errors;
    scan.files_scanned = files.len();
    scan
}
