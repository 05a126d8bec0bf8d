use std::{
    collections::BTreeSet,
    path::{Component, Path, PathBuf},
};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

use crate::config::is_glob_pattern;

/// Result of scanning files.
pub struct ScanResult {
    /// Sorted, duplicate-free list of source files.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Path of `path` relative to `base`, without `.` components.
///
/// Used both for ignore matching and for display, so that `./src/a.tsx`
/// and `src/a.tsx` compare equal.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    let rel = path.strip_prefix(base).unwrap_or(path);
    rel.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

struct IgnoreMatcher {
    literal_paths: Vec<PathBuf>,
    patterns: Vec<Pattern>,
}

impl IgnoreMatcher {
    fn new(ignore_patterns: &[String], verbose: bool) -> Self {
        let mut literal_paths = Vec::new();
        let mut patterns = Vec::new();

        for p in ignore_patterns {
            if is_glob_pattern(p) {
                match Pattern::new(p) {
                    Ok(pattern) => patterns.push(pattern),
                    Err(e) => {
                        if verbose {
                            eprintln!(
                                "{} Invalid ignore pattern '{}': {}",
                                "warning:".bold().yellow(),
                                p,
                                e
                            );
                        }
                    }
                }
            } else {
                literal_paths.push(relative_path(Path::new("."), Path::new(p)));
            }
        }

        Self {
            literal_paths,
            patterns,
        }
    }

    fn is_ignored(&self, base: &Path, path: &Path) -> bool {
        let rel = relative_path(base, path);
        if self.literal_paths.iter().any(|ignore| rel.starts_with(ignore)) {
            return true;
        }
        let full = path.to_string_lossy();
        self.patterns
            .iter()
            .any(|p| p.matches_path(&rel) || p.matches(&full))
    }
}

/// Expand the configured `files` entries into a concrete file list.
///
/// Entries with wildcards are glob patterns relative to `base_dir`; glob matches
/// that are directories are walked. Entries without wildcards are literal
/// files or directories.
pub fn scan_files(
    base_dir: &Path,
    includes: &[String],
    ignore_patterns: &[String],
    verbose: bool,
) -> ScanResult {
    let ignores = IgnoreMatcher::new(ignore_patterns, verbose);
    let mut files: BTreeSet<PathBuf> = BTreeSet::new();
    let mut skipped_count = 0;
    let mut roots: Vec<PathBuf> = Vec::new();

    for inc in includes {
        if is_glob_pattern(inc) {
            let full_pattern = base_dir.join(inc);
            let pattern_str = full_pattern.to_string_lossy();
            match glob(&pattern_str) {
                Ok(entries) => {
                    for entry in entries {
                        match entry {
                            Ok(path) if path.is_dir() => roots.push(path),
                            Ok(path) => {
                                if is_scannable_file(&path) && !ignores.is_ignored(base_dir, &path)
                                {
                                    files.insert(path);
                                }
                            }
                            Err(e) => {
                                skipped_count += 1;
                                if verbose {
                                    eprintln!(
                                        "{} Cannot access path: {}",
                                        "warning:".bold().yellow(),
                                        e
                                    );
                                }
                            }
                        }
                    }
                }
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid glob pattern '{}': {}",
                            "warning:".bold().yellow(),
                            inc,
                            e
                        );
                    }
                }
            }
        } else {
            let path = base_dir.join(inc);
            if path.is_file() {
                if !ignores.is_ignored(base_dir, &path) {
                    files.insert(path);
                }
            } else if path.is_dir() {
                roots.push(path);
            } else if verbose {
                eprintln!(
                    "{} Include path does not exist: {}",
                    "warning:".bold().yellow(),
                    path.display()
                );
            }
        }
    }

    for dir in roots {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            let path = entry.path();

            if ignores.is_ignored(base_dir, path) {
                continue;
            }

            if path.is_file() && is_scannable_file(path) {
                files.insert(path.to_path_buf());
            }
        }
    }

    ScanResult {
        files: files.into_iter().collect(),
        skipped_count,
    }
}

fn is_scannable_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("tsx" | "ts" | "jsx" | "js" | "mjs" | "cjs")
    )
}
