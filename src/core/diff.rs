//! Compare declared messages against locale stores and validate ids.

use std::collections::HashSet;

use crate::core::{
    MessageDeclaration,
    collation::sort_ids,
    extract::SourceScan,
    store::{LocaleFile, MessageRecord},
};

/// An id is valid when it is all lowercase and contains no whitespace.
pub fn is_valid_id(id: &str) -> bool {
    id.to_lowercase() == id && !id.chars().any(char::is_whitespace)
}

/// Declarations whose id fails [`is_valid_id`], in id order.
pub fn invalid_declarations(scan: &SourceScan) -> Vec<&MessageDeclaration> {
    scan.declarations
        .iter()
        .filter(|d| !is_valid_id(&d.id))
        .collect()
}

/// Differences between the source and one locale's store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleDiff {
    pub locale: String,
    pub is_reference: bool,
    /// Declared in source, absent from the store. For a secondary locale this
    /// is a missing translation.
    pub added: Vec<String>,
    /// In the store, no longer declared in source.
    pub orphaned: Vec<String>,
    /// Stored text differs from the source text. Reference locale only.
    pub changed: Vec<String>,
}

impl LocaleDiff {
    pub fn is_clean(&self) -> bool {
        self.added.is_empty() && self.orphaned.is_empty() && self.changed.is_empty()
    }
}

/// Diff one locale's store against the scanned declarations.
///
/// `changed` is only computed for the reference locale: the source text is
/// authoritative there and nowhere else.
pub fn diff_locale(
    locale: &str,
    is_reference: bool,
    scan: &SourceScan,
    store: &LocaleFile,
) -> LocaleDiff {
    let declared: HashSet<&str> = scan.declarations.iter().map(|d| d.id.as_str()).collect();

    let mut added = Vec::new();
    let mut changed = Vec::new();
    for declaration in &scan.declarations {
        match store.message(&declaration.id) {
            None => added.push(declaration.id.clone()),
            Some(stored) if is_reference && stored != declaration.default_message => {
                changed.push(declaration.id.clone())
            }
            Some(_) => {}
        }
    }

    let mut orphaned: Vec<String> = store
        .ids()
        .filter(|id| !declared.contains(id))
        .map(str::to_string)
        .collect();
    sort_ids(&mut orphaned);

    LocaleDiff {
        locale: locale.to_string(),
        is_reference,
        added,
        orphaned,
        changed,
    }
}

/// Bring the reference store in line with the source.
///
/// Added and changed ids take the declared text. Orphans are only removed when
/// `prune_orphans` is set.
pub fn apply_reference_diff(
    store: &mut LocaleFile,
    scan: &SourceScan,
    diff: &LocaleDiff,
    prune_orphans: bool,
) {
    for id in diff.added.iter().chain(&diff.changed) {
        if let Some(declaration) = scan.get(id) {
            store.insert(
                id.clone(),
                MessageRecord::new(declaration.default_message.clone()),
            );
        }
    }

    if prune_orphans {
        for id in &diff.orphaned {
            store.remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extract::{FileDeclarations, merge_declarations};
    use crate::core::{SourceContext, SourceLocation};
    use pretty_assertions::assert_eq;

    fn scan(pairs: &[(&str, &str)]) -> SourceScan {
        let declarations = pairs
            .iter()
            .enumerate()
            .map(|(i, (id, msg))| MessageDeclaration {
                id: id.to_string(),
                default_message: msg.to_string(),
                description: None,
                context: SourceContext::new(SourceLocation::new("src/app.tsx", i + 1, 1), ""),
            })
            .collect();
        merge_declarations(vec![FileDeclarations {
            declarations,
            skipped: Vec::new(),
        }])
    }

    fn store(pairs: &[(&str, &str)]) -> LocaleFile {
        pairs
            .iter()
            .map(|(id, msg)| (id.to_string(), MessageRecord::new(*msg)))
            .collect()
    }

    #[test]
    fn test_id_validation() {
        assert!(is_valid_id("layout.header.navigation-item.about.label"));
        assert!(is_valid_id("page.year-in-review.2021.heading.0"));
        assert!(!is_valid_id("My-Id"));
        assert!(!is_valid_id("page.some id"));
        assert!(!is_valid_id("page.tab\tid"));
    }

    #[test]
    fn test_invalid_declarations_are_listed() {
        let scan = scan(&[("My-Id", "Hi"), ("ok", "Ok")]);
        let invalid: Vec<&str> = invalid_declarations(&scan)
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(invalid, vec!["My-Id"]);
    }

    #[test]
    fn test_reference_diff_classifies_ids() {
        let scan = scan(&[("a", "A"), ("b", "B new"), ("c", "C")]);
        let stored = store(&[("b", "B old"), ("c", "C"), ("z", "Z"), ("y", "Y")]);

        let diff = diff_locale("en", true, &scan, &stored);

        assert_eq!(diff.added, vec!["a"]);
        assert_eq!(diff.changed, vec!["b"]);
        assert_eq!(diff.orphaned, vec!["y", "z"]);
        assert!(!diff.is_clean());
    }

    #[test]
    fn test_secondary_diff_never_reports_changes() {
        let scan = scan(&[("a", "A"), ("b", "B")]);
        let stored = store(&[("b", "Be"), ("old", "Alt")]);

        let diff = diff_locale("de", false, &scan, &stored);

        assert_eq!(diff.added, vec!["a"]);
        assert!(diff.changed.is_empty());
        assert_eq!(diff.orphaned, vec!["old"]);
    }

    #[test]
    fn test_apply_reference_diff_keeps_orphans() {
        let scan = scan(&[("a", "A"), ("b", "B new"), ("My-Id", "Hello")]);
        let mut stored = store(&[("b", "B old"), ("gone", "Gone")]);
        let diff = diff_locale("en", true, &scan, &stored);

        apply_reference_diff(&mut stored, &scan, &diff, false);

        assert_eq!(stored.message("a"), Some("A"));
        assert_eq!(stored.message("b"), Some("B new"));
        assert_eq!(stored.message("My-Id"), Some("Hello"));
        assert_eq!(stored.message("gone"), Some("Gone"));
        assert!(diff_locale("en", true, &scan, &stored).added.is_empty());
    }

    #[test]
    fn test_apply_reference_diff_prunes_when_confirmed() {
        let scan = scan(&[("a", "A")]);
        let mut stored = store(&[("a", "A"), ("gone", "Gone")]);
        let diff = diff_locale("en", true, &scan, &stored);

        apply_reference_diff(&mut stored, &scan, &diff, true);

        assert!(!stored.contains("gone"));
        assert_eq!(stored.len(), 1);
    }

    #[test]
    fn test_hand_removed_id_is_restored() {
        let scan = scan(&[("a", "A")]);
        let mut stored = LocaleFile::new();
        let diff = diff_locale("en", true, &scan, &stored);
        assert_eq!(diff.added, vec!["a"]);

        apply_reference_diff(&mut stored, &scan, &diff, false);
        assert_eq!(stored.message("a"), Some("A"));
    }
}
