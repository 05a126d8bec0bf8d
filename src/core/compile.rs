//! Compile locale stores into flat, render-ready bundles.

use std::path::Path;

use anyhow::Result;
use serde_json::{Map, Value};

use crate::core::{
    json_writer::{WriteOutcome, plan_write, to_pretty_json, write_atomic},
    store::LocaleFile,
};

/// Flattened `id -> text` mapping for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledBundle {
    pub locale: String,
    /// Ordered like the reference store.
    entries: Vec<(String, String)>,
}

impl CompiledBundle {
    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == id)
            .map(|(_, v)| v.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn to_json_string(&self) -> Result<String> {
        let data: Map<String, Value> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        to_pretty_json(data)
    }

    pub fn save(&self, path: &Path) -> Result<WriteOutcome> {
        write_atomic(path, &self.to_json_string()?)
    }

    pub fn plan_save(&self, path: &Path) -> Result<WriteOutcome> {
        Ok(plan_write(path, &self.to_json_string()?))
    }
}

/// Build the bundle for `locale`.
///
/// The reference store defines the id universe. Each id takes the locale's
/// own text when present and non-empty, and the reference text otherwise;
/// ids only the locale knows are dropped.
pub fn compile_bundle(
    locale: &str,
    reference: &LocaleFile,
    translations: &LocaleFile,
) -> CompiledBundle {
    let entries = reference
        .sorted_entries()
        .into_iter()
        .map(|(id, record)| {
            let text = translations
                .message(id)
                .filter(|t| !t.is_empty())
                .unwrap_or(record.default_message.as_str());
            (id.to_string(), text.to_string())
        })
        .collect();

    CompiledBundle {
        locale: locale.to_string(),
        entries,
    }
}

/// Ids of the bundle whose text came from the reference store.
pub fn fallback_ids<'a>(
    reference: &LocaleFile,
    translations: &LocaleFile,
    bundle: &'a CompiledBundle,
) -> Vec<&'a str> {
    bundle
        .entries()
        .filter(|(id, _)| {
            translations.message(id).is_none_or(str::is_empty) && reference.contains(id)
        })
        .map(|(id, _)| id)
        .collect()
}
