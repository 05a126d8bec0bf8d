//! Per-locale translation store: `{ [id]: { "defaultMessage": string } }`.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::{
    collation::locale_compare,
    json_writer::{WriteOutcome, plan_write, to_pretty_json, write_atomic},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    pub default_message: String,
}

impl MessageRecord {
    pub fn new(default_message: impl Into<String>) -> Self {
        Self {
            default_message: default_message.into(),
        }
    }
}

/// Messages of one locale keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleFile {
    entries: HashMap<String, MessageRecord>,
}

impl LocaleFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored text for `id`.
    pub fn message(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(|r| r.default_message.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Insert or replace; returns the previous record.
    pub fn insert(&mut self, id: impl Into<String>, record: MessageRecord) -> Option<MessageRecord> {
        self.entries.insert(id.into(), record)
    }

    pub fn remove(&mut self, id: &str) -> Option<MessageRecord> {
        self.entries.remove(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids in unspecified order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries ordered with [`locale_compare`].
    pub fn sorted_entries(&self) -> Vec<(&str, &MessageRecord)> {
        let mut entries: Vec<(&str, &MessageRecord)> =
            self.entries.iter().map(|(k, v)| (k.as_str(), v)).collect();
        entries.sort_by(|a, b| locale_compare(a.0, b.0));
        entries
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).context("Invalid JSON")?;
        if !value.is_object() {
            bail!("Root of a translation file must be an object");
        }
        let entries: HashMap<String, MessageRecord> = serde_json::from_value(value)
            .context("Every entry must be an object with a string \"defaultMessage\"")?;
        Ok(Self { entries })
    }

    /// Canonical on-disk form: sorted keys, 2-space indentation, trailing newline.
    pub fn to_json_string(&self) -> Result<String> {
        let mut data = Map::new();
        for (id, record) in self.sorted_entries() {
            data.insert(
                id.to_string(),
                serde_json::to_value(record).context("Failed to serialize message record")?,
            );
        }
        to_pretty_json(data)
    }
}

impl FromIterator<(String, MessageRecord)> for LocaleFile {
    fn from_iter<I: IntoIterator<Item = (String, MessageRecord)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// How a locale file was found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    Missing,
    /// Unparseable content, treated as an empty store.
    Malformed(String),
}

/// A locale store together with where it lives.
#[derive(Debug, Clone)]
pub struct LocaleStore {
    pub locale: String,
    pub path: PathBuf,
    pub file: LocaleFile,
    pub status: LoadStatus,
}

impl LocaleStore {
    /// Load the store for `locale` from `path`.
    ///
    /// A missing or malformed file yields an empty store; any other read
    /// failure is an error, so that an unreadable file is never overwritten.
    pub fn load(locale: &str, path: &Path) -> Result<Self> {
        let (file, status) = match fs::read_to_string(path) {
            Ok(content) => match LocaleFile::from_json_str(&content) {
                Ok(file) => (file, LoadStatus::Loaded),
                Err(e) => (LocaleFile::new(), LoadStatus::Malformed(format!("{:#}", e))),
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => (LocaleFile::new(), LoadStatus::Missing),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read translation file: {}", path.display()));
            }
        };

        Ok(Self {
            locale: locale.to_string(),
            path: path.to_path_buf(),
            file,
            status,
        })
    }

    pub fn save(&self) -> Result<WriteOutcome> {
        write_atomic(&self.path, &self.file.to_json_string()?)
    }

    pub fn plan_save(&self) -> Result<WriteOutcome> {
        Ok(plan_write(&self.path, &self.file.to_json_string()?))
    }
}
