use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;

/// What happened (or would happen) to a file on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
    /// Dry run: the file differs and would be written.
    Pending,
}

impl WriteOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteOutcome::Written => "written",
            WriteOutcome::Unchanged => "unchanged",
            WriteOutcome::Pending => "would write",
        }
    }
}

/// Serialize an ordered map as pretty JSON.
///
/// Uses 2-space indentation and adds a trailing newline. Key order is the
/// map's insertion order.
pub fn to_pretty_json(data: Map<String, Value>) -> Result<String> {
    let content =
        serde_json::to_string_pretty(&Value::Object(data)).context("Failed to serialize JSON")?;
    Ok(format!("{}\n", content))
}

fn is_unchanged(path: &Path, content: &str) -> bool {
    fs::read(path).is_ok_and(|existing| existing == content.as_bytes())
}

/// Report whether writing `content` to `path` would change anything.
pub fn plan_write(path: &Path, content: &str) -> WriteOutcome {
    if is_unchanged(path, content) {
        WriteOutcome::Unchanged
    } else {
        WriteOutcome::Pending
    }
}

/// Replace `path` with `content` atomically.
///
/// The content goes to a temporary file in the same directory which is then
/// renamed over the destination, so readers see either the old file or the
/// new one. Identical content is not rewritten.
pub fn write_atomic(path: &Path, content: &str) -> Result<WriteOutcome> {
    if is_unchanged(path, content) {
        return Ok(WriteOutcome::Unchanged);
    }

    let parent: PathBuf = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)
        .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

    let mut tmp = NamedTempFile::new_in(&parent)
        .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;
    tmp.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write temporary file for {}", path.display()))?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("Failed to flush temporary file for {}", path.display()))?;
    tmp.persist(path)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(WriteOutcome::Written)
}
