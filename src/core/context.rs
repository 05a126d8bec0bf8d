use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use crate::config::{CONFIG_FILE_NAME, Config, load_config};
use crate::core::file_scanner::relative_path;

/// Everything a sync run needs to know about the project, resolved once.
///
/// Relative paths in the config are resolved against `project_dir`: the
/// directory holding the config file, or the root directory when running on
/// defaults.
#[derive(Debug, Clone)]
pub struct SyncContext {
    pub config: Config,
    pub project_dir: PathBuf,
    pub verbose: bool,
}

impl SyncContext {
    /// Load and validate the configuration for `root`.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - `root` is not a directory
    /// - the config file cannot be read, parsed or fails validation
    pub fn new(root: Option<&Path>, config_path: Option<&Path>, verbose: bool) -> Result<Self> {
        let root_dir = root.map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        if !root_dir.is_dir() {
            bail!("Root directory '{}' does not exist.", root_dir.display());
        }

        // Search from an absolute path so the upward walk can leave `.`.
        let search_dir = root_dir.canonicalize().unwrap_or_else(|_| root_dir.clone());
        let loaded = load_config(&search_dir, config_path)?;

        if verbose && loaded.path.is_none() {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }

        let project_dir = match loaded.path.as_deref().and_then(Path::parent) {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            Some(_) => PathBuf::from("."),
            None => root_dir,
        };

        Ok(Self {
            config: loaded.config,
            project_dir,
            verbose,
        })
    }

    /// Build a context from an already validated config.
    pub fn from_config(config: Config, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            project_dir: project_dir.into(),
            verbose: false,
        }
    }

    fn resolve(&self, p: &str) -> PathBuf {
        let p = Path::new(p);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            // Strip leading "./" so joins become "<root>/data" instead of "<root>/./data".
            self.project_dir.join(relative_path(Path::new("."), p))
        }
    }

    pub fn translations_dir(&self) -> PathBuf {
        self.resolve(&self.config.translations_root)
    }

    pub fn compiled_dir(&self) -> PathBuf {
        self.resolve(self.config.compiled_root())
    }

    /// `<translationsRoot>/<locale>.json`
    pub fn locale_file_path(&self, locale: &str) -> PathBuf {
        self.translations_dir().join(format!("{}.json", locale))
    }

    /// `<compiledRoot>/compiled-<locale>.json`
    pub fn compiled_file_path(&self, locale: &str) -> PathBuf {
        self.compiled_dir().join(format!("compiled-{}.json", locale))
    }

    /// Path for display, relative to the project directory.
    pub fn display_path(&self, path: &Path) -> String {
        relative_path(&self.project_dir, path)
            .to_string_lossy()
            .replace('\\', "/")
    }
}
