use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail, ensure};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".lingorc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
    #[serde(default = "default_locale")]
    pub default_locale: String,
    #[serde(default = "default_files")]
    pub files: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_translations_root")]
    pub translations_root: String,
    /// Directory for `compiled-<locale>.json` bundles. Falls back to `translationsRoot`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compiled_root: Option<String>,
    #[serde(default = "default_message_functions")]
    pub message_functions: Vec<String>,
    #[serde(default = "default_message_collections")]
    pub message_collections: Vec<String>,
    #[serde(default = "default_message_components")]
    pub message_components: Vec<String>,
}

fn default_locales() -> Vec<String> {
    vec![default_locale()]
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_files() -> Vec<String> {
    vec!["src/**/*.tsx".to_string()]
}

fn default_translations_root() -> String {
    "./translation/data".to_string()
}

fn default_message_functions() -> Vec<String> {
    ["formatMessage", "defineMessage", "$t"]
        .map(String::from)
        .to_vec()
}

fn default_message_collections() -> Vec<String> {
    vec!["defineMessages".to_string()]
}

fn default_message_components() -> Vec<String> {
    vec!["FormattedMessage".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locales: default_locales(),
            default_locale: default_locale(),
            files: default_files(),
            ignores: Vec::new(),
            translations_root: default_translations_root(),
            compiled_root: None,
            message_functions: default_message_functions(),
            message_collections: default_message_collections(),
            message_components: default_message_components(),
        }
    }
}

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

impl Config {
    /// Validate configuration values.
    ///
    /// Called once after loading; everything downstream assumes a valid config.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.locales.is_empty(),
            "'locales' must list at least one locale"
        );

        let mut seen = HashSet::new();
        for locale in &self.locales {
            if locale.trim().is_empty() {
                bail!("Empty locale code in 'locales'");
            }
            if locale.contains(['/', '\\']) || locale == "." || locale == ".." {
                bail!("Locale code may not be a path: \"{}\"", locale);
            }
            if !seen.insert(locale.as_str()) {
                bail!("Duplicate locale in 'locales': \"{}\"", locale);
            }
        }

        if !self.locales.contains(&self.default_locale) {
            bail!(
                "'defaultLocale' \"{}\" is not listed in 'locales' ({})",
                self.default_locale,
                self.locales.join(", ")
            );
        }

        ensure!(!self.files.is_empty(), "'files' must not be empty");
        for pattern in &self.files {
            if is_glob_pattern(pattern) {
                Pattern::new(pattern)
                    .with_context(|| format!("Invalid glob pattern in 'files': \"{}\"", pattern))?;
            }
        }

        for pattern in &self.ignores {
            if is_glob_pattern(pattern) {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'ignores': \"{}\"", pattern)
                })?;
            }
        }

        ensure!(
            !self.message_functions.is_empty()
                || !self.message_collections.is_empty()
                || !self.message_components.is_empty(),
            "At least one of 'messageFunctions', 'messageCollections' or 'messageComponents' \
             must be set"
        );

        Ok(())
    }

    pub fn compiled_root(&self) -> &str {
        self.compiled_root
            .as_deref()
            .unwrap_or(&self.translations_root)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Where the config came from, `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn read_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    Ok(config)
}

/// Load configuration.
///
/// An explicit path must exist. Otherwise the config file is searched upwards
/// from `start_dir`, stopping at the repository root.
pub fn load_config(start_dir: &Path, explicit: Option<&Path>) -> Result<ConfigLoadResult> {
    if let Some(path) = explicit {
        let config = read_config_file(path)?;
        return Ok(ConfigLoadResult {
            config,
            path: Some(path.to_path_buf()),
        });
    }

    match find_config_file(start_dir) {
        Some(path) => {
            let config = read_config_file(&path)?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
