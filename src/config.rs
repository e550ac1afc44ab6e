use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{KinshipError, Result};
use crate::terms::{TermTable, DEFAULT_FALLBACK_TERM, DEFAULT_SELF_TERM};

/// Name of the configuration file stored inside the `.kinship` directory.
pub const CONFIG_FILENAME: &str = "config.json";

/// Name of the hidden directory holding kinship settings.
pub const KINSHIP_DIR: &str = ".kinship";

/// Settings for relation queries.
///
/// Controls which term table is used and what a lookup returns when the table
/// has nothing for a code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KinshipConfig {
    /// Schema version of the configuration.
    pub version: u32,
    /// Path to a JSON term table. Relative paths are resolved against the
    /// directory of an explicitly given config file, or against the root whose
    /// `.kinship` directory holds it (see `resolve_config`). `None` uses the
    /// built-in table.
    pub terms_path: Option<String>,
    /// Term for combined codes missing from the table.
    pub fallback_term: String,
    /// Term for self queries when the table lacks the `":"` code.
    pub self_term: String,
}

impl Default for KinshipConfig {
    fn default() -> Self {
        Self {
            version: 1,
            terms_path: None,
            fallback_term: DEFAULT_FALLBACK_TERM.to_string(),
            self_term: DEFAULT_SELF_TERM.to_string(),
        }
    }
}

impl KinshipConfig {
    /// Loads the configured term table and applies the fallback and self
    /// terms to it.
    pub fn term_table(&self, base_dir: &Path) -> Result<TermTable> {
        let table = match &self.terms_path {
            Some(p) => {
                let path = Path::new(p);
                let path = if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    base_dir.join(path)
                };
                TermTable::from_path(&path)?
            }
            None => TermTable::builtin()?,
        };
        Ok(table
            .with_fallback(self.fallback_term.clone())
            .with_self_term(self.self_term.clone()))
    }
}

/// Returns the path to the `.kinship` directory within the given root.
pub fn get_kinship_dir(root: &Path) -> PathBuf {
    root.join(KINSHIP_DIR)
}

/// Returns the path to the configuration file (`config.json`) within the
/// `.kinship` directory.
pub fn get_config_path(root: &Path) -> PathBuf {
    get_kinship_dir(root).join(CONFIG_FILENAME)
}

/// Loads the configuration for `root`.
///
/// If the configuration file does not exist, returns the default
/// configuration.
pub fn load_config(root: &Path) -> Result<KinshipConfig> {
    let config_path = get_config_path(root);

    if !config_path.exists() {
        return Ok(KinshipConfig::default());
    }

    load_config_file(&config_path)
}

/// Loads a configuration from an explicit file path.
pub fn load_config_file(config_path: &Path) -> Result<KinshipConfig> {
    let contents = fs::read_to_string(config_path).map_err(|e| KinshipError::Config {
        message: format!(
            "failed to read config file '{}': {}",
            config_path.display(),
            e
        ),
    })?;

    let config: KinshipConfig =
        serde_json::from_str(&contents).map_err(|e| KinshipError::Config {
            message: format!(
                "failed to parse config file '{}': {}",
                config_path.display(),
                e
            ),
        })?;

    Ok(config)
}

/// A configuration together with the directory its relative paths resolve
/// against.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: KinshipConfig,
    /// File the configuration was read from, or would be written to.
    pub path: PathBuf,
    pub base_dir: PathBuf,
}

impl LoadedConfig {
    /// Term table for this configuration, resolving `terms_path` against
    /// `base_dir`.
    pub fn term_table(&self) -> Result<TermTable> {
        self.config.term_table(&self.base_dir)
    }
}

/// Locates and loads the configuration for a run.
///
/// An explicit file must exist and its relative paths resolve against the
/// file's own directory. Without one, `.kinship/config.json` under `root` is
/// used if present, and relative paths resolve against `root`.
pub fn resolve_config(explicit: Option<&Path>, root: &Path) -> Result<LoadedConfig> {
    match explicit {
        Some(path) => {
            let config = load_config_file(path)?;
            let base_dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };
            Ok(LoadedConfig {
                config,
                path: path.to_path_buf(),
                base_dir,
            })
        }
        None => Ok(LoadedConfig {
            config: load_config(root)?,
            path: get_config_path(root),
            base_dir: root.to_path_buf(),
        }),
    }
}

/// Changes to apply to a stored configuration. `None` fields are left as
/// they are.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigUpdate {
    pub terms_path: Option<String>,
    /// Drop `terms_path` and go back to the built-in table.
    pub builtin_terms: bool,
    pub fallback_term: Option<String>,
    pub self_term: Option<String>,
}

impl ConfigUpdate {
    pub fn is_empty(&self) -> bool {
        self == &ConfigUpdate::default()
    }

    pub fn apply(&self, config: &mut KinshipConfig) {
        if self.builtin_terms {
            config.terms_path = None;
        }
        if let Some(path) = &self.terms_path {
            config.terms_path = Some(path.clone());
        }
        if let Some(term) = &self.fallback_term {
            config.fallback_term = term.clone();
        }
        if let Some(term) = &self.self_term {
            config.self_term = term.clone();
        }
    }
}

/// Applies `update` to the configuration stored at `path` (the default
/// configuration if there is none yet) and writes the result back.
pub fn update_config_file(path: &Path, update: &ConfigUpdate) -> Result<KinshipConfig> {
    let mut config = if path.exists() {
        load_config_file(path)?
    } else {
        KinshipConfig::default()
    };
    update.apply(&mut config);
    save_config_file(path, &config)?;
    debug!(path = %path.display(), "updated config");
    Ok(config)
}

/// Writes `config` to `path`, creating parent directories as needed.
///
/// The file is replaced in one rename, so readers see either the old or the
/// new configuration.
pub fn save_config_file(path: &Path, config: &KinshipConfig) -> Result<()> {
    let fail = |action: &str, target: &Path, e: std::io::Error| KinshipError::Config {
        message: format!("failed to {} '{}': {}", action, target.display(), e),
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| fail("create directory", dir, e))?;
    }

    let mut json = serde_json::to_string_pretty(config)?;
    json.push('\n');

    let staged = path.with_extension("json.tmp");
    fs::write(&staged, json).map_err(|e| fail("write", &staged, e))?;
    fs::rename(&staged, path).map_err(|e| fail("replace", path, e))
}
