use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::consolidation::DEFAULT_CONSOLIDATION_THRESHOLD;
use crate::error::Result;

/// Represents the complete configuration for the release docs guard.
///
/// Contains the documentation paths to cross-check and the guard policy.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub guard: GuardConfig,
}

fn default_release_notes() -> PathBuf {
    PathBuf::from("docs/releases/RELEASES.md")
}

fn default_compatibility_matrix() -> PathBuf {
    PathBuf::from("docs/releases/compatibility-matrix.md")
}

fn default_docs_index() -> PathBuf {
    PathBuf::from("docs/README.md")
}

fn default_runbook_index() -> PathBuf {
    PathBuf::from("docs/operations/runbook-index.md")
}

fn default_metadata() -> PathBuf {
    PathBuf::from("docs/metadata.json")
}

fn default_releases_dir() -> PathBuf {
    PathBuf::from("docs/releases")
}

fn default_consolidation_threshold() -> usize {
    DEFAULT_CONSOLIDATION_THRESHOLD
}

/// Documentation paths, relative to the repository root.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PathsConfig {
    /// Consolidated release notes with `## [X.Y.Z] - YYYY-MM-DD` headings
    #[serde(default = "default_release_notes")]
    pub release_notes: PathBuf,

    #[serde(default = "default_compatibility_matrix")]
    pub compatibility_matrix: PathBuf,

    #[serde(default = "default_docs_index")]
    pub docs_index: PathBuf,

    #[serde(default = "default_runbook_index")]
    pub runbook_index: PathBuf,

    /// JSON document carrying `current_release`
    #[serde(default = "default_metadata")]
    pub metadata: PathBuf,

    /// Directory of `vX.Y.Z.md` files for the per-file layout
    #[serde(default = "default_releases_dir")]
    pub releases_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            release_notes: default_release_notes(),
            compatibility_matrix: default_compatibility_matrix(),
            docs_index: default_docs_index(),
            runbook_index: default_runbook_index(),
            metadata: default_metadata(),
            releases_dir: default_releases_dir(),
        }
    }
}

/// How release notes are laid out in the docs tree.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ReleaseLayout {
    /// One document with a heading per release
    #[default]
    Consolidated,
    /// One `vX.Y.Z.md` file plus `vX.Y.Z-upgrade.md` guide per release
    PerFile,
}

/// Guard policy.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GuardConfig {
    #[serde(default)]
    pub layout: ReleaseLayout,

    /// A newly introduced document adding more versions than this is a consolidation
    #[serde(default = "default_consolidation_threshold")]
    pub consolidation_threshold: usize,
}

impl Default for GuardConfig {
    fn default() -> Self {
        GuardConfig {
            layout: ReleaseLayout::default(),
            consolidation_threshold: default_consolidation_threshold(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `docsguard.toml` in current directory
/// 3. `.docsguard.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./docsguard.toml").exists() {
        fs::read_to_string("./docsguard.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".docsguard.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}
