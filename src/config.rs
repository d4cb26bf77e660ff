use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classify::ClassificationTable;
use crate::error::{Result, SptError};

/// Default directory name for sptable data.
const DATA_DIR: &str = ".sptable";
/// Default database filename.
const DB_FILE: &str = "inventory.db";
/// Config filename.
const CONFIG_FILE: &str = "config.toml";

/// Location of `system_profiler` on every supported macOS release.
pub const DEFAULT_PROFILER_BINARY: &str = "/usr/sbin/system_profiler";

/// Configuration resolved from a root directory.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `.sptable/`.
    pub root: PathBuf,
    /// Path to the `.sptable/` directory.
    pub data_dir: PathBuf,
    /// Path to the `SQLite` snapshot database.
    pub db_path: PathBuf,
    /// Path to the config file.
    pub config_path: PathBuf,
    /// User settings loaded from config.toml.
    pub settings: UserSettings,
}

/// User-configurable settings from .sptable/config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// How the report is produced.
    pub profiler: ProfilerSettings,
    /// Output configuration.
    pub output: OutputSettings,
    /// Section → data type additions.
    pub classification: ClassificationSettings,
    /// Snapshot retention.
    pub storage: StorageSettings,
}

/// `system_profiler` invocation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilerSettings {
    /// Path to the `system_profiler` executable.
    pub binary: String,
    /// Value for `-detailLevel`: "mini", "basic" or "full".
    pub detail_level: String,
    /// Data types to request (e.g. `SPMemoryDataType`). Empty means all.
    pub data_types: Vec<String>,
    /// Yield an empty report instead of running the binary off macOS.
    pub require_macos: bool,
}

impl Default for ProfilerSettings {
    fn default() -> Self {
        Self {
            binary: DEFAULT_PROFILER_BINARY.into(),
            detail_level: "basic".into(),
            data_types: Vec::new(),
            require_macos: true,
        }
    }
}

/// Output-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Row output format: "minified" (default), "pretty", or "jsonl".
    pub format: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: "minified".into(),
        }
    }
}

/// Custom classification entries, layered over the built-in table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationSettings {
    /// Section name to data type (e.g., {"Mystery": "SPMysteryDataType"}).
    pub custom_mappings: HashMap<String, String>,
}

/// Snapshot store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Number of snapshots kept after each collect. 0 keeps everything.
    pub keep_snapshots: usize,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self { keep_snapshots: 10 }
    }
}

impl Config {
    /// Create config for a given root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let data_dir = root.join(DATA_DIR);
        let db_path = data_dir.join(DB_FILE);
        let config_path = data_dir.join(CONFIG_FILE);

        let settings = Self::load_settings(&config_path).unwrap_or_default();

        Self {
            root,
            data_dir,
            db_path,
            config_path,
            settings,
        }
    }

    /// Create config from the current working directory.
    pub fn from_cwd() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| SptError::Config(format!("cannot get cwd: {e}")))?;
        Ok(Self::new(cwd))
    }

    /// Load settings from config.toml if it exists.
    fn load_settings(config_path: &Path) -> Option<UserSettings> {
        if !config_path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(config_path).ok()?;
        match toml::from_str(&content) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!(path = %config_path.display(), error = %e, "ignoring invalid config");
                None
            }
        }
    }

    /// Save current settings to config.toml.
    #[cfg(test)]
    pub fn save_settings(&self) -> Result<()> {
        self.ensure_data_dir()?;
        let content = toml::to_string_pretty(&self.settings)
            .map_err(|e| SptError::Config(format!("failed to serialize settings: {e}")))?;
        std::fs::write(&self.config_path, content)?;
        Ok(())
    }

    /// Ensure the `.sptable/` directory exists.
    pub fn ensure_data_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    /// Check whether the snapshot database exists.
    #[must_use]
    pub fn db_exists(&self) -> bool {
        self.db_path.exists()
    }

    /// Built-in classification table plus the configured custom mappings.
    #[must_use]
    pub fn classification_table(&self) -> ClassificationTable {
        ClassificationTable::with_overrides(&self.settings.classification.custom_mappings)
    }
}
