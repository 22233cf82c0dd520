//! Configuration types and parsing for sediment.yml

use crate::error::{CoreError, CoreResult};
use crate::table_name::HistoryTableName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Project configuration from sediment.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory containing migration SQL files, relative to the project root
    #[serde(default = "default_migrations_path")]
    pub migrations_path: String,

    /// Name of the schema history table
    #[serde(default)]
    pub history_table: HistoryTableName,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Named target configurations (e.g., dev, staging, prod)
    #[serde(default)]
    pub targets: BTreeMap<String, TargetConfig>,
}

/// Target-specific configuration overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Database configuration override
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// History table override
    #[serde(default)]
    pub history_table: Option<HistoryTableName>,
}

/// Database type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DbType {
    /// DuckDB (default)
    #[default]
    DuckDb,
}

impl std::fmt::Display for DbType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DbType::DuckDb => write!(f, "duckdb"),
        }
    }
}

/// Database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database type
    #[serde(rename = "type", default)]
    pub db_type: DbType,

    /// Database path (file path or `:memory:`)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            db_type: DbType::default(),
            path: default_db_path(),
        }
    }
}

/// Database and history table after applying a target's overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub database: DatabaseConfig,
    pub history_table: HistoryTableName,
}

const CONFIG_FILE_NAMES: [&str; 2] = ["sediment.yml", "sediment.yaml"];

fn default_migrations_path() -> String {
    "migrations".to_string()
}

fn default_db_path() -> String {
    "sediment.duckdb".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            migrations_path: default_migrations_path(),
            history_table: HistoryTableName::default(),
            database: DatabaseConfig::default(),
            targets: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory.
    ///
    /// Looks for sediment.yml or sediment.yaml and falls back to defaults when
    /// neither exists.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        for file_name in CONFIG_FILE_NAMES {
            let path = dir.join(file_name);
            if path.exists() {
                return Self::load(&path);
            }
        }
        log::debug!(
            "No sediment.yml in {}, using default configuration",
            dir.display()
        );
        Ok(Self::default())
    }

    fn validate(&self) -> CoreResult<()> {
        if self.migrations_path.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migrations_path cannot be empty".to_string(),
            });
        }
        if self.database.path.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database.path cannot be empty".to_string(),
            });
        }
        for (name, target) in &self.targets {
            if let Some(db) = &target.database {
                if db.path.trim().is_empty() {
                    return Err(CoreError::ConfigInvalid {
                        message: format!("targets.{name}.database.path cannot be empty"),
                    });
                }
            }
        }
        Ok(())
    }

    /// Absolute migrations directory relative to a project root
    pub fn migrations_path_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_path)
    }

    /// Get the list of available target names
    pub fn available_targets(&self) -> Vec<&str> {
        self.targets.keys().map(|s| s.as_str()).collect()
    }

    /// Resolve the database and history table, applying `target` overrides.
    pub fn resolve_target(&self, target: Option<&str>) -> CoreResult<ResolvedTarget> {
        let mut resolved = ResolvedTarget {
            database: self.database.clone(),
            history_table: self.history_table.clone(),
        };

        let Some(name) = target else {
            return Ok(resolved);
        };
        let Some(overrides) = self.targets.get(name) else {
            return Err(CoreError::UnknownTarget {
                name: name.to_string(),
                available: self.available_targets().join(", "),
            });
        };

        if let Some(database) = &overrides.database {
            resolved.database = database.clone();
        }
        if let Some(table) = &overrides.history_table {
            resolved.history_table = table.clone();
        }
        Ok(resolved)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
