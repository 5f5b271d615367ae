//! Configuration management for clausewise
//!
//! TOML-backed configuration with environment-variable overrides and a
//! validation pass that collects every problem before failing.

use crate::error::{ClausewiseError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod validator;

pub use validator::ConfigValidator;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "_meta")]
    pub meta: MetaConfig,
    pub storage: StorageConfig,
    pub rules: RulesConfig,
    pub report: ReportConfig,
}

/// Metadata about the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    pub schema_version: String,
    #[serde(default = "current_timestamp")]
    pub created_at: String,
    #[serde(default = "current_timestamp")]
    pub last_modified: String,
}

fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Storage configuration: where history and artifacts live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub history_file: PathBuf,
    pub upload_dir: PathBuf,
    pub report_dir: PathBuf,
}

/// Rule configuration - path to the keyword rules file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    pub keywords_file: PathBuf,
}

/// Report artifact configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Artifact format; currently only "markdown"
    pub format: String,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ClausewiseError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ClausewiseError::Io {
            source: e,
            context: format!("Failed to read config file: {:?}", path),
        })?;
        let mut config: Config = toml::from_str(&content)?;

        // Apply environment variable overrides
        config.apply_env_overrides();

        // Validate configuration
        ConfigValidator::validate(&config)?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ClausewiseError::Io {
            source: e,
            context: format!("Failed to write config file: {:?}", path),
        })?;
        Ok(())
    }

    /// Apply environment variable overrides
    /// Environment variables in format: CLAUSEWISE_SECTION__KEY=value
    pub fn apply_env_overrides(&mut self) {
        for (key, value) in std::env::vars() {
            if let Some(config_key) = key.strip_prefix("CLAUSEWISE_") {
                if let Err(e) = self.set_value_from_env(config_key, &value) {
                    tracing::warn!("Failed to apply env override {}: {}", key, e);
                }
            }
        }
    }

    fn set_value_from_env(&mut self, path: &str, value: &str) -> Result<()> {
        match path {
            "STORAGE__DATA_DIR" => {
                self.storage.data_dir = PathBuf::from(value);
            }
            "STORAGE__HISTORY_FILE" => {
                self.storage.history_file = PathBuf::from(value);
            }
            "STORAGE__UPLOAD_DIR" => {
                self.storage.upload_dir = PathBuf::from(value);
            }
            "STORAGE__REPORT_DIR" => {
                self.storage.report_dir = PathBuf::from(value);
            }
            "RULES__KEYWORDS_FILE" => {
                self.rules.keywords_file = PathBuf::from(value);
            }
            "REPORT__FORMAT" => {
                self.report.format = value.to_string();
            }
            _ => {
                tracing::debug!("Unknown env config key: {}", path);
            }
        }
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ClausewiseError::Config("Cannot determine config directory".to_string())
        })?;

        Ok(config_dir.join("clausewise").join("config.toml"))
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().ok_or_else(|| {
            ClausewiseError::Config("Cannot determine home directory".to_string())
        })?;

        Ok(home_dir.join(".clausewise"))
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = PathBuf::from("~/.clausewise");
        let config_dir = PathBuf::from("~/.config/clausewise");

        Self {
            meta: MetaConfig {
                schema_version: "1.0.0".to_string(),
                created_at: current_timestamp(),
                last_modified: current_timestamp(),
            },
            storage: StorageConfig {
                data_dir: data_dir.clone(),
                history_file: data_dir.join("audit_log.json"),
                upload_dir: data_dir.join("uploads"),
                report_dir: data_dir.join("reports"),
            },
            rules: RulesConfig {
                keywords_file: config_dir.join("keywords.toml"),
            },
            report: ReportConfig {
                format: "markdown".to_string(),
            },
        }
    }
}
