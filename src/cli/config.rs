//! Configuration file loading
//!
//! ```json
//! {
//!   "schema_path": "schema.json",
//!   "blacklist": ["near"],
//!   "use_default_blacklist": true,
//!   "log_level": "warn"
//! }
//! ```
//!
//! `schema_path` is resolved against the directory holding the config file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::filter::{Blacklist, ConstraintKind};
use crate::schema::{Schema, SchemaLoader};

use super::errors::{CliError, CliResult};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema document (required)
    pub schema_path: PathBuf,

    /// Extra blacklisted constraint spellings (optional, default none)
    #[serde(default)]
    pub blacklist: Vec<String>,

    /// Whether the built-in blacklist applies (optional, default true)
    #[serde(default = "default_use_default_blacklist")]
    pub use_default_blacklist: bool,

    /// Log level when RUST_LOG is unset (optional, default "warn")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_use_default_blacklist() -> bool {
    true
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        if config.schema_path.is_relative() {
            if let Some(dir) = path.parent() {
                config.schema_path = dir.join(&config.schema_path);
            }
        }

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> CliResult<()> {
        if self.schema_path.as_os_str().is_empty() {
            return Err(CliError::config_error("schema_path must not be empty"));
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(CliError::config_error(format!(
                "Invalid log_level: '{}'. Expected one of {}.",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        self.blacklist().map(|_| ())
    }

    /// Builds the blacklist this config describes
    pub fn blacklist(&self) -> CliResult<Blacklist> {
        let mut blacklist = if self.use_default_blacklist {
            Blacklist::builtin()
        } else {
            Blacklist::empty()
        };

        for spelling in &self.blacklist {
            let kind = spelling
                .parse::<ConstraintKind>()
                .map_err(|e| CliError::config_error(format!("Invalid blacklist entry: {}", e)))?;
            blacklist.extend([kind]);
        }

        Ok(blacklist)
    }

    /// Loads the schema snapshot named by this config
    pub fn load_schema(&self) -> CliResult<Schema> {
        Ok(SchemaLoader::load_file(&self.schema_path)?)
    }
}
