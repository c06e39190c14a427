//! Configuration: table names, store paths and the form schema flag.
//!
//! Everything the original deployment pulled from ambient environment
//! variables lives here as an explicit structure, persisted as YAML in a
//! per-user directory and passed into the stores at construction.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite file backing the tabular record store.
    pub database: String,
    /// Logical table holding one invite row per code.
    #[serde(default = "default_invite_table")]
    pub invite_table: String,
    /// Append-only response log.
    #[serde(default = "default_response_table")]
    pub response_table: String,
    /// Directory for uploaded proof files.
    pub blob_dir: String,
    /// Whether the form schema collects fullName/email/phone.
    #[serde(default = "default_require_identity")]
    pub require_identity: bool,
}

fn default_invite_table() -> String {
    "TestCodes".to_string()
}
fn default_response_table() -> String {
    "FormResponses".to_string()
}
fn default_require_identity() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            invite_table: default_invite_table(),
            response_table: default_response_table(),
            blob_dir: Self::blob_dir_default().to_string_lossy().to_string(),
            require_identity: default_require_identity(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("testgate")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".testgate")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("testgate.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("testgate.sqlite")
    }

    fn blob_dir_default() -> PathBuf {
        Self::config_dir().join("uploads")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    /// Initialize the configuration file and the directories it points at.
    /// In test mode the per-user config file is left untouched.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = PathBuf::from(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Self::default()
        };

        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(|_| AppError::ConfigSave)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            fs::create_dir_all(&config.blob_dir)?;
            println!("Config file: {:?}", Self::config_file());
        }

        println!("Database:    {:?}", db_path);

        Ok(config)
    }
}
