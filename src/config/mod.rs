use crate::core::stopwatch::DEFAULT_TICK;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
    #[serde(default = "default_checkpoint_interval")]
    pub checkpoint_interval_secs: u64,
    #[serde(default = "default_checkpoint_file")]
    pub checkpoint_file: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_tick_millis() -> u64 {
    DEFAULT_TICK.as_millis() as u64
}
fn default_checkpoint_interval() -> u64 {
    300
}
fn default_checkpoint_file() -> String {
    Config::checkpoint_path().to_string_lossy().to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            tick_millis: default_tick_millis(),
            checkpoint_interval_secs: default_checkpoint_interval(),
            checkpoint_file: default_checkpoint_file(),
        }
    }
}

impl Config {
    /// Per-user data directory (`~/.rworklog`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rworklog")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rworklog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rworklog.sqlite")
    }

    /// Return the full path of the plain-text checkpoint log
    pub fn checkpoint_path() -> PathBuf {
        Self::config_dir().join("rworklog.log")
    }

    /// Create the data directory. An already existing directory is fine.
    pub fn ensure_data_dir() -> io::Result<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| AppError::ConfigLoad(e.to_string()))?;
        Self::from_yaml(&content)
    }

    /// Parse a config document. Missing fields take their defaults.
    pub fn from_yaml(content: &str) -> AppResult<Self> {
        serde_yaml::from_str(content).map_err(|e| AppError::ConfigLoad(e.to_string()))
    }

    /// Write the configuration file, overwriting any previous content
    pub fn save(&self) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        let mut file = fs::File::create(Self::config_file()).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes())
            .map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Initialize configuration and database files.
    /// Returns the database path that was configured.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::ensure_data_dir()?;

        // DB name: user provided or default
        let db_path = match custom_db {
            Some(name) => {
                let p = PathBuf::from(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            config.save()?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(db_path)
    }
}
